/// Application configuration module
use anyhow::Context;
use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub license_verify_url: String,
    /// Remote flight logging endpoint; the local zone table is used when unset
    pub flight_log_url: Option<String>,
    pub restricted_zones_path: Option<PathBuf>,
    pub http_timeout_seconds: u64,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let license_verify_url =
            env::var("LICENSE_VERIFY_URL").context("LICENSE_VERIFY_URL is required")?;

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let flight_log_url = env_opt("FLIGHT_LOG_URL");
        let restricted_zones_path = env_opt("RESTRICTED_ZONES_PATH").map(PathBuf::from);

        Ok(Self {
            bind_addr,
            license_verify_url,
            flight_log_url,
            restricted_zones_path,
            http_timeout_seconds: env_u64("HTTP_TIMEOUT_SECONDS", 30),
        })
    }
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

fn env_u64(key: &str, default: u64) -> u64 {
    parse_u64(env::var(key).ok().as_deref(), default)
}

fn parse_u64(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

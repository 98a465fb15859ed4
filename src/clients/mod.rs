/// External collaborator clients module
use crate::domain::{
    Coordinates, FlightLogResponse, FlightRequest, LicenseCheckResult,
    LicenseVerificationResponse, RestrictedZone,
};
use crate::errors::{ApiError, ApiResult};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// License verification collaborator
#[async_trait]
pub trait LicenseVerifier: Send + Sync {
    async fn verify_license(&self, license: &str) -> ApiResult<LicenseCheckResult>;
}

/// Flight logging and geofence evaluation collaborator
#[async_trait]
pub trait FlightLogger: Send + Sync {
    async fn log_flight(&self, request: &FlightRequest) -> ApiResult<FlightLogResponse>;
}

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("drone-flight-log/1.0")
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// Reject non-2xx responses and decode the body
async fn decode<T: DeserializeOwned>(service: &'static str, resp: Response) -> ApiResult<T> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ApiError::Upstream {
            service,
            status: status.as_u16(),
        });
    }

    let body = resp.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// License verification service client
pub struct LicenseClient {
    http_client: HttpClient,
    base_url: String,
}

impl LicenseClient {
    pub fn new(base_url: String, timeout: Duration) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(timeout)?,
            base_url,
        })
    }
}

#[async_trait]
impl LicenseVerifier for LicenseClient {
    async fn verify_license(&self, license: &str) -> ApiResult<LicenseCheckResult> {
        let resp = self
            .http_client
            .get_client()
            .get(&self.base_url)
            .query(&[("license", license)])
            .send()
            .await?;

        let payload: LicenseVerificationResponse = decode("license verification", resp).await?;
        debug!(result = ?payload.result, "license verification answered");
        Ok(payload.into())
    }
}

/// Flight logging service client
pub struct FlightLogClient {
    http_client: HttpClient,
    base_url: String,
}

impl FlightLogClient {
    pub fn new(base_url: String, timeout: Duration) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(timeout)?,
            base_url,
        })
    }
}

#[async_trait]
impl FlightLogger for FlightLogClient {
    async fn log_flight(&self, request: &FlightRequest) -> ApiResult<FlightLogResponse> {
        let resp = self
            .http_client
            .get_client()
            .post(&self.base_url)
            .json(request)
            .send()
            .await?;

        decode("flight log", resp).await
    }
}

/// Offline flight logger evaluating a fixed table of restricted zones
pub struct ZoneTableLogger {
    zones: Vec<RestrictedZone>,
}

impl ZoneTableLogger {
    pub fn new(zones: Vec<RestrictedZone>) -> Self {
        Self { zones }
    }

    /// Load zones from a JSON array file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading restricted zones from {}", path.display()))?;
        let zones: Vec<RestrictedZone> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing restricted zones in {}", path.display()))?;
        Ok(Self::new(zones))
    }

    pub fn zones(&self) -> &[RestrictedZone] {
        &self.zones
    }

    fn find_zone(&self, point: &Coordinates) -> Option<&RestrictedZone> {
        self.zones.iter().find(|zone| zone.contains(point))
    }
}

impl Default for ZoneTableLogger {
    fn default() -> Self {
        let zone = |lat, lng, radius, name: &str, kind: &str| RestrictedZone {
            lat,
            lng,
            radius,
            name: name.to_string(),
            kind: Some(kind.to_string()),
        };

        Self::new(vec![
            zone(7.1808, 79.8841, 5000.0, "Bandaranaike International Airport", "airport"),
            zone(6.8219, 79.8862, 5000.0, "Colombo International Airport Buffer", "airport"),
            zone(6.9344, 79.8428, 1000.0, "Presidential Secretariat", "government"),
        ])
    }
}

#[async_trait]
impl FlightLogger for ZoneTableLogger {
    async fn log_flight(&self, request: &FlightRequest) -> ApiResult<FlightLogResponse> {
        let point = Coordinates {
            lat: request.lat,
            lng: request.lon,
        };

        let response = match self.find_zone(&point) {
            Some(zone) => FlightLogResponse::restricted(Some(zone.name.clone())),
            None => FlightLogResponse::approved(None),
        };

        info!(
            license = %request.license,
            from = %request.from,
            to = %request.to,
            coordinates = %request.coordinates,
            status = ?response.status,
            "flight logged against local zone table"
        );
        Ok(response)
    }
}

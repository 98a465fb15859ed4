/// HTTP request handlers
use crate::domain::{FlightInput, Health, RenderedView};
use crate::errors::{ApiError, ApiResult};
use crate::services::SubmissionOrchestrator;
use crate::utils::parse_time_of_day;
use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<SubmissionOrchestrator>,
}

/// Successful response wrapper
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

type ViewResponse = Result<Json<SuccessResponse<RenderedView>>, ApiError>;

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// Render the current view
pub async fn get_flight_view(State(state): State<AppState>) -> ViewResponse {
    let snapshot = state.orchestrator.snapshot().await;
    Ok(Json(SuccessResponse::new(snapshot.render())))
}

/// Submit the flight form
pub async fn submit_flight(
    State(state): State<AppState>,
    Json(input): Json<FlightInput>,
) -> ViewResponse {
    validate_form(&input)?;
    let snapshot = state.orchestrator.submit(&input).await?;
    Ok(Json(SuccessResponse::new(snapshot.render())))
}

/// Return to an empty form
pub async fn reset_flight(State(state): State<AppState>) -> ViewResponse {
    let snapshot = state.orchestrator.reset().await;
    Ok(Json(SuccessResponse::new(snapshot.render())))
}

/// Dismiss the form error banner
pub async fn clear_flight_error(State(state): State<AppState>) -> ViewResponse {
    let snapshot = state.orchestrator.clear_error().await;
    Ok(Json(SuccessResponse::new(snapshot.render())))
}

/// Form-level checks the orchestrator expects to have already happened
fn validate_form(input: &FlightInput) -> ApiResult<()> {
    if input.license.trim().is_empty() {
        return Err(ApiError::InvalidInput("license is required".to_string()));
    }
    for (field, value) in [("startTime", &input.start_time), ("endTime", &input.end_time)] {
        if parse_time_of_day(value).is_none() {
            return Err(ApiError::InvalidInput(format!(
                "{field} must be HH:MM, got {value:?}"
            )));
        }
    }
    if !input.coords.is_in_range() {
        return Err(ApiError::InvalidInput(format!(
            "coordinates out of range: {}",
            input.coords.as_pair()
        )));
    }
    Ok(())
}

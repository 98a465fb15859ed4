/// Flight submission orchestration
use crate::clients::{FlightLogger, LicenseVerifier};
use crate::domain::{
    Coordinates, FlightDetails, FlightInput, FlightLogResponse, FlightRequest, Screen,
    SubmissionSnapshot, INVALID_LICENSE_MESSAGE, UNEXPECTED_ERROR_MESSAGE,
};
use crate::errors::{ApiError, ApiResult};
use crate::utils::{local_timestamp, local_today, parse_time_of_day};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Why a submission ended back on the form
#[derive(Debug)]
pub enum SubmissionFailure {
    InvalidLicense(String),
    Unexpected(ApiError),
}

impl From<ApiError> for SubmissionFailure {
    fn from(err: ApiError) -> Self {
        SubmissionFailure::Unexpected(err)
    }
}

/// Build the logging request for a flight on `today`
pub fn build_flight_request(
    license: &str,
    start_time: &str,
    end_time: &str,
    coords: Coordinates,
    today: NaiveDate,
) -> FlightRequest {
    FlightRequest {
        license: license.to_string(),
        lat: coords.lat,
        lon: coords.lng,
        from: local_timestamp(today, start_time),
        to: local_timestamp(today, end_time),
        coordinates: coords.as_pair(),
    }
}

/// Drives license verification then flight logging, and owns the view state
pub struct SubmissionOrchestrator {
    verifier: Arc<dyn LicenseVerifier>,
    logger: Arc<dyn FlightLogger>,
    state: Mutex<SubmissionSnapshot>,
}

impl SubmissionOrchestrator {
    pub fn new(verifier: Arc<dyn LicenseVerifier>, logger: Arc<dyn FlightLogger>) -> Self {
        Self {
            verifier,
            logger,
            state: Mutex::new(SubmissionSnapshot {
                screen: Screen::form(),
                submitting: false,
            }),
        }
    }

    /// Current state
    pub async fn snapshot(&self) -> SubmissionSnapshot {
        self.state.lock().await.clone()
    }

    /// Back to an empty form, dropping any stored verdict
    pub async fn reset(&self) -> SubmissionSnapshot {
        let mut state = self.state.lock().await;
        state.screen = Screen::form();
        state.clone()
    }

    /// Dismiss the surfaced error; no effect on result screens
    pub async fn clear_error(&self) -> SubmissionSnapshot {
        let mut state = self.state.lock().await;
        if let Screen::Form { error } = &mut state.screen {
            *error = None;
        }
        state.clone()
    }

    /// Submit a flight using today's local date
    pub async fn submit(&self, input: &FlightInput) -> ApiResult<SubmissionSnapshot> {
        self.submit_on(input, local_today()).await
    }

    /// Submit a flight dated `today`. Fails only when another submission is in flight
    /// or a verdict is still on screen.
    pub async fn submit_on(
        &self,
        input: &FlightInput,
        today: NaiveDate,
    ) -> ApiResult<SubmissionSnapshot> {
        {
            let mut state = self.state.lock().await;
            if state.submitting {
                warn!(license = %input.license, "submission rejected, another is in flight");
                return Err(ApiError::SubmissionInFlight);
            }
            match &mut state.screen {
                Screen::Form { error } => *error = None,
                _ => {
                    warn!(license = %input.license, "submission rejected, form is not open");
                    return Err(ApiError::FormNotOpen);
                }
            }
            state.submitting = true;
        }

        let outcome = self.run(input, today).await;

        let mut state = self.state.lock().await;
        state.screen = match outcome {
            Ok((response, details)) => {
                info!(
                    license = %input.license,
                    status = ?response.status,
                    from = %details.start,
                    to = %details.end,
                    "flight submission completed"
                );
                Screen::from_verdict(response, details)
            }
            Err(SubmissionFailure::InvalidLicense(message)) => {
                info!(license = %input.license, %message, "license rejected");
                Screen::form_with_error(message)
            }
            Err(SubmissionFailure::Unexpected(e)) => {
                error!(license = %input.license, error = ?e, "flight submission failed");
                Screen::form_with_error(UNEXPECTED_ERROR_MESSAGE)
            }
        };
        state.submitting = false;
        debug!(view = ?state.view_state(), "submission finished");
        Ok(state.clone())
    }

    async fn run(
        &self,
        input: &FlightInput,
        today: NaiveDate,
    ) -> Result<(FlightLogResponse, FlightDetails), SubmissionFailure> {
        let request = build_flight_request(
            &input.license,
            &input.start_time,
            &input.end_time,
            input.coords,
            today,
        );

        if let (Some(start), Some(end)) = (
            parse_time_of_day(&input.start_time),
            parse_time_of_day(&input.end_time),
        ) {
            if end < start {
                warn!(from = %request.from, to = %request.to, "flight window ends before it starts");
            }
        }

        let verification = self.verifier.verify_license(&input.license).await?;
        if !verification.is_valid {
            let message = verification
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| INVALID_LICENSE_MESSAGE.to_string());
            return Err(SubmissionFailure::InvalidLicense(message));
        }

        let response = self.logger.log_flight(&request).await?;
        let details = FlightDetails {
            coords: input.coords,
            start: request.from,
            end: request.to,
        };
        Ok((response, details))
    }
}

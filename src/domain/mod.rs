/// Domain models for the application
use crate::utils::haversine_km;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const INVALID_LICENSE_MESSAGE: &str = "Invalid License Number. Please check and try again.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";
pub const NO_SPECIAL_NOTES: &str = "No special notes.";
pub const GENERAL_NOTES: &str = "- Max altitude: 120m - Avoid wildlife zones - Maintain VLOS";
pub const DEFAULT_RESTRICTED_REASON: &str = "Restricted Zone";
pub const UNKNOWN_ZONE: &str = "Unknown Zone";
pub const DEFAULT_RESTRICTED_DETAIL: &str = "Falls within a restricted airspace";
pub const RESTRICTED_WARNING: &str = "Flying here is illegal. Violations may lead to fines, drone seizure, or imprisonment under Sri Lanka’s aviation safety and anti-terrorism laws.";

/// WGS-84 point captured from the flight form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// `"lat,lng"` encoding sent alongside the numeric fields.
    /// Negative zero prints as `0`; tiny magnitudes print in full decimal, not exponent form.
    pub fn as_pair(&self) -> String {
        format!("{},{}", self.lat + 0.0, self.lng + 0.0)
    }

    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Raw flight form input
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightInput {
    pub license: String,
    pub start_time: String,
    pub end_time: String,
    pub coords: Coordinates,
}

/// Request body for the flight logging service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRequest {
    pub license: String,
    pub lat: f64,
    pub lon: f64,
    pub from: String,
    pub to: String,
    pub coordinates: String,
}

/// Outcome of a license check, as consumed by the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseCheckResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationOutcome {
    Success,
    Error,
    NotFound,
}

/// Raw payload returned by the license verification service
#[derive(Debug, Clone, Deserialize)]
pub struct LicenseVerificationResponse {
    pub result: VerificationOutcome,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<LicenseVerificationResponse> for LicenseCheckResult {
    fn from(resp: LicenseVerificationResponse) -> Self {
        let message = resp
            .extra
            .get("message")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self {
            is_valid: resp.result == VerificationOutcome::Success,
            message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightStatus {
    Approved,
    Restricted,
}

/// Verdict returned by the flight logging service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightLogResponse {
    pub status: FlightStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_note: Option<String>,
}

impl FlightLogResponse {
    pub fn approved(warning_note: Option<String>) -> Self {
        Self {
            status: FlightStatus::Approved,
            reason: None,
            warning_note,
        }
    }

    pub fn restricted(reason: Option<String>) -> Self {
        Self {
            status: FlightStatus::Restricted,
            reason,
            warning_note: None,
        }
    }

    fn reason_or(&self, fallback: &str) -> String {
        self.reason
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// Circular restricted area; radius in metres
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestrictedZone {
    pub lat: f64,
    pub lng: f64,
    pub radius: f64,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl RestrictedZone {
    pub fn contains(&self, point: &Coordinates) -> bool {
        haversine_km(self.lat, self.lng, point.lat, point.lng) * 1000.0 <= self.radius
    }
}

/// Resolved details stored alongside a logging verdict
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightDetails {
    pub coords: Coordinates,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewState {
    Form,
    Success,
    Restricted,
}

/// What the operator is looking at. Result screens always carry their verdict.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Form {
        error: Option<String>,
    },
    Success {
        response: FlightLogResponse,
        details: FlightDetails,
    },
    Restricted {
        response: FlightLogResponse,
        details: FlightDetails,
    },
}

impl Screen {
    pub fn form() -> Self {
        Screen::Form { error: None }
    }

    pub fn form_with_error(message: impl Into<String>) -> Self {
        Screen::Form {
            error: Some(message.into()),
        }
    }

    pub fn from_verdict(response: FlightLogResponse, details: FlightDetails) -> Self {
        match response.status {
            FlightStatus::Restricted => Screen::Restricted { response, details },
            FlightStatus::Approved => Screen::Success { response, details },
        }
    }

    pub fn view_state(&self) -> ViewState {
        match self {
            Screen::Form { .. } => ViewState::Form,
            Screen::Success { .. } => ViewState::Success,
            Screen::Restricted { .. } => ViewState::Restricted,
        }
    }
}

/// Point-in-time copy of the orchestrator state
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionSnapshot {
    pub screen: Screen,
    pub submitting: bool,
}

impl SubmissionSnapshot {
    pub fn view_state(&self) -> ViewState {
        self.screen.view_state()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.screen {
            Screen::Form { error } => error.as_deref(),
            _ => None,
        }
    }

    pub fn render(&self) -> RenderedView {
        match &self.screen {
            Screen::Form { .. } => RenderedView::Form(FormView {
                submitting: self.submitting,
                error: self.error().map(str::to_string),
            }),
            Screen::Success { response, details } => RenderedView::Success(SuccessView {
                coordinates: format!(
                    "Lat: {:.4}, Long: {:.4}",
                    details.coords.lat, details.coords.lng
                ),
                approved_window: format!("{} → {}", details.start, details.end),
                special_notes: response
                    .warning_note
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .unwrap_or(NO_SPECIAL_NOTES)
                    .to_string(),
                general_notes: GENERAL_NOTES.to_string(),
            }),
            Screen::Restricted { response, details } => {
                RenderedView::Restricted(RestrictedView {
                    reason: response.reason_or(DEFAULT_RESTRICTED_REASON),
                    zone: response.reason_or(UNKNOWN_ZONE),
                    detail: response.reason_or(DEFAULT_RESTRICTED_DETAIL),
                    coordinates: format!("{:.4}, {:.4}", details.coords.lat, details.coords.lng),
                    warning: RESTRICTED_WARNING.to_string(),
                })
            }
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RenderedView {
    Form(FormView),
    Success(SuccessView),
    Restricted(RestrictedView),
}

#[derive(Debug, Serialize)]
pub struct FormView {
    pub submitting: bool,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuccessView {
    pub coordinates: String,
    pub approved_window: String,
    pub special_notes: String,
    pub general_notes: String,
}

#[derive(Debug, Serialize)]
pub struct RestrictedView {
    pub reason: String,
    pub zone: String,
    pub detail: String,
    pub coordinates: String,
    pub warning: String,
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colombo() -> Coordinates {
        Coordinates {
            lat: 6.9271,
            lng: 79.8612,
        }
    }

    fn details() -> FlightDetails {
        FlightDetails {
            coords: colombo(),
            start: "2026-10-18 09:00".to_string(),
            end: "2026-10-18 10:00".to_string(),
        }
    }

    #[test]
    fn test_coordinate_pair_matches_numbers() {
        assert_eq!(colombo().as_pair(), "6.9271,79.8612");
        let whole = Coordinates { lat: 7.0, lng: -80.5 };
        assert_eq!(whole.as_pair(), "7,-80.5");
        let zero = Coordinates { lat: -0.0, lng: 0.0 };
        assert_eq!(zero.as_pair(), "0,0");
    }

    #[test]
    fn test_coordinate_range() {
        assert!(colombo().is_in_range());
        assert!(!Coordinates { lat: 91.0, lng: 0.0 }.is_in_range());
        assert!(!Coordinates { lat: 0.0, lng: -180.5 }.is_in_range());
    }

    #[test]
    fn test_verification_success_is_valid() {
        let resp: LicenseVerificationResponse =
            serde_json::from_value(serde_json::json!({"result": "success", "holder": "A. Perera"}))
                .unwrap();
        let check: LicenseCheckResult = resp.into();
        assert!(check.is_valid);
        assert_eq!(check.message, None);
    }

    #[test]
    fn test_verification_not_found_keeps_message() {
        let resp: LicenseVerificationResponse = serde_json::from_value(
            serde_json::json!({"result": "not_found", "message": "License expired"}),
        )
        .unwrap();
        let check: LicenseCheckResult = resp.into();
        assert!(!check.is_valid);
        assert_eq!(check.message.as_deref(), Some("License expired"));
    }

    #[test]
    fn test_verification_without_result_is_rejected() {
        let parsed = serde_json::from_value::<LicenseVerificationResponse>(
            serde_json::json!({"message": "ok"}),
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_flight_log_response_wire_names() {
        let resp: FlightLogResponse = serde_json::from_value(
            serde_json::json!({"status": "APPROVED", "warningNote": "Avoid wildlife corridor"}),
        )
        .unwrap();
        assert_eq!(resp.status, FlightStatus::Approved);
        assert_eq!(resp.warning_note.as_deref(), Some("Avoid wildlife corridor"));

        let bad = serde_json::from_value::<FlightLogResponse>(serde_json::json!({"status": "MAYBE"}));
        assert!(bad.is_err());
    }

    #[test]
    fn test_zone_contains_uses_metres() {
        let zone = RestrictedZone {
            lat: 6.9271,
            lng: 79.8612,
            radius: 500.0,
            name: "Test".to_string(),
            kind: None,
        };
        assert!(zone.contains(&colombo()));
        // ~1.1 km north
        assert!(!zone.contains(&Coordinates { lat: 6.9371, lng: 79.8612 }));
    }

    #[test]
    fn test_screen_from_verdict() {
        let screen = Screen::from_verdict(FlightLogResponse::restricted(None), details());
        assert_eq!(screen.view_state(), ViewState::Restricted);
        let screen = Screen::from_verdict(FlightLogResponse::approved(None), details());
        assert_eq!(screen.view_state(), ViewState::Success);
    }

    #[test]
    fn test_render_success() {
        let snapshot = SubmissionSnapshot {
            screen: Screen::from_verdict(
                FlightLogResponse::approved(Some("Avoid wildlife corridor".to_string())),
                details(),
            ),
            submitting: false,
        };
        match snapshot.render() {
            RenderedView::Success(view) => {
                assert_eq!(view.special_notes, "Avoid wildlife corridor");
                assert_eq!(view.approved_window, "2026-10-18 09:00 → 2026-10-18 10:00");
                assert_eq!(view.coordinates, "Lat: 6.9271, Long: 79.8612");
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn test_render_success_without_note() {
        let snapshot = SubmissionSnapshot {
            screen: Screen::from_verdict(FlightLogResponse::approved(None), details()),
            submitting: false,
        };
        match snapshot.render() {
            RenderedView::Success(view) => assert_eq!(view.special_notes, NO_SPECIAL_NOTES),
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn test_render_restricted_fallbacks() {
        let snapshot = SubmissionSnapshot {
            screen: Screen::from_verdict(FlightLogResponse::restricted(None), details()),
            submitting: false,
        };
        match snapshot.render() {
            RenderedView::Restricted(view) => {
                assert_eq!(view.reason, DEFAULT_RESTRICTED_REASON);
                assert_eq!(view.zone, UNKNOWN_ZONE);
                assert_eq!(view.detail, DEFAULT_RESTRICTED_DETAIL);
                assert_eq!(view.coordinates, "6.9271, 79.8612");
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn test_restricted_warning_copy() {
        let snapshot = SubmissionSnapshot {
            screen: Screen::from_verdict(FlightLogResponse::restricted(None), details()),
            submitting: false,
        };
        match snapshot.render() {
            RenderedView::Restricted(view) => {
                assert!(view.warning.contains("Sri Lanka\u{2019}s aviation safety"));
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn test_rendered_view_is_tagged() {
        let snapshot = SubmissionSnapshot {
            screen: Screen::form_with_error("License expired"),
            submitting: false,
        };
        let json = serde_json::to_value(snapshot.render()).unwrap();
        assert_eq!(json["view"], "FORM");
        assert_eq!(json["error"], "License expired");
        assert_eq!(json["submitting"], false);
    }
}

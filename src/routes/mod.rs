/// Application routes configuration
use crate::handlers::{
    clear_flight_error, get_flight_view, health, reset_flight, submit_flight, AppState,
};
use axum::{
    routing::{get, post},
    Router,
};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Flight submission
        .route("/flight", get(get_flight_view).post(submit_flight))
        .route("/flight/reset", post(reset_flight))
        .route("/flight/error/clear", post(clear_flight_error))
        .with_state(state)
}

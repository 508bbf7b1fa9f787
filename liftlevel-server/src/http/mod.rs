//! HTTP server module

mod api;
mod page;
mod static_files;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub use api::{
    ErrorResponse, HealthResponse, LogWorkoutRequest, LogWorkoutResponse, ResetResponse,
    UserDataResponse,
};
pub use page::render_dashboard;

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/api/health", get(api::health))
        .route("/api/log-workout", post(api::log_workout))
        .route("/api/user-data", get(api::user_data))
        .route("/api/reset-character", post(api::reset_character))
        .route("/api/exercises", get(api::list_exercises))
        .route("/api/history", get(api::list_history))
        .route("/static/*path", get(static_files::static_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

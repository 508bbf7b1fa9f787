//! REST API handlers

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use liftlevel_core::{Progress, TrackerError, WorkoutInput};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::AppState;
use crate::state::clamp_history_limit;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the server
    pub status: String,
    /// Server version
    pub version: String,
    /// Seconds since server started
    pub uptime_seconds: i64,
}

/// Health check endpoint
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// Body of `POST /api/log-workout`.
///
/// Every field is optional and forgiving: missing, null or non-numeric
/// values become zero, numeric strings are parsed, and fractional reps or
/// sets are truncated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogWorkoutRequest {
    #[serde(deserialize_with = "lenient_i64")]
    pub exercise_id: i64,
    #[serde(deserialize_with = "lenient_f64")]
    pub weight: f64,
    #[serde(deserialize_with = "lenient_u32")]
    pub reps: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub sets: u32,
}

impl LogWorkoutRequest {
    /// Parse a raw request body, falling back to all zeros
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

impl From<LogWorkoutRequest> for WorkoutInput {
    fn from(req: LogWorkoutRequest) -> Self {
        Self {
            exercise_id: req.exercise_id,
            weight: req.weight,
            reps: req.reps,
            sets: req.sets,
        }
    }
}

fn number_or_zero(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(number_or_zero(&value).max(0.0))
}

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    // Float-to-int `as` casts saturate, so negatives land on 0
    Ok(number_or_zero(&value).trunc() as u32)
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(number_or_zero(&value).trunc() as i64)
}

/// Response of `POST /api/log-workout`
#[derive(Debug, Serialize, Deserialize)]
pub struct LogWorkoutResponse {
    pub success: bool,
    pub xp_earned: i64,
    pub total_xp: i64,
    pub level: u32,
    pub leveled_up: bool,
    pub xp_progress: Progress,
}

/// Response of `GET /api/user-data`
#[derive(Debug, Serialize, Deserialize)]
pub struct UserDataResponse {
    pub total_xp: i64,
    pub level: u32,
    pub xp_progress: Progress,
}

/// Response of `POST /api/reset-character`
#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub success: bool,
    pub total_xp: i64,
    pub level: u32,
    pub xp_progress: Progress,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub code: String,
}

fn internal_error(e: TrackerError) -> Response {
    tracing::error!("Request failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            success: false,
            error: e.to_string(),
            code: "INTERNAL_ERROR".into(),
        }),
    )
        .into_response()
}

/// POST /api/log-workout
pub async fn log_workout(State(state): State<Arc<AppState>>, body: Bytes) -> impl IntoResponse {
    let request = LogWorkoutRequest::from_body(&body);
    tracing::debug!(?request, "Logging workout");

    match state.tracker.log_workout(&request.into()) {
        Ok(outcome) => Json(LogWorkoutResponse {
            success: true,
            xp_earned: outcome.xp_earned,
            total_xp: outcome.total_xp,
            level: outcome.level,
            leveled_up: outcome.leveled_up,
            xp_progress: outcome.progress,
        })
        .into_response(),
        Err(e) => internal_error(e),
    }
}

/// GET /api/user-data
pub async fn user_data(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.tracker.snapshot() {
        Ok(character) => Json(UserDataResponse {
            total_xp: character.total_xp,
            level: character.level,
            xp_progress: character.progress,
        })
        .into_response(),
        Err(e) => internal_error(e),
    }
}

/// POST /api/reset-character
pub async fn reset_character(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.tracker.reset() {
        Ok(character) => Json(ResetResponse {
            success: true,
            total_xp: character.total_xp,
            level: character.level,
            xp_progress: character.progress,
        })
        .into_response(),
        Err(e) => internal_error(e),
    }
}

/// GET /api/exercises
pub async fn list_exercises(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.tracker.exercises() {
        Ok(exercises) => Json(exercises).into_response(),
        Err(e) => internal_error(e),
    }
}

/// Query params for history list
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
}

/// GET /api/history
pub async fn list_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> impl IntoResponse {
    let limit = clamp_history_limit(query.limit.unwrap_or(state.history_limit));

    match state.tracker.history(limit) {
        Ok(history) => Json(history).into_response(),
        Err(e) => internal_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        routing::{get, post},
    };
    use axum_test::TestServer;
    use liftlevel_core::{LedgerError, WorkoutRecord};
    use serde_json::json;

    fn create_test_app() -> Router {
        let state = Arc::new(AppState::new_for_testing());
        Router::new()
            .route("/api/health", get(health))
            .route("/api/log-workout", post(log_workout))
            .route("/api/user-data", get(user_data))
            .route("/api/reset-character", post(reset_character))
            .route("/api/exercises", get(list_exercises))
            .route("/api/history", get(list_history))
            .with_state(state)
    }

    #[test]
    fn test_request_parses_well_formed_body() {
        let req = LogWorkoutRequest::from_body(
            br#"{"exercise_id": 3, "weight": 102.5, "reps": 8, "sets": 4}"#,
        );
        assert_eq!(
            req,
            LogWorkoutRequest {
                exercise_id: 3,
                weight: 102.5,
                reps: 8,
                sets: 4,
            }
        );
    }

    #[test]
    fn test_request_defaults_malformed_fields_to_zero() {
        let req = LogWorkoutRequest::from_body(
            br#"{"exercise_id": null, "weight": "heavy", "reps": [1], "sets": -2}"#,
        );
        assert_eq!(req, LogWorkoutRequest::default());
    }

    #[test]
    fn test_request_missing_fields_default_to_zero() {
        let req = LogWorkoutRequest::from_body(br#"{"weight": 50}"#);
        assert_eq!(req.weight, 50.0);
        assert_eq!(req.exercise_id, 0);
        assert_eq!(req.reps, 0);
        assert_eq!(req.sets, 0);
    }

    #[test]
    fn test_request_accepts_numeric_strings_and_truncates() {
        let req = LogWorkoutRequest::from_body(
            br#"{"exercise_id": "2", "weight": " 60.5 ", "reps": 9.9, "sets": "3"}"#,
        );
        assert_eq!(req.exercise_id, 2);
        assert_eq!(req.weight, 60.5);
        assert_eq!(req.reps, 9);
        assert_eq!(req.sets, 3);
    }

    #[test]
    fn test_request_non_json_body_is_all_zero() {
        assert_eq!(
            LogWorkoutRequest::from_body(b"weight=100&reps=10"),
            LogWorkoutRequest::default()
        );
        assert_eq!(LogWorkoutRequest::from_body(b""), LogWorkoutRequest::default());
    }

    #[tokio::test]
    async fn test_internal_error_body() {
        let err = TrackerError::Ledger(LedgerError::Migration("v001_initial: disk full".into()));
        let response = internal_error(err);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(!body.success);
        assert_eq!(body.code, "INTERNAL_ERROR");
        assert!(body.error.contains("v001_initial: disk full"));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let server = TestServer::new(create_test_app()).unwrap();

        let response = server.get("/api/health").await;
        response.assert_status_ok();

        let body: HealthResponse = response.json();
        assert_eq!(body.status, "ok");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
        assert!(body.uptime_seconds >= 0);
    }

    #[tokio::test]
    async fn test_log_workout() {
        let server = TestServer::new(create_test_app()).unwrap();

        let response = server
            .post("/api/log-workout")
            .json(&json!({"exercise_id": 1, "weight": 100, "reps": 10, "sets": 3}))
            .await;
        response.assert_status_ok();

        let body: LogWorkoutResponse = response.json();
        assert!(body.success);
        assert_eq!(body.xp_earned, 300);
        assert_eq!(body.total_xp, 300);
        assert_eq!(body.level, 1);
        assert!(!body.leveled_up);
        assert_eq!(body.xp_progress.current, 300);
        assert_eq!(body.xp_progress.needed, 1000);
        assert_eq!(body.xp_progress.percentage, 30.0);
    }

    #[tokio::test]
    async fn test_log_workout_level_up() {
        let server = TestServer::new(create_test_app()).unwrap();

        server
            .post("/api/log-workout")
            .json(&json!({"exercise_id": 1, "weight": 95, "reps": 10, "sets": 10}))
            .await
            .assert_status_ok();

        let body: LogWorkoutResponse = server
            .post("/api/log-workout")
            .json(&json!({"exercise_id": 2, "weight": 35, "reps": 10, "sets": 10}))
            .await
            .json();
        assert_eq!(body.total_xp, 1300);
        assert_eq!(body.level, 2);
        assert!(body.leveled_up);
    }

    #[tokio::test]
    async fn test_log_workout_garbage_body_succeeds_with_zero_xp() {
        let server = TestServer::new(create_test_app()).unwrap();

        let response = server.post("/api/log-workout").text("not json").await;
        response.assert_status_ok();

        let body: LogWorkoutResponse = response.json();
        assert!(body.success);
        assert_eq!(body.xp_earned, 0);
        assert_eq!(body.level, 1);
    }

    #[tokio::test]
    async fn test_user_data_fresh_character() {
        let server = TestServer::new(create_test_app()).unwrap();

        let body: UserDataResponse = server.get("/api/user-data").await.json();
        assert_eq!(body.total_xp, 0);
        assert_eq!(body.level, 1);
        assert_eq!(body.xp_progress.needed, 1000);
    }

    #[tokio::test]
    async fn test_reset_character() {
        let server = TestServer::new(create_test_app()).unwrap();

        server
            .post("/api/log-workout")
            .json(&json!({"exercise_id": 3, "weight": 500, "reps": 10, "sets": 5}))
            .await
            .assert_status_ok();

        let response = server.post("/api/reset-character").await;
        response.assert_status_ok();
        let body: ResetResponse = response.json();
        assert!(body.success);
        assert_eq!(body.total_xp, 0);
        assert_eq!(body.level, 1);

        let history: Vec<WorkoutRecord> = server.get("/api/history").await.json();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_list_exercises() {
        let server = TestServer::new(create_test_app()).unwrap();

        let body: Value = server.get("/api/exercises").await.json();
        let exercises = body.as_array().unwrap();
        assert_eq!(exercises.len(), 10);
        assert_eq!(exercises[0]["name"], "Bench Press");
        assert_eq!(exercises[0]["category"], "Chest");
    }

    #[tokio::test]
    async fn test_list_history_limit() {
        let server = TestServer::new(create_test_app()).unwrap();

        for reps in 1..=5 {
            server
                .post("/api/log-workout")
                .json(&json!({"exercise_id": 1, "weight": 100, "reps": reps, "sets": 1}))
                .await
                .assert_status_ok();
        }

        let history: Vec<WorkoutRecord> = server
            .get("/api/history")
            .add_query_param("limit", 2)
            .await
            .json();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].reps, 5);
        assert_eq!(history[1].reps, 4);
    }
}

//! REST endpoints for event decisions and preferences management.
//!
//! The pipeline only ever sees validated, strongly-typed values;
//! everything arriving over the wire goes through the field-level
//! validation here first and is rejected with a structured
//! `400 BAD_INPUT` body when malformed.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::DateTime;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::dnd::{DndWindow, TimeOfDay};
use crate::pipeline::{Decision, DecisionPipeline, EventPayload};
use crate::prefs::{EventSetting, PreferenceRecord};
use crate::store::PreferenceStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PreferenceStore>,
    pub pipeline: Arc<DecisionPipeline>,
}

impl AppState {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        let pipeline = Arc::new(DecisionPipeline::new(Arc::clone(&store)));
        Self { store, pipeline }
    }
}

/// Build the Axum router. API routes live under `api_prefix`
/// (default `/api/v1`); the health check stays at the root.
pub fn routes(state: AppState, api_prefix: &str) -> Router {
    let api = Router::new()
        .route("/events", post(decide_event))
        .route("/preferences/{user_id}", get(get_preferences))
        .route("/preferences/{user_id}", post(set_preferences))
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .nest(api_prefix, api)
}

// ── Health ──────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "OK" }))
}

// ── Events ──────────────────────────────────────────────────────────

/// POST {prefix}/events
///
/// Run the decision pipeline over one event payload. Responds 202
/// when the notification should be processed, 200 when it should be
/// skipped; both bodies carry `decision` and `reason`.
async fn decide_event(State(state): State<AppState>, Json(body): Json<Value>) -> impl IntoResponse {
    let payload = match validate_event(&body) {
        Ok(payload) => payload,
        Err(details) => return bad_input(details),
    };

    match state.pipeline.decide(&payload).await {
        Ok(verdict) => {
            let status = match verdict.decision() {
                Decision::ProcessNotification => StatusCode::ACCEPTED,
                Decision::DoNotNotify => StatusCode::OK,
            };
            (status, Json(serde_json::to_value(verdict).unwrap_or_default())).into_response()
        }
        Err(e) => {
            warn!(error = %e, event_id = %payload.event_id, "Decision failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "INTERNAL" })),
            )
                .into_response()
        }
    }
}

// ── Preferences ─────────────────────────────────────────────────────

/// GET {prefix}/preferences/{user_id}
async fn get_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    match state.store.get(&user_id).await {
        Ok(Some(record)) => Json(serde_json::to_value(record).unwrap_or_default()).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "NO_PREFERENCES" })),
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, user_id = %user_id, "Preference lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "INTERNAL" })),
            )
                .into_response()
        }
    }
}

/// POST {prefix}/preferences/{user_id}
///
/// Replace the user's record wholesale — no partial merge.
async fn set_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let record = match validate_preferences(&body) {
        Ok(record) => record,
        Err(details) => return bad_input(details),
    };

    match state.store.set(&user_id, record).await {
        Ok(()) => {
            debug!(user_id = %user_id, "Preferences replaced");
            Json(serde_json::json!({ "ok": true })).into_response()
        }
        Err(e) => {
            warn!(error = %e, user_id = %user_id, "Preference write failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "INTERNAL" })),
            )
                .into_response()
        }
    }
}

// ── Validation ──────────────────────────────────────────────────────

/// One field that failed validation.
#[derive(Debug, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn bad_input(details: Vec<FieldIssue>) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": "BAD_INPUT", "details": details })),
    )
        .into_response()
}

fn non_empty_string(body: &Value, field: &str, issues: &mut Vec<FieldIssue>) -> Option<String> {
    match body.get(field).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Some(s.to_string()),
        Some(_) => {
            issues.push(FieldIssue::new(field, "must be non-empty"));
            None
        }
        None => {
            issues.push(FieldIssue::new(field, "required string"));
            None
        }
    }
}

/// Check an event payload field by field, collecting every problem.
fn validate_event(body: &Value) -> Result<EventPayload, Vec<FieldIssue>> {
    let mut issues = Vec::new();

    let event_id = non_empty_string(body, "eventId", &mut issues);
    let user_id = non_empty_string(body, "userId", &mut issues);
    let event_type = non_empty_string(body, "eventType", &mut issues);

    let timestamp = match body.get("timestamp").and_then(Value::as_str) {
        Some(s) => match DateTime::parse_from_rfc3339(s) {
            Ok(ts) => Some(ts),
            Err(_) => {
                issues.push(FieldIssue::new(
                    "timestamp",
                    "must be RFC 3339 with explicit offset",
                ));
                None
            }
        },
        None => {
            issues.push(FieldIssue::new("timestamp", "required string"));
            None
        }
    };

    if !issues.is_empty() {
        return Err(issues);
    }
    // All four are Some once issues is empty.
    Ok(EventPayload {
        event_id: event_id.unwrap(),
        user_id: user_id.unwrap(),
        event_type: event_type.unwrap(),
        timestamp: timestamp.unwrap(),
    })
}

fn validate_time_of_day(
    dnd: &Value,
    field: &str,
    path: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<TimeOfDay> {
    match dnd.get(field).and_then(Value::as_str) {
        Some(s) => match TimeOfDay::parse(s) {
            Ok(t) => Some(t),
            Err(_) => {
                issues.push(FieldIssue::new(path, "must be HH:MM (24h)"));
                None
            }
        },
        None => {
            issues.push(FieldIssue::new(path, "required string"));
            None
        }
    }
}

/// Check a preferences body field by field, collecting every problem.
fn validate_preferences(body: &Value) -> Result<PreferenceRecord, Vec<FieldIssue>> {
    let mut issues = Vec::new();

    let (start, end) = match body.get("dnd") {
        Some(dnd) if dnd.is_object() => (
            validate_time_of_day(dnd, "start", "dnd.start", &mut issues),
            validate_time_of_day(dnd, "end", "dnd.end", &mut issues),
        ),
        _ => {
            issues.push(FieldIssue::new("dnd", "required object"));
            (None, None)
        }
    };

    let mut event_settings = std::collections::HashMap::new();
    match body.get("eventSettings") {
        Some(Value::Object(map)) => {
            for (event_type, setting) in map {
                match setting.get("enabled").and_then(Value::as_bool) {
                    Some(enabled) => {
                        event_settings.insert(event_type.clone(), EventSetting { enabled });
                    }
                    None => issues.push(FieldIssue::new(
                        format!("eventSettings.{event_type}.enabled"),
                        "required boolean",
                    )),
                }
            }
        }
        _ => issues.push(FieldIssue::new("eventSettings", "required object")),
    }

    if !issues.is_empty() {
        return Err(issues);
    }
    Ok(PreferenceRecord {
        dnd: DndWindow::new(start.unwrap(), end.unwrap()),
        event_settings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let store: Arc<dyn PreferenceStore> = Arc::new(MemoryStore::new());
        routes(AppState::new(store), "/api/v1")
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = test_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "OK");
    }

    #[tokio::test]
    async fn malformed_event_gets_field_level_details() {
        let response = test_router()
            .oneshot(post_json(
                "/api/v1/events",
                serde_json::json!({
                    "eventId": "",
                    "userId": "u1",
                    "timestamp": "2025-08-28T12:00:00"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "BAD_INPUT");
        let fields: Vec<&str> = body["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["field"].as_str().unwrap())
            .collect();
        // Empty eventId, missing eventType, offset-less timestamp.
        assert_eq!(fields, ["eventId", "eventType", "timestamp"]);
    }

    #[tokio::test]
    async fn malformed_window_field_is_rejected() {
        let response = test_router()
            .oneshot(post_json(
                "/api/v1/preferences/u1",
                serde_json::json!({
                    "dnd": { "start": "7:30", "end": "07:00" },
                    "eventSettings": {}
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["details"][0]["field"], "dnd.start");
    }

    #[tokio::test]
    async fn missing_preferences_is_404() {
        let response = test_router()
            .oneshot(
                Request::get("/api/v1/preferences/nobody")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "NO_PREFERENCES");
    }

    #[tokio::test]
    async fn valid_preferences_round_trip() {
        let router = test_router();
        let prefs = serde_json::json!({
            "dnd": { "start": "22:00", "end": "07:00" },
            "eventSettings": { "item_shipped": { "enabled": true } }
        });

        let response = router
            .clone()
            .oneshot(post_json("/api/v1/preferences/u1", prefs.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["ok"], true);

        let response = router
            .oneshot(
                Request::get("/api/v1/preferences/u1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, prefs);
    }
}

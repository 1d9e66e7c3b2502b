use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::state::SharedState;

pub async fn debug(State(state): State<SharedState>, headers: HeaderMap) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    Json(json!({
        "status": "success",
        "message": "API server is running",
        "timestamp": now(),
        "environment": state.config.environment,
        "config": {
            "port": state.config.port,
            "emailConfigured": state.mailer.is_some(),
            "googleScriptConfigured": state.sink.is_configured(),
        },
        "headers": {
            "host": header("host"),
            "origin": header("origin"),
            "referer": header("referer"),
        },
    }))
}

pub async fn test_recruitment() -> Json<Value> {
    Json(json!({
        "status": "success",
        "message": "Recruitment API test successful",
        "testApplicationId": test_id(),
        "timestamp": now(),
    }))
}

pub async fn test_registration() -> Json<Value> {
    Json(json!({
        "status": "success",
        "message": "Registration API test successful",
        "testRegistrationId": test_id(),
        "timestamp": now(),
    }))
}

/// Reports whether mail is configured without exposing credentials.
pub async fn verify_email_config(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "configured": state.config.smtp.is_configured(),
        "email": state.config.smtp.user,
    }))
}

fn test_id() -> String {
    format!("TEST-{}", Utc::now().timestamp_millis())
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use crate::delivery::DeliveryOutcome;
use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::{parser, pipeline};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub success: bool,
    pub message: String,
    pub registration_id: String,
    pub email_sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruitmentResponse {
    pub success: bool,
    pub message: String,
    pub application_id: String,
}

pub async fn send_registration_email(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<RegistrationResponse>, AppError> {
    let submission = parser::parse_submission(&headers, body)
        .await
        .map_err(AppError::BadRequest)?;

    let report = pipeline::register(&state, submission).await?;

    let (message, email_error) = match report.notify {
        DeliveryOutcome::Succeeded => ("Registration successful", None),
        DeliveryOutcome::Tolerated(reason) | DeliveryOutcome::Fatal(reason) => {
            ("Registration saved but email sending failed", Some(reason))
        }
    };

    Ok(Json(RegistrationResponse {
        success: true,
        message: message.to_string(),
        registration_id: report.id,
        email_sent: email_error.is_none(),
        email_error,
    }))
}

pub async fn submit_recruitment(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<RecruitmentResponse>, AppError> {
    let submission = parser::parse_submission(&headers, body)
        .await
        .map_err(AppError::BadRequest)?;

    let report = pipeline::recruit(&state, submission).await?;

    Ok(Json(RecruitmentResponse {
        success: true,
        message: "Application submitted successfully".to_string(),
        application_id: report.id,
    }))
}

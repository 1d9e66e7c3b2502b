pub mod diagnostics;
pub mod intake;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;

use crate::error::AppError;
use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Intake
        .route(
            "/api/send-registration-email",
            post(intake::send_registration_email)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/submit-recruitment",
            post(intake::submit_recruitment)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        // Diagnostics
        .route(
            "/api/debug",
            get(diagnostics::debug)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/test-recruitment",
            get(diagnostics::test_recruitment)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/test-registration",
            get(diagnostics::test_registration)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/verify-email-config",
            get(diagnostics::verify_email_config)
                .post(diagnostics::verify_email_config)
                .options(preflight)
                .fallback(method_not_allowed),
        )
}

/// Bare OPTIONS requests; real CORS preflights are answered by the CORS layer.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

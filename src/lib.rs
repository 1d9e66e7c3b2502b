pub mod config;
pub mod delivery;
pub mod email;
pub mod error;
pub mod routes;
pub mod state;
pub mod submission;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::delivery::sheet::SheetSink;
use crate::delivery::Sink;
use crate::email::{Mailer, SmtpMailer};
use crate::state::{AppState, SharedState};

/// Wire the production sink and mailer from config.
pub fn build_app(config: Config) -> Result<Router, String> {
    let sink = SheetSink::new(&config.sheet)?;
    if !sink.is_configured() {
        tracing::warn!("GOOGLE_SCRIPT_URL not set; submissions will not reach the spreadsheet");
    }

    let mailer: Option<Arc<dyn Mailer>> = if config.smtp.is_configured() {
        match SmtpMailer::new(&config.smtp) {
            Ok(mailer) => {
                tracing::info!("SMTP configured via {}", config.smtp.host);
                Some(Arc::new(mailer) as Arc<dyn Mailer>)
            }
            Err(e) => {
                tracing::warn!("SMTP not available: {e}");
                None
            }
        }
    } else {
        tracing::warn!("SMTP_PASSWORD not set; confirmation emails disabled");
        None
    };

    let state: SharedState = Arc::new(AppState {
        config,
        sink: Arc::new(sink),
        mailer,
    });

    Ok(build_router(state))
}

pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let max_body_size = state.config.max_body_size;

    Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(max_body_size))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                )),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

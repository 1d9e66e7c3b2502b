#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Form, Json, Router};
use reqwest::Client;
use serde_json::{json, Value};

use intake::config::{Config, SheetConfig, SiteConfig, SmtpConfig};
use intake::delivery::sheet::SheetSink;
use intake::email::{MailError, Mailer, OutgoingEmail};
use intake::state::AppState;

/// How the fake Apps Script endpoint answers.
#[derive(Debug, Clone, Copy)]
pub enum SheetBehavior {
    Ack,
    Fail(u16),
    NoAck,
    /// Appends, then redirects to a GET that acks, as Apps Script does.
    Redirect,
    /// Redirects back to itself forever.
    RedirectLoop,
    /// Acks only after `SLOW_SHEET_DELAY`.
    Slow,
    /// No endpoint configured at all.
    Missing,
}

pub const SLOW_SHEET_DELAY: Duration = Duration::from_secs(3);
pub const SHORT_SHEET_TIMEOUT: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MailBehavior {
    Deliver,
    Fail,
    Disabled,
}

/// Mailer that records messages instead of talking SMTP.
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
    fail: bool,
}

impl RecordingMailer {
    pub fn new(fail: bool) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail,
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Transport("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

#[derive(Clone)]
struct SheetState {
    behavior: SheetBehavior,
    rows: Arc<Mutex<Vec<Value>>>,
}

pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub mailer: Arc<RecordingMailer>,
    rows: Arc<Mutex<Vec<Value>>>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Rows the fake spreadsheet received, decoded from the `data` field.
    pub fn sheet_rows(&self) -> Vec<Value> {
        self.rows.lock().unwrap().clone()
    }

    pub fn sent_emails(&self) -> Vec<OutgoingEmail> {
        self.mailer.sent()
    }

    pub async fn post_json(&self, path: &str, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(data)
            .send()
            .await
            .expect("post json failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post_form(&self, path: &str, data: &[(&str, &str)]) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .form(data)
            .send()
            .await
            .expect("post form failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn test_config(sheet_url: Option<String>) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        environment: "test".to_string(),
        max_body_size: 1_048_576,
        log_level: "warn".to_string(),
        sheet: SheetConfig {
            url: sheet_url,
            timeout: Duration::from_secs(5),
        },
        smtp: SmtpConfig {
            host: "localhost".to_string(),
            port: 2525,
            user: "noreply@test.com".to_string(),
            pass: None,
            from_name: "Test Community".to_string(),
            tls_mode: "none".to_string(),
            timeout: Duration::from_secs(5),
        },
        site: SiteConfig {
            name: "NexHub".to_string(),
            url: "https://example.test".to_string(),
        },
    }
}

async fn record_row(
    State(sheet): State<SheetState>,
    Form(form): Form<HashMap<String, String>>,
) -> axum::response::Response {
    let row = form
        .get("data")
        .and_then(|d| serde_json::from_str::<Value>(d).ok())
        .unwrap_or(Value::Null);

    match sheet.behavior {
        SheetBehavior::Ack | SheetBehavior::Missing => {
            sheet.rows.lock().unwrap().push(row);
            Json(json!({ "success": true })).into_response()
        }
        SheetBehavior::Fail(code) => {
            let status = StatusCode::from_u16(code).unwrap();
            (status, "Script error").into_response()
        }
        SheetBehavior::NoAck => {
            Json(json!({ "success": false, "message": "Sheet not found" })).into_response()
        }
        SheetBehavior::Redirect => {
            sheet.rows.lock().unwrap().push(row);
            (StatusCode::FOUND, [(LOCATION, "/ack")]).into_response()
        }
        SheetBehavior::RedirectLoop => redirect_loop().await.into_response(),
        SheetBehavior::Slow => {
            tokio::time::sleep(SLOW_SHEET_DELAY).await;
            Json(json!({ "success": true })).into_response()
        }
    }
}

async fn ack() -> Json<Value> {
    Json(json!({ "success": true }))
}

async fn redirect_loop() -> impl IntoResponse {
    (StatusCode::FOUND, [(LOCATION, "/loop")])
}

async fn spawn_sheet(behavior: SheetBehavior, rows: Arc<Mutex<Vec<Value>>>) -> SocketAddr {
    let app = Router::new()
        .route("/exec", axum::routing::post(record_row))
        .route("/ack", axum::routing::get(ack))
        .route("/loop", axum::routing::any(redirect_loop))
        .with_state(SheetState { behavior, rows });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind sheet mock");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Sheet mock failed");
    });

    addr
}

/// Spawn the app on a random port against a fake spreadsheet and mailer.
pub async fn spawn_app(sheet: SheetBehavior, mail: MailBehavior) -> TestApp {
    let rows = Arc::new(Mutex::new(Vec::new()));

    let sheet_url = match sheet {
        SheetBehavior::Missing => None,
        behavior => {
            let addr = spawn_sheet(behavior, rows.clone()).await;
            Some(format!("http://{addr}/exec"))
        }
    };

    let mut config = test_config(sheet_url);
    if let SheetBehavior::Slow = sheet {
        config.sheet.timeout = SHORT_SHEET_TIMEOUT;
    }
    let sink = SheetSink::new(&config.sheet).expect("Failed to build sink");

    let recorder = Arc::new(RecordingMailer::new(mail == MailBehavior::Fail));
    let mailer: Option<Arc<dyn Mailer>> = match mail {
        MailBehavior::Disabled => None,
        _ => Some(recorder.clone() as Arc<dyn Mailer>),
    };

    let state = Arc::new(AppState {
        config,
        sink: Arc::new(sink),
        mailer,
    });
    let app = intake::build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        mailer: recorder,
        rows,
    }
}

pub fn registration() -> Value {
    json!({
        "name": "Asha Rao",
        "email": "asha@example.com",
        "phone": "9876543210",
        "organization": "City College",
        "eventId": 42,
        "eventName": "Rust Meetup",
        "eventDate": "2026-11-02",
        "eventTime": "18:00",
        "eventLocation": "Hall B",
        "additionalInfo": "  vegetarian  ",
    })
}

/// A complete recruitment application for `division`.
pub fn recruitment(division: &str) -> Value {
    let mut body = json!({
        "fullName": "Ravi Kumar",
        "email": "ravi@example.com",
        "phone": "9123456780",
        "collegeName": "State Institute",
        "branch": "CSE",
        "year": "3",
        "linkedin": "https://linkedin.com/in/ravi",
        "division": division,
        "weeklyHours": "6-10",
        "comfortableWithMeetings": true,
        "privacyPolicy": true,
        "termsAccepted": true,
    });

    let extra = match division {
        "tech" => json!({
            "programmingLanguages": "Rust, Go",
            "techProject": "A tiny kernel",
            "familiarWithFrameworks": true,
            "frameworksList": "axum, tokio",
            "techContributions": "Backend services",
        }),
        "operations" => json!({
            "hasEventExperience": false,
            "taskManagement": "Kanban",
            "eventSuggestion": "Hack night",
        }),
        "design" => json!({
            "designTools": "Figma",
            "designWorkInterest": "Posters",
        }),
        "photography" => json!({
            "cameraPreference": "Mirrorless",
            "contentType": "Event coverage",
        }),
        _ => json!({}),
    };

    if let (Some(base), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            base.insert(k.clone(), v.clone());
        }
    }
    body
}

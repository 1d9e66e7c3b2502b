use async_trait::async_trait;
use reqwest::redirect::Policy;
use serde_json::Value;

use super::{Sink, SinkError};
use crate::config::SheetConfig;
use crate::submission::fields::encode_for_sheet;
use crate::submission::Row;

const MAX_REDIRECTS: usize = 5;
const MAX_BODY_CHARS: usize = 1024;

/// Spreadsheet sink backed by an Apps Script web app. The script expects a
/// single form field `data` holding the row as JSON and answers
/// `{"success": true}` once the row is appended.
pub struct SheetSink {
    client: reqwest::Client,
    url: Option<String>,
}

impl SheetSink {
    pub fn new(config: &SheetConfig) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| format!("Failed to build spreadsheet client: {e}"))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl Sink for SheetSink {
    fn name(&self) -> &str {
        "spreadsheet"
    }

    fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    async fn append(&self, row: &Row) -> Result<(), SinkError> {
        let Some(url) = self.url.as_deref() else {
            return Err(SinkError::NotConfigured);
        };

        let cells = encode_for_sheet(&row.columns);
        let payload =
            serde_json::to_string(&cells).map_err(|e| SinkError::Encode(e.to_string()))?;

        tracing::debug!(
            "Appending {} row {} ({} columns)",
            row.data_type.as_str(),
            row.id,
            cells.len()
        );

        let resp = self
            .client
            .post(url)
            .form(&[("data", payload)])
            .send()
            .await
            .map_err(|e| SinkError::Request(e.without_url().to_string()))?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let snippet = body.chars().take(MAX_BODY_CHARS).collect::<String>();

        if !status.is_success() {
            return Err(SinkError::Status {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let ack = serde_json::from_str::<Value>(&body).ok();
        let acknowledged = ack
            .as_ref()
            .and_then(|v| v.get("success"))
            .and_then(Value::as_bool)
            .unwrap_or(false);

        if !acknowledged {
            let message = ack
                .as_ref()
                .and_then(|v| v.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or(snippet);
            return Err(SinkError::Rejected {
                status: status.as_u16(),
                body: message,
            });
        }

        tracing::debug!("Spreadsheet acknowledged row {}", row.id);
        Ok(())
    }
}

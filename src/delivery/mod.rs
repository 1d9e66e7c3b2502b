pub mod sheet;

use std::fmt;

use async_trait::async_trait;

use crate::submission::Row;

/// Result of one downstream effect, as seen by the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryOutcome {
    Succeeded,
    Tolerated(String),
    Fatal(String),
}

impl DeliveryOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, DeliveryOutcome::Succeeded)
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, DeliveryOutcome::Fatal(_))
    }
}

/// How a workflow treats the failure of one downstream effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    Tolerate,
    Fatal,
}

impl FailurePolicy {
    pub fn outcome<E: fmt::Display>(self, result: &Result<(), E>) -> DeliveryOutcome {
        match (result, self) {
            (Ok(()), _) => DeliveryOutcome::Succeeded,
            (Err(e), FailurePolicy::Tolerate) => DeliveryOutcome::Tolerated(e.to_string()),
            (Err(e), FailurePolicy::Fatal) => DeliveryOutcome::Fatal(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SinkError {
    /// No endpoint configured; nothing was sent.
    NotConfigured,
    /// Transport failure: connect, timeout, too many redirects.
    Request(String),
    /// Upstream answered with a non-2xx status.
    Status { status: u16, body: String },
    /// Upstream answered 2xx without acknowledging the append.
    Rejected { status: u16, body: String },
    Encode(String),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::NotConfigured => write!(f, "GOOGLE_SCRIPT_URL is not configured"),
            SinkError::Request(msg) => write!(f, "Spreadsheet request failed: {msg}"),
            SinkError::Status { status, body } => {
                write!(f, "Spreadsheet returned status {status}: {body}")
            }
            SinkError::Rejected { status, body } => {
                write!(f, "Failed to save to spreadsheet (status {status}): {body}")
            }
            SinkError::Encode(msg) => write!(f, "Failed to encode row: {msg}"),
        }
    }
}

impl std::error::Error for SinkError {}

/// Append-only store that is the system of record for submissions.
#[async_trait]
pub trait Sink: Send + Sync {
    fn name(&self) -> &str;
    fn is_configured(&self) -> bool;
    async fn append(&self, row: &Row) -> Result<(), SinkError>;
}

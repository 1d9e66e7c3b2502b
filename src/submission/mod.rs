pub mod division;
pub mod fields;
pub mod parser;
pub mod pipeline;
pub mod projector;
pub mod validator;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Raw form payload: field name to JSON value, as sent by the site.
pub type Submission = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Registration,
    Recruitment,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Registration => "registration",
            DataType::Recruitment => "recruitment",
        }
    }
}

/// A flattened, sink-ready record with a fixed column set per data type.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub data_type: DataType,
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub columns: Map<String, Value>,
}

impl Row {
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    pub fn text(&self, column: &str) -> String {
        text(&self.columns, column)
    }
}

/// Build `<PREFIX>-<context>-<NNNNNN>` where the suffix is the last six
/// digits of the creation time in epoch milliseconds.
pub fn generate_id(prefix: &str, context: &str, created_at: DateTime<Utc>) -> String {
    let suffix = created_at.timestamp_millis().rem_euclid(1_000_000);
    format!("{prefix}-{context}-{suffix:06}")
}

/// Fetch a field as text, treating absent and null as empty.
pub fn text(submission: &Submission, field: &str) -> String {
    match submission.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
    }
}

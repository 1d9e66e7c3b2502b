use serde_json::{Map, Value};

use super::Submission;

/// Boolean fields of the recruitment form. Form-encoded bodies carry these
/// as the strings "true"/"false".
pub const RECRUITMENT_FLAGS: &[&str] = &[
    "privacyPolicy",
    "termsAccepted",
    "comfortableWithMeetings",
    "familiarWithFrameworks",
    "hasEventExperience",
    "comfortableWithReels",
];

/// Canonical copy of a submission: null becomes "", strings are trimmed,
/// everything else passes through untouched (booleans stay booleans so the
/// validator still sees them).
pub fn normalize(raw: &Submission) -> Submission {
    raw.iter()
        .map(|(key, value)| {
            let value = match value {
                Value::Null => Value::String(String::new()),
                Value::String(s) => Value::String(s.trim().to_string()),
                other => other.clone(),
            };
            (key.clone(), value)
        })
        .collect()
}

/// Turn string-typed flags into real booleans. Blank strings stay blank so
/// the validator still reports them as missing.
pub fn coerce_flags(submission: &mut Submission, flags: &[&str]) {
    for flag in flags {
        if let Some(Value::String(s)) = submission.get(*flag) {
            if s.trim().is_empty() {
                continue;
            }
            let parsed = s.trim().eq_ignore_ascii_case("true");
            tracing::trace!("Coerced flag {flag}: {s:?} -> {parsed}");
            submission.insert(flag.to_string(), Value::Bool(parsed));
        }
    }
}

/// Sheet encoding: every cell becomes a string, booleans read "Yes"/"No".
pub fn encode_for_sheet(columns: &Map<String, Value>) -> Map<String, Value> {
    columns
        .iter()
        .map(|(key, value)| {
            let cell = match value {
                Value::Null => String::new(),
                Value::Bool(true) => "Yes".to_string(),
                Value::Bool(false) => "No".to_string(),
                Value::String(s) => s.trim().to_string(),
                Value::Number(n) => n.to_string(),
                compound => compound.to_string(),
            };
            (key.clone(), Value::String(cell))
        })
        .collect()
}

/// A field is missing when absent, null, or a blank string.
pub fn is_missing(submission: &Submission, field: &str) -> bool {
    match submission.get(field) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Only a literal `true` satisfies a consent field.
pub fn is_true(submission: &Submission, field: &str) -> bool {
    matches!(submission.get(field), Some(Value::Bool(true)))
}

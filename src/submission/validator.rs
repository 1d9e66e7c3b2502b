use std::fmt;

use serde_json::Value;

use super::division::Division;
use super::fields::{is_missing, is_true};
use super::Submission;

pub const REGISTRATION_REQUIRED: &[&str] = &["name", "email", "phone", "eventName"];

pub const RECRUITMENT_REQUIRED: &[&str] = &[
    "fullName",
    "email",
    "phone",
    "collegeName",
    "branch",
    "year",
    "division",
    "weeklyHours",
    "comfortableWithMeetings",
    "privacyPolicy",
    "termsAccepted",
];

/// Fields that only a literal `true` satisfies.
pub const CONSENT_FIELDS: &[&str] = &["privacyPolicy", "termsAccepted"];

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub missing_fields: Vec<String>,
    pub message: String,
}

impl ValidationError {
    fn missing(missing_fields: Vec<String>) -> Self {
        let message = format!("Missing required fields: {}", missing_fields.join(", "));
        Self {
            missing_fields,
            message,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

pub type ValidationResult = Result<(), ValidationError>;

pub fn validate_registration(submission: &Submission) -> ValidationResult {
    let missing = missing_fields(submission, REGISTRATION_REQUIRED);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::missing(missing))
    }
}

/// Checks base fields and the selected division's rules, reporting every
/// missing field at once.
pub fn validate_recruitment(submission: &Submission) -> ValidationResult {
    let mut missing = missing_fields(submission, RECRUITMENT_REQUIRED);

    let division_value = match submission.get("division") {
        Some(Value::String(s)) => s.trim().to_string(),
        None | Some(Value::Null) => String::new(),
        Some(other) => {
            return Err(ValidationError {
                missing_fields: missing,
                message: format!("Invalid division: {other}"),
            });
        }
    };

    // An empty division is already reported as a missing base field.
    if !division_value.is_empty() {
        let Some(division) = Division::parse(&division_value) else {
            return Err(ValidationError {
                missing_fields: missing,
                message: format!("Invalid division: {division_value}"),
            });
        };

        let rules = division.rules();
        missing.extend(missing_fields(submission, rules.required));

        for (trigger, dependent) in rules.conditional {
            if is_true(submission, trigger) && is_missing(submission, dependent) {
                missing.push(dependent.to_string());
            }
        }
    }

    missing.dedup();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::missing(missing))
    }
}

/// Fill division defaults. This is the only change made to a submission
/// after validation.
pub fn apply_defaults(submission: &mut Submission) {
    let Some(division) = submission
        .get("division")
        .and_then(Value::as_str)
        .and_then(Division::parse)
    else {
        return;
    };

    for field in division.rules().defaults {
        if is_missing(submission, field) {
            submission.insert(field.to_string(), Value::Bool(false));
        }
    }
}

fn missing_fields(submission: &Submission, required: &[&'static str]) -> Vec<String> {
    required
        .iter()
        .filter(|field| {
            if CONSENT_FIELDS.contains(field) {
                !is_true(submission, field)
            } else {
                is_missing(submission, field)
            }
        })
        .map(|field| field.to_string())
        .collect()
}

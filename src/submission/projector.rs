use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use super::division::{self, Division};
use super::fields::is_true;
use super::{generate_id, text, DataType, Row, Submission};

pub const REGISTRATION_PREFIX: &str = "NEX";
pub const RECRUITMENT_PREFIX: &str = "NX";
pub const RECRUITMENT_CONTEXT: &str = "TEAM";
/// Context used when a registration arrives without an event id.
pub const FALLBACK_EVENT_CONTEXT: &str = "GEN";

const REGISTRATION_TEXT_COLUMNS: &[&str] = &[
    "name",
    "email",
    "phone",
    "organization",
    "eventId",
    "eventName",
    "eventDate",
    "eventTime",
    "eventLocation",
    "additionalInfo",
];

const RECRUITMENT_TEXT_COLUMNS: &[&str] = &[
    "fullName",
    "email",
    "phone",
    "collegeName",
    "branch",
    "year",
    "linkedin",
    "portfolio",
    "instagram",
    "otherLink",
    "division",
    "weeklyHours",
];

const RECRUITMENT_FLAG_COLUMNS: &[&str] = &["comfortableWithMeetings", "privacyPolicy", "termsAccepted"];

pub fn project_registration(submission: &Submission, now: DateTime<Utc>) -> Row {
    let event_id = text(submission, "eventId");
    let context = if event_id.is_empty() {
        FALLBACK_EVENT_CONTEXT
    } else {
        event_id.as_str()
    };
    let id = generate_id(REGISTRATION_PREFIX, context, now);

    let mut columns = Map::new();
    columns.insert("registrationId".into(), Value::String(id.clone()));
    for column in REGISTRATION_TEXT_COLUMNS {
        columns.insert(column.to_string(), Value::String(text(submission, column)));
    }
    columns.insert("registrationDate".into(), Value::String(timestamp(now)));
    columns.insert("dataType".into(), Value::String(DataType::Registration.as_str().into()));

    Row {
        data_type: DataType::Registration,
        id,
        created_at: now,
        columns,
    }
}

/// Every recruitment row carries every division's columns; those not owned by
/// the selected division hold "".
pub fn project_recruitment(submission: &Submission, now: DateTime<Utc>) -> Row {
    let id = generate_id(RECRUITMENT_PREFIX, RECRUITMENT_CONTEXT, now);
    let selected = Division::parse(&text(submission, "division"));

    let mut columns = Map::new();
    columns.insert("timestamp".into(), Value::String(timestamp(now)));
    columns.insert("applicationId".into(), Value::String(id.clone()));
    for column in RECRUITMENT_TEXT_COLUMNS {
        columns.insert(column.to_string(), Value::String(text(submission, column)));
    }
    for column in RECRUITMENT_FLAG_COLUMNS {
        columns.insert(column.to_string(), Value::Bool(is_true(submission, column)));
    }

    for column in division::all_columns() {
        columns.insert(column.to_string(), Value::String(String::new()));
    }
    if let Some(division) = selected {
        let rules = division.rules();
        for column in rules.columns {
            let value = if rules.flags.contains(column) {
                Value::Bool(is_true(submission, column))
            } else {
                Value::String(text(submission, column))
            };
            columns.insert(column.to_string(), value);
        }
    }

    columns.insert("dataType".into(), Value::String(DataType::Recruitment.as_str().into()));

    Row {
        data_type: DataType::Recruitment,
        id,
        created_at: now,
        columns,
    }
}

fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

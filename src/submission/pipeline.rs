use std::fmt;

use chrono::Utc;

use super::division::Division;
use super::validator::{self, ValidationError};
use super::{fields, projector, text, DataType, Row, Submission};
use crate::delivery::{DeliveryOutcome, FailurePolicy, SinkError};
use crate::email::hall_ticket::HallTicket;
use crate::email::{dispatch, templates, OutgoingEmail};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Normalized,
    Validated,
    Rejected,
    Projected,
    SinkAttempted,
    NotifyAttempted,
    Responded,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Normalized => "normalized",
            Stage::Validated => "validated",
            Stage::Rejected => "rejected",
            Stage::Projected => "projected",
            Stage::SinkAttempted => "sink_attempted",
            Stage::NotifyAttempted => "notify_attempted",
            Stage::Responded => "responded",
        };
        f.write_str(name)
    }
}

/// How one submission type treats downstream failures.
#[derive(Debug, Clone, Copy)]
pub struct Workflow {
    pub data_type: DataType,
    pub sink_policy: FailurePolicy,
    pub notify_policy: FailurePolicy,
}

/// The sheet is best-effort for registrations: the attendee still gets a ticket.
pub const REGISTRATION: Workflow = Workflow {
    data_type: DataType::Registration,
    sink_policy: FailurePolicy::Tolerate,
    notify_policy: FailurePolicy::Tolerate,
};

/// An application that never reached the sheet is lost, so it must fail loudly.
pub const RECRUITMENT: Workflow = Workflow {
    data_type: DataType::Recruitment,
    sink_policy: FailurePolicy::Fatal,
    notify_policy: FailurePolicy::Tolerate,
};

#[derive(Debug, Clone, PartialEq)]
pub struct IntakeReport {
    pub id: String,
    pub sink: DeliveryOutcome,
    pub notify: DeliveryOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IntakeError {
    Rejected(ValidationError),
    Sink { id: String, error: SinkError },
}

impl fmt::Display for IntakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntakeError::Rejected(e) => write!(f, "Rejected: {e}"),
            IntakeError::Sink { id, error } => write!(f, "Submission {id} not saved: {error}"),
        }
    }
}

pub async fn register(state: &AppState, raw: Submission) -> Result<IntakeReport, IntakeError> {
    let workflow = REGISTRATION;
    advance(&workflow, Stage::Received);

    let submission = fields::normalize(&raw);
    advance(&workflow, Stage::Normalized);

    if let Err(e) = validator::validate_registration(&submission) {
        advance(&workflow, Stage::Rejected);
        tracing::info!("Registration rejected: {e}");
        return Err(IntakeError::Rejected(e));
    }
    advance(&workflow, Stage::Validated);

    let row = projector::project_registration(&submission, Utc::now());
    advance(&workflow, Stage::Projected);

    let ticket = HallTicket {
        registration_id: row.id.clone(),
        name: text(&submission, "name"),
        event_name: text(&submission, "eventName"),
        event_date: text(&submission, "eventDate"),
        event_time: text(&submission, "eventTime"),
    };
    let qr = ticket
        .to_data_url()
        .inspect_err(|e| tracing::warn!("Hall ticket for {} not generated: {e}", row.id))
        .ok();
    let email = templates::registration_confirmation(&state.config.site, &row, qr.as_deref());

    deliver(state, &workflow, row, email).await
}

pub async fn recruit(state: &AppState, raw: Submission) -> Result<IntakeReport, IntakeError> {
    let workflow = RECRUITMENT;
    advance(&workflow, Stage::Received);

    let mut submission = fields::normalize(&raw);
    fields::coerce_flags(&mut submission, fields::RECRUITMENT_FLAGS);
    advance(&workflow, Stage::Normalized);

    if let Err(e) = validator::validate_recruitment(&submission) {
        advance(&workflow, Stage::Rejected);
        tracing::info!("Recruitment application rejected: {e}");
        return Err(IntakeError::Rejected(e));
    }
    validator::apply_defaults(&mut submission);
    advance(&workflow, Stage::Validated);

    let row = projector::project_recruitment(&submission, Utc::now());
    advance(&workflow, Stage::Projected);

    let role = Division::parse(&text(&submission, "division"))
        .map(|d| d.role_name())
        .unwrap_or_default();
    let email = templates::recruitment_confirmation(&state.config.site, &row, role);

    deliver(state, &workflow, row, email).await
}

/// Sink then notify, applying the workflow's failure policies.
async fn deliver(
    state: &AppState,
    workflow: &Workflow,
    row: Row,
    email: OutgoingEmail,
) -> Result<IntakeReport, IntakeError> {
    let sink_result = state.sink.append(&row).await;
    let sink = workflow.sink_policy.outcome(&sink_result);
    advance(workflow, Stage::SinkAttempted);

    match &sink {
        DeliveryOutcome::Succeeded => {
            tracing::info!("{} {} saved to {}", workflow.data_type.as_str(), row.id, state.sink.name());
        }
        DeliveryOutcome::Tolerated(reason) => {
            tracing::warn!("{} {} not saved, continuing: {reason}", workflow.data_type.as_str(), row.id);
        }
        DeliveryOutcome::Fatal(reason) => {
            tracing::error!("{} {} not saved: {reason}", workflow.data_type.as_str(), row.id);
        }
    }

    if let Err(error) = sink_result {
        if sink.is_fatal() {
            advance(workflow, Stage::Responded);
            return Err(IntakeError::Sink { id: row.id, error });
        }
    }

    let notify_result = dispatch(state.mailer.as_deref(), &email).await;
    let notify = workflow.notify_policy.outcome(&notify_result);
    advance(workflow, Stage::NotifyAttempted);

    match &notify {
        DeliveryOutcome::Succeeded => tracing::info!("Confirmation for {} sent", row.id),
        DeliveryOutcome::Tolerated(reason) | DeliveryOutcome::Fatal(reason) => {
            tracing::warn!("Confirmation for {} not sent: {reason}", row.id)
        }
    }

    advance(workflow, Stage::Responded);
    Ok(IntakeReport {
        id: row.id,
        sink,
        notify,
    })
}

fn advance(workflow: &Workflow, stage: Stage) {
    tracing::debug!("{} intake -> {stage}", workflow.data_type.as_str());
}

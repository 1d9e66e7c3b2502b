pub mod hall_ticket;
pub mod template;
pub mod templates;

use std::fmt;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MailError {
    NotConfigured,
    Address(String),
    Build(String),
    Transport(String),
}

impl fmt::Display for MailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MailError::NotConfigured => write!(f, "Email is not configured"),
            MailError::Address(msg) => write!(f, "Invalid address: {msg}"),
            MailError::Build(msg) => write!(f, "Failed to build email: {msg}"),
            MailError::Transport(msg) => write!(f, "Failed to send email: {msg}"),
        }
    }
}

impl std::error::Error for MailError {}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

/// Send through the configured mailer, if any.
pub async fn dispatch(mailer: Option<&dyn Mailer>, email: &OutgoingEmail) -> Result<(), MailError> {
    let Some(mailer) = mailer else {
        return Err(MailError::NotConfigured);
    };
    mailer.send(email).await
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, String> {
        let pass = config
            .pass
            .clone()
            .filter(|p| !p.is_empty())
            .ok_or("SMTP_PASSWORD is not set")?;

        let address: Address = config
            .user
            .parse()
            .map_err(|e| format!("Invalid SMTP_EMAIL: {e}"))?;

        Ok(Self {
            transport: build_smtp_transport(config, pass)?,
            from: Mailbox::new(Some(config.from_name.clone()), address),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| MailError::Address(format!("{e}")))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(email.html.clone())
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        tracing::debug!("SMTP relay accepted message for {}", email.to);
        Ok(())
    }
}

fn build_smtp_transport(
    config: &SmtpConfig,
    pass: String,
) -> Result<AsyncSmtpTransport<Tokio1Executor>, String> {
    let creds = Credentials::new(config.user.clone(), pass);

    let transport = match config.tls_mode.as_str() {
        "tls" => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| format!("SMTP relay error: {e}"))?
            .port(config.port)
            .credentials(creds)
            .timeout(Some(config.timeout))
            .build(),
        "none" => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .credentials(creds)
            .timeout(Some(config.timeout))
            .build(),
        _ => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| format!("SMTP starttls error: {e}"))?
            .port(config.port)
            .credentials(creds)
            .timeout(Some(config.timeout))
            .build(),
    };

    Ok(transport)
}

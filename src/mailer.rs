//! Outbound mail through an SMTP relay.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;
use tracing::{info, instrument};

use crate::config::SmtpSettings;

pub const SENDER_NAME: &str = "Smart Summarizer";
pub const SUMMARY_SUBJECT: &str = "Your Text Summary";

#[derive(Error, Debug)]
pub enum MailError {
    #[error("invalid address {0}")]
    InvalidAddress(String),

    #[error("failed to build email: {0}")]
    Build(String),

    #[error("relay rejected message: {0}")]
    Send(String),

    #[error("transport error: {0}")]
    Transport(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_summary(&self, to: &str, summary: &str) -> Result<(), MailError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailError> {
        let creds = Credentials::new(settings.username.clone(), settings.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(settings.port)
            .credentials(creds)
            .build();

        info!(host = %settings.host, port = settings.port, "SMTP relay configured");

        Ok(Self {
            transport,
            from_address: settings.username.clone(),
        })
    }
}

/// Plain-text summary email from the configured sender.
pub fn build_summary_message(from: &str, to: &str, summary: &str) -> Result<Message, MailError> {
    let from_addr = from
        .parse()
        .map_err(|e| MailError::InvalidAddress(format!("From '{}': {}", from, e)))?;
    let to: Mailbox = to
        .trim()
        .parse()
        .map_err(|e| MailError::InvalidAddress(format!("To '{}': {}", to, e)))?;

    Message::builder()
        .from(Mailbox::new(Some(SENDER_NAME.to_string()), from_addr))
        .to(to)
        .subject(SUMMARY_SUBJECT)
        .header(ContentType::TEXT_PLAIN)
        .body(summary.to_string())
        .map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl Mailer for SmtpMailer {
    #[instrument(skip(self, summary))]
    async fn send_summary(&self, to: &str, summary: &str) -> Result<(), MailError> {
        let message = build_summary_message(&self.from_address, to, summary)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Send(e.to_string()))?;

        info!("summary email sent");
        Ok(())
    }
}

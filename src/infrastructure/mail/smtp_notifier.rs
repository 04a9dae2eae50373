use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::domain::alert::{AlertNotifier, PriceAlert};
use crate::shared::errors::NotifyError;
use crate::shared::types::{SenderCredentials, Settings};

pub const SMTP_HOST: &str = "smtp.gmail.com";
pub const SMTP_PORT: u16 = 587;

/// Sends alerts over SMTP with STARTTLS, one recipient per message
#[derive(Debug, Clone)]
pub struct SmtpNotifier {
    sender: Option<SenderCredentials>,
    recipient: Option<String>,
}

impl SmtpNotifier {
    pub fn new(sender: Option<SenderCredentials>, recipient: Option<String>) -> Self {
        Self { sender, recipient }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.sender.clone(), settings.recipient.clone())
    }

    fn credentials(&self) -> Result<&SenderCredentials, NotifyError> {
        self.sender.as_ref().ok_or(NotifyError::MissingCredentials)
    }

    /// Plain-text message from the sender account to the configured recipient
    pub fn build_message(&self, alert: &PriceAlert) -> Result<Message, NotifyError> {
        let sender = self.credentials()?;
        let recipient = self.recipient.as_deref().ok_or(NotifyError::MissingRecipient)?;

        Message::builder()
            .from(parse_mailbox(&sender.email)?)
            .to(parse_mailbox(recipient)?)
            .subject(alert.subject())
            .header(ContentType::TEXT_PLAIN)
            .body(alert.body())
            .map_err(|e| NotifyError::Message(e.to_string()))
    }
}

#[async_trait]
impl AlertNotifier for SmtpNotifier {
    async fn notify(&self, alert: &PriceAlert) -> Result<(), NotifyError> {
        let message = self.build_message(alert)?;
        let sender = self.credentials()?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(SMTP_HOST)
            .map_err(|e| NotifyError::Transport(e.to_string()))?
            .port(SMTP_PORT)
            .credentials(Credentials::new(
                sender.email.clone(),
                sender.app_password.clone(),
            ))
            .build();

        transport
            .send(message)
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        info!("✅ Email sent!");
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| NotifyError::InvalidAddress(format!("'{}': {}", address, e)))
}

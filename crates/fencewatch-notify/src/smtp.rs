//! SMTP mail session over lettre

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use crate::{AlertMessage, MailError, MailTransport};

/// Configuration for the SMTP mail session
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP relay host, reached over implicit TLS
    pub host: String,
    pub port: u16,
    /// Sender address for every alert
    pub sender: String,
    /// Alert recipients
    pub recipients: Vec<String>,
    /// Login credentials
    pub username: String,
    pub password: String,
}

/// One authenticated SMTPS session
pub struct SmtpMailer {
    config: SmtpConfig,
    sender: Mailbox,
    recipients: Vec<Mailbox>,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Open and authenticate the mail session.
    pub async fn connect(config: SmtpConfig) -> Result<Self, MailError> {
        let sender: Mailbox = parse_mailbox(&config.sender)?;
        let recipients = config
            .recipients
            .iter()
            .map(|address| parse_mailbox(address))
            .collect::<Result<Vec<_>, _>>()?;

        let transport = build_transport(&config)?;
        verify_session(&transport).await?;

        info!(host = %config.host, port = config.port, "Mail session opened");

        Ok(Self {
            config,
            sender,
            recipients,
            transport,
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&mut self, message: &AlertMessage) -> Result<(), MailError> {
        let mut builder = Message::builder()
            .from(self.sender.clone())
            .subject(message.subject_line.clone());
        for recipient in &self.recipients {
            builder = builder.to(recipient.clone());
        }
        let email = builder
            .body(message.body.clone())
            .map_err(|e| MailError::InvalidMessage(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map(|_| ())
            .map_err(classify_smtp_error)
    }

    async fn reconnect(&mut self) -> Result<(), MailError> {
        info!(host = %self.config.host, "Reopening mail session");
        self.transport = build_transport(&self.config)?;
        verify_session(&self.transport).await
    }

    async fn close(&mut self) {
        // The pooled connection tears down when the transport drops.
        debug!(host = %self.config.host, "Mail session closed");
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse()
        .map_err(|e: lettre::address::AddressError| {
            MailError::InvalidMessage(format!("bad address '{address}': {e}"))
        })
}

fn build_transport(config: &SmtpConfig) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
    let builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        .map_err(|e| MailError::Transport(e.to_string()))?;

    Ok(builder
        .port(config.port)
        .credentials(Credentials::new(
            config.username.clone(),
            config.password.clone(),
        ))
        .build())
}

async fn verify_session(
    transport: &AsyncSmtpTransport<Tokio1Executor>,
) -> Result<(), MailError> {
    match transport.test_connection().await {
        Ok(true) => Ok(()),
        Ok(false) => Err(MailError::Transport("SMTP connection test failed".into())),
        Err(e) => Err(classify_smtp_error(e)),
    }
}

/// lettre does not expose which SMTP phase rejected a command; a permanent
/// rejection is treated as the session refusing the sender.
fn classify_smtp_error(e: lettre::transport::smtp::Error) -> MailError {
    if e.is_permanent() {
        MailError::SenderRefused
    } else {
        MailError::Transport(e.to_string())
    }
}

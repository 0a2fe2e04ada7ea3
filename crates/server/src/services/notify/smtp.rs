//! SMTP delivery via lettre.

use async_trait::async_trait;
use lead_intake_core::Email;
use lettre::{
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use secrecy::ExposeSecret;

use super::{Notification, Notifier, NotifyError, SENDER_NAME};
use crate::config::SmtpConfig;

/// Sends notifications through an authenticated STARTTLS relay.
#[derive(Clone)]
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpNotifier {
    /// Create a new SMTP notifier from configuration.
    ///
    /// No connection is opened until the first send.
    ///
    /// # Errors
    ///
    /// Returns error if the sender address is invalid or the relay cannot be
    /// configured.
    pub fn new(config: &SmtpConfig, from: &Email) -> Result<Self, NotifyError> {
        let credentials = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            sender: sender_mailbox(from)?,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let email = build_message(&self.sender, notification)?;

        self.mailer.send(email).await?;

        tracing::info!(
            to = %notification.recipients,
            subject = %notification.subject,
            "Email sent via SMTP"
        );
        Ok(())
    }
}

/// `Website Lead <from>` mailbox.
fn sender_mailbox(from: &Email) -> Result<Mailbox, NotifyError> {
    let address: Address = from
        .as_str()
        .parse()
        .map_err(|_| NotifyError::InvalidAddress(from.to_string()))?;
    Ok(Mailbox::new(Some(SENDER_NAME.to_string()), address))
}

/// Build a multipart message with both plain text and HTML versions.
fn build_message(sender: &Mailbox, notification: &Notification) -> Result<Message, NotifyError> {
    let mut builder = Message::builder()
        .from(sender.clone())
        .subject(notification.subject.as_str());

    for recipient in &notification.recipients {
        let mailbox: Mailbox = recipient
            .as_str()
            .parse()
            .map_err(|_| NotifyError::InvalidAddress(recipient.to_string()))?;
        builder = builder.to(mailbox);
    }

    let email = builder.multipart(
        MultiPart::alternative()
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_PLAIN)
                    .body(notification.text_body.clone()),
            )
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_HTML)
                    .body(notification.html_body.clone()),
            ),
    )?;

    Ok(email)
}

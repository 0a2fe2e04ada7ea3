//! Staff notifications for new leads.
//!
//! Two interchangeable transports implement [`Notifier`]:
//! - [`BrevoNotifier`] - Brevo transactional email API over HTTPS
//! - [`SmtpNotifier`] - authenticated SMTP relay via lettre
//!
//! Bodies are rendered with Askama; the HTML template auto-escapes the
//! submitted values.

mod brevo;
mod smtp;

use std::sync::Arc;

use askama::Template;
use async_trait::async_trait;
use lead_intake_core::{LeadId, NewLead, Recipients};
use thiserror::Error;

use crate::config::{EmailConfig, EmailTransport};

pub use brevo::BrevoNotifier;
pub use smtp::SmtpNotifier;

/// Subject line of lead notifications.
pub const NEW_LEAD_SUBJECT: &str = "New Lead Received";

/// Display name used in the From header.
pub const SENDER_NAME: &str = "Website Lead";

/// HTML template for the new lead email.
#[derive(Template)]
#[template(path = "email/new_lead.html")]
struct NewLeadEmailHtml<'a> {
    id: LeadId,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    message: &'a str,
    enquiry_for: &'a str,
}

/// Plain text template for the new lead email.
#[derive(Template)]
#[template(path = "email/new_lead.txt")]
struct NewLeadEmailText<'a> {
    id: LeadId,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    message: &'a str,
    enquiry_for: &'a str,
}

/// Errors that can occur when sending a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// HTTP request to the email API failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Email API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// API key cannot be sent as a header value.
    #[error("Invalid API key format: {0}")]
    InvalidApiKey(String),
}

/// A rendered email ready for delivery.
#[derive(Debug, Clone)]
pub struct Notification {
    pub recipients: Recipients,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

impl Notification {
    /// Render the staff notification for a freshly stored lead.
    ///
    /// Missing fields render as empty strings.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Template` if rendering fails.
    pub fn new_lead(
        id: LeadId,
        lead: &NewLead,
        recipients: &Recipients,
    ) -> Result<Self, NotifyError> {
        let name = lead.name.as_deref().unwrap_or_default();
        let email = lead.email.as_deref().unwrap_or_default();
        let phone = lead.phone.as_deref().unwrap_or_default();
        let message = lead.message.as_deref().unwrap_or_default();
        let enquiry_for = lead.enquiry_for.as_deref().unwrap_or_default();

        let html_body = NewLeadEmailHtml {
            id,
            name,
            email,
            phone,
            message,
            enquiry_for,
        }
        .render()?;
        let text_body = NewLeadEmailText {
            id,
            name,
            email,
            phone,
            message,
            enquiry_for,
        }
        .render()?;

        Ok(Self {
            recipients: recipients.clone(),
            subject: NEW_LEAD_SUBJECT.to_string(),
            html_body,
            text_body,
        })
    }
}

/// Delivery seam for notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `notification` to all of its recipients.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError` if the transport rejects or cannot reach the
    /// provider.
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Build the notifier selected by configuration.
///
/// # Errors
///
/// Returns `NotifyError` if the transport cannot be constructed (bad API key
/// header, invalid sender address, SMTP relay setup failure).
pub fn from_config(config: &EmailConfig) -> Result<Arc<dyn Notifier>, NotifyError> {
    let notifier: Arc<dyn Notifier> = match &config.transport {
        EmailTransport::Brevo { api_key } => Arc::new(BrevoNotifier::new(
            api_key,
            config.from_address.clone(),
        )?),
        EmailTransport::Smtp(smtp) => Arc::new(SmtpNotifier::new(smtp, &config.from_address)?),
    };
    Ok(notifier)
}

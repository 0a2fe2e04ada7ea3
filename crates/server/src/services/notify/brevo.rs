//! Brevo transactional email API client.

use async_trait::async_trait;
use lead_intake_core::Email;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use super::{Notification, Notifier, NotifyError, SENDER_NAME};

/// Brevo transactional send endpoint.
const SEND_URL: &str = "https://api.brevo.com/v3/smtp/email";

/// Sends notifications through Brevo's `smtp/email` API.
#[derive(Clone)]
pub struct BrevoNotifier {
    client: reqwest::Client,
    send_url: String,
    sender: Email,
}

impl BrevoNotifier {
    /// Create a new Brevo client.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(api_key: &SecretString, sender: Email) -> Result<Self, NotifyError> {
        Self::with_send_url(api_key, sender, SEND_URL)
    }

    /// Client posting to `send_url` instead of the public Brevo endpoint.
    pub(crate) fn with_send_url(
        api_key: &SecretString,
        sender: Email,
        send_url: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        let mut headers = HeaderMap::new();

        headers.insert(
            "api-key",
            HeaderValue::from_str(api_key.expose_secret())
                .map_err(|e| NotifyError::InvalidApiKey(e.to_string()))?,
        );
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            send_url: send_url.into(),
            sender,
        })
    }

    /// Request body for one notification.
    fn payload(&self, notification: &Notification) -> serde_json::Value {
        let to: Vec<serde_json::Value> = notification
            .recipients
            .iter()
            .map(|recipient| serde_json::json!({ "email": recipient.as_str() }))
            .collect();

        serde_json::json!({
            "sender": {
                "email": self.sender.as_str(),
                "name": SENDER_NAME,
            },
            "to": to,
            "subject": notification.subject,
            "htmlContent": notification.html_body,
            "textContent": notification.text_body,
        })
    }
}

#[async_trait]
impl Notifier for BrevoNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let body = self.payload(notification);

        let response = self.client.post(&self.send_url).json(&body).send().await?;
        let status = response.status();

        // 201 Created carries the messageId
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NotifyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(
            to = %notification.recipients,
            subject = %notification.subject,
            "Email sent via Brevo"
        );
        Ok(())
    }
}

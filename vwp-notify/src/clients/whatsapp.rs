//! WhatsApp transport client
//!
//! Sends text messages through the WhatsApp Business Cloud API. The
//! transport advertises whether it is configured; the dispatcher skips the
//! channel entirely when it is not.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use vwp_common::{Error, Result};

/// Default timeout for WhatsApp API requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Outbound WhatsApp delivery
#[async_trait]
pub trait WhatsAppTransport: Send + Sync {
    /// Whether access token and sender number are present
    fn is_configured(&self) -> bool;

    /// Attempt delivery of one text message. Same result contract as the
    /// email transport.
    async fn send(&self, to: &str, message: &str) -> Result<bool>;
}

/// HTTP implementation against the WhatsApp Business Cloud API
pub struct HttpWhatsAppTransport {
    http_client: Client,
    api_url: String,
    access_token: Option<String>,
    phone_number_id: Option<String>,
}

impl HttpWhatsAppTransport {
    pub fn new(
        api_url: String,
        access_token: Option<String>,
        phone_number_id: Option<String>,
    ) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            api_url,
            access_token,
            phone_number_id,
        }
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    message_type: &'static str,
    text: TextBody<'a>,
}

#[derive(Debug, Serialize)]
struct TextBody<'a> {
    body: &'a str,
}

#[async_trait]
impl WhatsAppTransport for HttpWhatsAppTransport {
    fn is_configured(&self) -> bool {
        self.access_token.is_some() && self.phone_number_id.is_some()
    }

    async fn send(&self, to: &str, message: &str) -> Result<bool> {
        let (Some(access_token), Some(phone_number_id)) =
            (self.access_token.as_deref(), self.phone_number_id.as_deref())
        else {
            return Err(Error::Config(
                "WhatsApp transport not configured".to_string(),
            ));
        };

        debug!(to, "Sending WhatsApp message");

        let response = self
            .http_client
            .post(format!("{}/{}/messages", self.api_url, phone_number_id))
            .bearer_auth(access_token)
            .json(&SendMessageRequest {
                messaging_product: "whatsapp",
                to,
                message_type: "text",
                text: TextBody { body: message },
            })
            .send()
            .await
            .map_err(|e| Error::Transport(format!("whatsapp request failed: {e}")))?;

        if response.status().is_success() {
            Ok(true)
        } else {
            warn!(to, status = %response.status(), "WhatsApp API declined message");
            Ok(false)
        }
    }
}

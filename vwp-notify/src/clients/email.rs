//! Email transport client
//!
//! Delivers notification emails through the transactional email HTTP API.
//! An unconfigured transport is a valid state: sends short-circuit to a
//! non-delivery result instead of erroring.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};
use vwp_common::{Error, Result};

/// Default timeout for email API requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Outbound email delivery
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// Whether credentials are present
    fn is_configured(&self) -> bool;

    /// Attempt delivery of one message. `Ok(true)` means the API accepted
    /// it; `Ok(false)` means it was declined or the transport is
    /// unconfigured; `Err` is a transport-level failure.
    async fn send(&self, to: &str, subject: &str, html: &str, text: &str) -> Result<bool>;
}

/// HTTP implementation against the transactional email API
pub struct HttpEmailTransport {
    http_client: Client,
    api_url: String,
    api_key: Option<String>,
    from: String,
}

impl HttpEmailTransport {
    pub fn new(api_url: String, api_key: Option<String>, from: String) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            api_url,
            api_key,
            from,
        }
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[async_trait]
impl EmailTransport for HttpEmailTransport {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn send(&self, to: &str, subject: &str, html: &str, text: &str) -> Result<bool> {
        let Some(api_key) = self.api_key.as_deref() else {
            info!("Email transport not configured, skipping send");
            return Ok(false);
        };

        debug!(to, subject, "Sending email");

        let response = self
            .http_client
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(api_key)
            .json(&SendEmailRequest {
                from: &self.from,
                to: [to],
                subject,
                html,
                text,
            })
            .send()
            .await
            .map_err(|e| Error::Transport(format!("email request failed: {e}")))?;

        if response.status().is_success() {
            Ok(true)
        } else {
            warn!(to, status = %response.status(), "Email API declined message");
            Ok(false)
        }
    }
}

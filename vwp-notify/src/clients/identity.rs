//! Identity provider client
//!
//! Platform accounts live in a managed identity service; this client
//! fetches user profiles (name, email addresses, phone numbers) from its
//! REST API. Contact data on the profile is ordered, primary entry first.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use vwp_common::{Error, Result};

/// Default timeout for identity API requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Read access to identity provider user records
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Fetch one user profile. Errors are per-call; callers decide whether
    /// a failed lookup is fatal for their scope.
    async fn get_user(&self, user_id: &str) -> Result<IdentityUser>;
}

/// User profile as exposed to the rest of the service
#[derive(Debug, Clone)]
pub struct IdentityUser {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Registered email addresses, primary first
    pub email_addresses: Vec<String>,
    /// Registered phone numbers, primary first
    pub phone_numbers: Vec<String>,
}

impl IdentityUser {
    /// Primary (first registered) email address
    pub fn primary_email(&self) -> Option<&str> {
        self.email_addresses.first().map(String::as_str)
    }

    /// Primary (first registered) phone number
    pub fn primary_phone(&self) -> Option<&str> {
        self.phone_numbers.first().map(String::as_str)
    }
}

/// HTTP implementation against the identity service REST API
pub struct HttpIdentityProvider {
    http_client: Client,
    api_url: String,
    secret_key: Option<String>,
}

impl HttpIdentityProvider {
    /// Create a new client. A missing secret key is allowed at construction
    /// time; calls will fail with a configuration error instead.
    pub fn new(api_url: String, secret_key: Option<String>) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            api_url,
            secret_key,
        }
    }
}

/// Wire shape of the provider's user resource
#[derive(Debug, Deserialize)]
struct WireUser {
    id: String,
    first_name: Option<String>,
    last_name: Option<String>,
    #[serde(default)]
    email_addresses: Vec<WireEmailAddress>,
    #[serde(default)]
    phone_numbers: Vec<WirePhoneNumber>,
}

#[derive(Debug, Deserialize)]
struct WireEmailAddress {
    email_address: String,
}

#[derive(Debug, Deserialize)]
struct WirePhoneNumber {
    phone_number: String,
}

impl From<WireUser> for IdentityUser {
    fn from(user: WireUser) -> Self {
        IdentityUser {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email_addresses: user
                .email_addresses
                .into_iter()
                .map(|e| e.email_address)
                .collect(),
            phone_numbers: user
                .phone_numbers
                .into_iter()
                .map(|p| p.phone_number)
                .collect(),
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn get_user(&self, user_id: &str) -> Result<IdentityUser> {
        let secret_key = self
            .secret_key
            .as_deref()
            .ok_or_else(|| Error::Config("identity provider secret key not configured".to_string()))?;

        debug!(user_id, "Fetching user profile from identity provider");

        let response = self
            .http_client
            .get(format!("{}/users/{}", self.api_url, user_id))
            .bearer_auth(secret_key)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("identity request failed: {e}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("user {user_id}")));
        }
        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "identity provider returned {} for user {user_id}",
                response.status()
            )));
        }

        let wire: WireUser = response
            .json()
            .await
            .map_err(|e| Error::Transport(format!("failed to parse identity response: {e}")))?;

        Ok(wire.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_user_maps_ordered_contact_data() {
        let wire: WireUser = serde_json::from_str(
            r#"{
                "id": "user_2b7f",
                "first_name": "Jan",
                "last_name": "de Vries",
                "email_addresses": [
                    {"email_address": "jan@aannemer.nl"},
                    {"email_address": "jan.prive@example.com"}
                ],
                "phone_numbers": [{"phone_number": "+31612345678"}]
            }"#,
        )
        .unwrap();

        let user: IdentityUser = wire.into();
        assert_eq!(user.primary_email(), Some("jan@aannemer.nl"));
        assert_eq!(user.primary_phone(), Some("+31612345678"));
    }

    #[test]
    fn wire_user_tolerates_missing_contact_arrays() {
        let wire: WireUser =
            serde_json::from_str(r#"{"id": "user_9", "first_name": null, "last_name": null}"#)
                .unwrap();
        let user: IdentityUser = wire.into();
        assert_eq!(user.primary_email(), None);
        assert_eq!(user.primary_phone(), None);
    }
}

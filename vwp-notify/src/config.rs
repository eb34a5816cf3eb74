//! Service configuration
//!
//! Loaded from `notify.toml` inside the platform root folder, then
//! overridden by environment variables so deployments can inject transport
//! credentials without touching the file. Missing file or credentials are
//! not errors: unconfigured transports simply disable their channel.

use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Notification service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// HTTP bind host
    pub host: String,
    /// HTTP bind port
    pub port: u16,
    /// Base URL of the web application, used for deep links in messages
    pub app_base_url: String,
    pub identity: IdentityConfig,
    pub email: EmailConfig,
    pub whatsapp: WhatsAppConfig,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5741,
            app_base_url: "http://localhost:3000".to_string(),
            identity: IdentityConfig::default(),
            email: EmailConfig::default(),
            whatsapp: WhatsAppConfig::default(),
        }
    }
}

/// Identity provider (managed auth) API access
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub api_url: String,
    pub secret_key: Option<String>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.clerk.com/v1".to_string(),
            secret_key: None,
        }
    }
}

/// Transactional email API access
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    /// Sender shown on outbound mail
    pub from: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.resend.com".to_string(),
            api_key: None,
            from: "VeiligWerk <meldingen@veiligwerk.nl>".to_string(),
        }
    }
}

/// WhatsApp Business Cloud API access
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WhatsAppConfig {
    pub api_url: String,
    pub access_token: Option<String>,
    pub phone_number_id: Option<String>,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            api_url: "https://graph.facebook.com/v19.0".to_string(),
            access_token: None,
            phone_number_id: None,
        }
    }
}

impl WhatsAppConfig {
    /// Both credentials must be present for the channel to be usable
    pub fn is_configured(&self) -> bool {
        self.access_token.is_some() && self.phone_number_id.is_some()
    }
}

impl NotifyConfig {
    /// Load configuration from `<root_folder>/notify.toml` with environment
    /// overrides applied on top. Never fails: a missing or malformed file
    /// falls back to defaults with a log line.
    pub fn load(root_folder: &Path) -> Self {
        let path = root_folder.join("notify.toml");
        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<NotifyConfig>(&content) {
                Ok(config) => {
                    info!("Loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse {}: {} (using defaults)",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(_) => {
                info!("No notify.toml at {} (using defaults)", path.display());
                Self::default()
            }
        };
        config.apply_env_overrides();
        config
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("VWP_NOTIFY_PORT") {
            match v.parse() {
                Ok(port) => self.port = port,
                Err(_) => warn!("Ignoring non-numeric VWP_NOTIFY_PORT: {v}"),
            }
        }
        if let Ok(v) = std::env::var("VWP_APP_BASE_URL") {
            self.app_base_url = v;
        }
        if let Ok(v) = std::env::var("VWP_IDENTITY_SECRET_KEY") {
            self.identity.secret_key = Some(v);
        }
        if let Ok(v) = std::env::var("VWP_EMAIL_API_KEY") {
            self.email.api_key = Some(v);
        }
        if let Ok(v) = std::env::var("VWP_EMAIL_FROM") {
            self.email.from = v;
        }
        if let Ok(v) = std::env::var("VWP_WHATSAPP_ACCESS_TOKEN") {
            self.whatsapp.access_token = Some(v);
        }
        if let Ok(v) = std::env::var("VWP_WHATSAPP_PHONE_NUMBER_ID") {
            self.whatsapp.phone_number_id = Some(v);
        }
    }
}

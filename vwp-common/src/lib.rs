//! # VeiligWerk Common Library
//!
//! Shared code for VeiligWerk platform services including:
//! - Database pool initialization and schema
//! - Domain models (notification rules, channels, recipient descriptors)
//! - Incident event payloads exchanged between services
//! - Configuration loading
//! - Common error types

pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod models;

pub use error::{Error, Result};
pub use events::{IncidentEvent, Severity};
pub use models::{Channel, Notification, NotificationRule, RecipientDescriptor, RuleFilter};

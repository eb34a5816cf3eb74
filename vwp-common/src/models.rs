//! Shared domain models for notification configuration and storage

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::events::Severity;

/// Delivery channel for a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Whatsapp,
    InApp,
}

impl Channel {
    /// Wire/display name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Whatsapp => "whatsapp",
            Channel::InApp => "in_app",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who a notification rule addresses.
///
/// Persisted as a `recipient_type` tag plus a `recipient_id` string; parsed
/// into a closed variant so team/organization ids are numeric from load
/// onward and invalid tags are rejected at load, not at dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientDescriptor {
    /// A single platform account
    User { user_id: String },
    /// Every active member of one project
    Team { project_id: i64 },
    /// Every active member of one organization
    Organization { organization_id: i64 },
}

impl RecipientDescriptor {
    /// Parse the persisted `recipient_type` / `recipient_id` column pair.
    pub fn parse(recipient_type: &str, recipient_id: &str) -> Result<Self, Error> {
        match recipient_type {
            "user" => Ok(RecipientDescriptor::User {
                user_id: recipient_id.to_string(),
            }),
            "team" => {
                let project_id = recipient_id.parse().map_err(|_| {
                    Error::InvalidInput(format!("team recipient id is not numeric: {recipient_id}"))
                })?;
                Ok(RecipientDescriptor::Team { project_id })
            }
            "organization" => {
                let organization_id = recipient_id.parse().map_err(|_| {
                    Error::InvalidInput(format!(
                        "organization recipient id is not numeric: {recipient_id}"
                    ))
                })?;
                Ok(RecipientDescriptor::Organization { organization_id })
            }
            other => Err(Error::InvalidInput(format!(
                "unknown recipient type: {other}"
            ))),
        }
    }
}

/// Soft filter dimensions of a notification rule.
///
/// An empty set / unset field means "match all" for that dimension. Stored
/// as a JSON column written by the admin screens, hence the camelCase field
/// names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleFilter {
    pub severity: BTreeSet<Severity>,
    pub category: BTreeSet<String>,
    pub discipline: BTreeSet<String>,
    pub organization_id: Option<i64>,
    pub project_id: Option<i64>,
}

impl RuleFilter {
    /// True when no dimension constrains anything (matches every incident)
    pub fn is_empty(&self) -> bool {
        self.severity.is_empty()
            && self.category.is_empty()
            && self.discipline.is_empty()
            && self.organization_id.is_none()
            && self.project_id.is_none()
    }
}

/// A validated notification rule.
///
/// Administrator-managed configuration; read-only to the dispatch engine.
/// Rows that fail validation never become a `NotificationRule`.
#[derive(Debug, Clone)]
pub struct NotificationRule {
    pub id: i64,
    pub name: String,
    pub recipient: RecipientDescriptor,
    pub channels: BTreeSet<Channel>,
    pub filter: RuleFilter,
    /// Hard tenant scope. When set, the rule only ever applies to incidents
    /// of this organization, regardless of the soft filter.
    pub organization_id: Option<i64>,
    pub enabled: bool,
}

/// Persisted in-app notification row.
///
/// Written once by the dispatch engine; the web UI reads it and flips the
/// read flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: String,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub incident_id: Option<i64>,
    pub read: bool,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_wire_names() {
        assert_eq!(serde_json::to_string(&Channel::InApp).unwrap(), "\"in_app\"");
        assert_eq!(
            serde_json::from_str::<Channel>("\"whatsapp\"").unwrap(),
            Channel::Whatsapp
        );
    }

    #[test]
    fn recipient_descriptor_parses_all_tags() {
        assert_eq!(
            RecipientDescriptor::parse("user", "user_2b7f").unwrap(),
            RecipientDescriptor::User {
                user_id: "user_2b7f".to_string()
            }
        );
        assert_eq!(
            RecipientDescriptor::parse("team", "17").unwrap(),
            RecipientDescriptor::Team { project_id: 17 }
        );
        assert_eq!(
            RecipientDescriptor::parse("organization", "3").unwrap(),
            RecipientDescriptor::Organization { organization_id: 3 }
        );
    }

    #[test]
    fn recipient_descriptor_rejects_bad_rows() {
        assert!(RecipientDescriptor::parse("group", "1").is_err());
        assert!(RecipientDescriptor::parse("team", "not-a-number").is_err());
        assert!(RecipientDescriptor::parse("organization", "").is_err());
    }

    #[test]
    fn rule_filter_defaults_to_match_all() {
        let filter: RuleFilter = serde_json::from_str("{}").unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn rule_filter_parses_admin_payload() {
        let filter: RuleFilter = serde_json::from_str(
            r#"{"severity": ["critical", "high"], "organizationId": 3}"#,
        )
        .unwrap();
        assert!(filter.severity.contains(&Severity::Critical));
        assert!(filter.severity.contains(&Severity::High));
        assert_eq!(filter.organization_id, Some(3));
        assert!(filter.category.is_empty());
        assert!(!filter.is_empty());
    }
}

//! Notification rule loading
//!
//! Rules are administrator-managed rows; this service only reads them.
//! Validation happens here, at load time: a row whose recipient, channel,
//! or filter columns fail to parse is skipped with a warning instead of
//! poisoning the dispatch it was loaded for.

use std::collections::BTreeSet;

use sqlx::{Pool, Sqlite};
use tracing::warn;
use vwp_common::{Channel, Error, NotificationRule, RecipientDescriptor, Result, RuleFilter};

type RuleRow = (i64, String, String, String, String, String, Option<i64>);

/// Load every enabled rule, dropping rows that fail validation
pub async fn list_enabled_rules(db: &Pool<Sqlite>) -> Result<Vec<NotificationRule>> {
    let rows = sqlx::query_as::<_, RuleRow>(
        "SELECT id, name, recipient_type, recipient_id, channels, filter, organization_id \
         FROM notification_rules WHERE enabled = 1",
    )
    .fetch_all(db)
    .await?;

    let mut rules = Vec::with_capacity(rows.len());
    for row in rows {
        let rule_id = row.0;
        match parse_rule_row(row) {
            Ok(rule) => rules.push(rule),
            Err(e) => warn!(rule_id, error = %e, "Skipping malformed notification rule"),
        }
    }
    Ok(rules)
}

fn parse_rule_row(
    (id, name, recipient_type, recipient_id, channels, filter, organization_id): RuleRow,
) -> Result<NotificationRule> {
    let recipient = RecipientDescriptor::parse(&recipient_type, &recipient_id)?;

    let channels: BTreeSet<Channel> = serde_json::from_str(&channels)
        .map_err(|e| Error::InvalidInput(format!("channels column: {e}")))?;
    if channels.is_empty() {
        return Err(Error::InvalidInput("rule has no channels".to_string()));
    }

    let filter: RuleFilter = serde_json::from_str(&filter)
        .map_err(|e| Error::InvalidInput(format!("filter column: {e}")))?;

    Ok(NotificationRule {
        id,
        name,
        recipient,
        channels,
        filter,
        organization_id,
        enabled: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        recipient_type: &str,
        recipient_id: &str,
        channels: &str,
        filter: &str,
    ) -> RuleRow {
        (
            1,
            "rule".to_string(),
            recipient_type.to_string(),
            recipient_id.to_string(),
            channels.to_string(),
            filter.to_string(),
            None,
        )
    }

    #[test]
    fn parses_valid_row() {
        let rule = parse_rule_row(row(
            "organization",
            "3",
            r#"["email", "in_app"]"#,
            r#"{"severity": ["critical"]}"#,
        ))
        .unwrap();

        assert_eq!(
            rule.recipient,
            RecipientDescriptor::Organization { organization_id: 3 }
        );
        assert!(rule.channels.contains(&Channel::Email));
        assert!(rule.channels.contains(&Channel::InApp));
        assert!(!rule.filter.is_empty());
    }

    #[test]
    fn rejects_unknown_recipient_type() {
        assert!(parse_rule_row(row("group", "3", r#"["email"]"#, "{}")).is_err());
    }

    #[test]
    fn rejects_non_numeric_team_id() {
        assert!(parse_rule_row(row("team", "abc", r#"["email"]"#, "{}")).is_err());
    }

    #[test]
    fn rejects_malformed_channels() {
        assert!(parse_rule_row(row("user", "u1", "email", "{}")).is_err());
        assert!(parse_rule_row(row("user", "u1", "[]", "{}")).is_err());
    }

    #[test]
    fn rejects_malformed_filter() {
        assert!(parse_rule_row(row("user", "u1", r#"["email"]"#, "not json")).is_err());
    }
}

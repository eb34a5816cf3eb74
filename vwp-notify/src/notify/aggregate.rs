//! Recipient aggregation
//!
//! Merges per-rule resolution results into one deduplicated recipient map
//! keyed by identity id. A recipient reached by several matching rules
//! appears once, with the union of every channel those rules grant.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;
use vwp_common::{Channel, IncidentEvent, NotificationRule};

use crate::notify::resolve::{self, ContactCache};
use crate::AppState;

/// One deliverable recipient: an identity plus the union of every channel
/// granted by the rules that resolved to it
#[derive(Debug, Clone)]
pub struct ResolvedRecipient {
    pub user_id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub channels: BTreeSet<Channel>,
}

/// Resolve every matched rule and union the results.
///
/// Set-union semantics make this idempotent: feeding the same rule set in
/// twice yields the same map, so no channel is attempted twice for one
/// recipient within a dispatch.
pub async fn aggregate_recipients(
    state: &AppState,
    incident: &IncidentEvent,
    rules: &[&NotificationRule],
) -> HashMap<String, ResolvedRecipient> {
    let mut recipients: HashMap<String, ResolvedRecipient> = HashMap::new();
    let mut cache = ContactCache::new();

    for rule in rules {
        debug!(
            incident_id = incident.id,
            rule_id = rule.id,
            rule = %rule.name,
            "Resolving rule recipients"
        );

        let contacts = resolve::resolve_rule_recipients(state, rule, &mut cache).await;
        for contact in contacts {
            let entry = recipients
                .entry(contact.user_id.clone())
                .or_insert_with(|| ResolvedRecipient {
                    user_id: contact.user_id.clone(),
                    email: contact.email.clone(),
                    phone: contact.phone.clone(),
                    channels: BTreeSet::new(),
                });
            entry.channels.extend(rule.channels.iter().copied());
        }
    }

    recipients
}

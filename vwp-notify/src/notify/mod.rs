//! Notification rule-matching and dispatch engine
//!
//! Single-pass pipeline per incident event:
//! load enabled rules → match filters → resolve and enrich recipients →
//! aggregate into one deduplicated recipient set → deliver per channel.
//!
//! Aggregation always completes before the first delivery attempt, so the
//! channel-set union is final when sends begin and no recipient is
//! contacted twice for the same rule set.

pub mod aggregate;
pub mod dispatch;
pub mod filter;
pub mod resolve;
pub mod templates;

pub use aggregate::ResolvedRecipient;

use tracing::{error, info};
use vwp_common::IncidentEvent;

use crate::AppState;

/// Evaluate every enabled rule against `incident` and deliver across all
/// requested channels.
///
/// Best-effort by contract: this never returns an error, and every
/// delivery failure surfaces only in logs. Callers (the HTTP handler, or
/// anything embedding the engine) cannot be failed by it.
pub async fn notify_incident(state: &AppState, incident: &IncidentEvent) {
    let rules = match crate::db::list_enabled_rules(&state.db).await {
        Ok(rules) => rules,
        Err(e) => {
            error!(incident_id = incident.id, error = %e, "Failed to load notification rules");
            return;
        }
    };

    let matching: Vec<_> = rules
        .iter()
        .filter(|rule| filter::rule_matches(rule, incident))
        .collect();

    if matching.is_empty() {
        info!(incident_id = incident.id, "No notification rules match incident");
        return;
    }

    info!(
        incident_id = incident.id,
        matched = matching.len(),
        "Resolving recipients for matched rules"
    );

    let recipients = aggregate::aggregate_recipients(state, incident, &matching).await;
    if recipients.is_empty() {
        info!(
            incident_id = incident.id,
            "Matched rules resolved to no recipients"
        );
        return;
    }

    dispatch::dispatch_all(state, incident, recipients).await;
}

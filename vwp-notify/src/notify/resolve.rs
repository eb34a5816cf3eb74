//! Recipient resolution and contact enrichment
//!
//! Expands a rule's recipient descriptor into concrete member identities,
//! then enriches each identity with per-channel delivery addresses.
//! Failures shrink the result instead of aborting it: a membership query
//! that errors yields no members for that rule, and a member whose profile
//! fetch fails is skipped while the rest proceed.

use std::collections::HashMap;

use tracing::warn;
use vwp_common::{NotificationRule, RecipientDescriptor};

use crate::clients::IdentityUser;
use crate::AppState;

/// Delivery addresses for one resolved identity
#[derive(Debug, Clone)]
pub struct ResolvedContact {
    pub user_id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Per-dispatch cache of enrichment results keyed by user id.
///
/// Failed lookups are cached too (as `None`) so an identity resolved by
/// several rules is fetched from the provider exactly once per dispatch.
pub type ContactCache = HashMap<String, Option<ResolvedContact>>;

/// Expand one rule's recipient descriptor into enriched contacts
pub async fn resolve_rule_recipients(
    state: &AppState,
    rule: &NotificationRule,
    cache: &mut ContactCache,
) -> Vec<ResolvedContact> {
    let user_ids = match &rule.recipient {
        RecipientDescriptor::User { user_id } => vec![user_id.clone()],
        RecipientDescriptor::Team { project_id } => {
            match crate::db::list_active_project_members(&state.db, *project_id).await {
                Ok(ids) => ids,
                Err(e) => {
                    warn!(
                        rule_id = rule.id,
                        project_id,
                        error = %e,
                        "Failed to list project members"
                    );
                    Vec::new()
                }
            }
        }
        RecipientDescriptor::Organization { organization_id } => {
            match crate::db::list_active_org_members(&state.db, *organization_id).await {
                Ok(ids) => ids,
                Err(e) => {
                    warn!(
                        rule_id = rule.id,
                        organization_id,
                        error = %e,
                        "Failed to list organization members"
                    );
                    Vec::new()
                }
            }
        }
    };

    let mut contacts = Vec::with_capacity(user_ids.len());
    for user_id in user_ids {
        if let Some(contact) = enrich_cached(state, &user_id, cache).await {
            contacts.push(contact);
        }
    }
    contacts
}

async fn enrich_cached(
    state: &AppState,
    user_id: &str,
    cache: &mut ContactCache,
) -> Option<ResolvedContact> {
    if let Some(hit) = cache.get(user_id) {
        return hit.clone();
    }
    let contact = enrich_contact(state, user_id).await;
    cache.insert(user_id.to_string(), contact.clone());
    contact
}

/// One identity-provider fetch per identity.
///
/// A failed fetch drops the identity from this dispatch entirely: without
/// a profile there is no account to address on any channel.
async fn enrich_contact(state: &AppState, user_id: &str) -> Option<ResolvedContact> {
    let user = match state.identity.get_user(user_id).await {
        Ok(user) => user,
        Err(e) => {
            warn!(user_id, error = %e, "Identity lookup failed, skipping recipient");
            return None;
        }
    };

    let phone = lookup_phone(state, user_id, &user).await;

    Some(ResolvedContact {
        user_id: user_id.to_string(),
        email: user.primary_email().map(str::to_string),
        phone,
    })
}

/// Phone lookup strategies in priority order.
///
/// The override store predates provider-native phone numbers and still
/// wins when a row exists; the provider's primary number is the fallback.
/// An override-store error degrades to the fallback rather than losing the
/// channel.
async fn lookup_phone(state: &AppState, user_id: &str, user: &IdentityUser) -> Option<String> {
    match crate::db::get_override_phone(&state.db, user_id).await {
        Ok(Some(phone)) => return Some(phone),
        Ok(None) => {}
        Err(e) => {
            warn!(user_id, error = %e, "Phone override lookup failed, falling back to provider");
        }
    }
    user.primary_phone().map(str::to_string)
}

//! Multi-channel delivery
//!
//! Fire-once, best-effort. All recipients are dispatched concurrently;
//! within one recipient the channel attempts run concurrently as well.
//! Every failure is contained at channel scope and logged with incident,
//! recipient, and channel context. Nothing here retries and nothing
//! propagates.

use std::collections::HashMap;

use futures::future::join_all;
use tracing::{debug, info, warn};
use vwp_common::{Channel, IncidentEvent};

use crate::notify::aggregate::ResolvedRecipient;
use crate::notify::templates;
use crate::AppState;

/// Kind tag stored on in-app rows written by this engine
const INCIDENT_KIND: &str = "incident";

/// Deliver to every aggregated recipient
pub async fn dispatch_all(
    state: &AppState,
    incident: &IncidentEvent,
    recipients: HashMap<String, ResolvedRecipient>,
) {
    let total = recipients.len();
    join_all(
        recipients
            .into_values()
            .map(|recipient| dispatch_recipient(state, incident, recipient)),
    )
    .await;

    info!(
        incident_id = incident.id,
        recipients = total,
        "Notification dispatch complete"
    );
}

async fn dispatch_recipient(
    state: &AppState,
    incident: &IncidentEvent,
    recipient: ResolvedRecipient,
) {
    tokio::join!(
        deliver_in_app(state, incident, &recipient),
        deliver_email(state, incident, &recipient),
        deliver_whatsapp(state, incident, &recipient),
    );
}

async fn deliver_in_app(state: &AppState, incident: &IncidentEvent, recipient: &ResolvedRecipient) {
    if !recipient.channels.contains(&Channel::InApp) {
        return;
    }

    let title = templates::in_app_title(incident);
    let message = templates::in_app_message(incident);

    match crate::db::insert_notification(
        &state.db,
        &recipient.user_id,
        INCIDENT_KIND,
        &title,
        &message,
        incident.id,
    )
    .await
    {
        Ok(()) => debug!(
            incident_id = incident.id,
            user_id = %recipient.user_id,
            channel = "in_app",
            "Stored in-app notification"
        ),
        Err(e) => warn!(
            incident_id = incident.id,
            user_id = %recipient.user_id,
            channel = "in_app",
            error = %e,
            "Failed to store in-app notification"
        ),
    }
}

async fn deliver_email(state: &AppState, incident: &IncidentEvent, recipient: &ResolvedRecipient) {
    if !recipient.channels.contains(&Channel::Email) {
        return;
    }
    let Some(email) = recipient.email.as_deref() else {
        debug!(
            incident_id = incident.id,
            user_id = %recipient.user_id,
            channel = "email",
            "Recipient has no email address, skipping channel"
        );
        return;
    };

    let subject = templates::email_subject(incident);
    let html = templates::email_html(incident, &state.config.app_base_url);
    let text = templates::email_text(incident, &state.config.app_base_url);

    match state.mailer.send(email, &subject, &html, &text).await {
        Ok(true) => debug!(
            incident_id = incident.id,
            user_id = %recipient.user_id,
            channel = "email",
            "Email accepted by transport"
        ),
        Ok(false) => warn!(
            incident_id = incident.id,
            user_id = %recipient.user_id,
            channel = "email",
            "Email transport declined message"
        ),
        Err(e) => warn!(
            incident_id = incident.id,
            user_id = %recipient.user_id,
            channel = "email",
            error = %e,
            "Email delivery failed"
        ),
    }
}

async fn deliver_whatsapp(
    state: &AppState,
    incident: &IncidentEvent,
    recipient: &ResolvedRecipient,
) {
    if !recipient.channels.contains(&Channel::Whatsapp) {
        return;
    }
    if !state.whatsapp.is_configured() {
        debug!(
            incident_id = incident.id,
            user_id = %recipient.user_id,
            channel = "whatsapp",
            "WhatsApp transport not configured, skipping channel"
        );
        return;
    }
    let Some(phone) = recipient.phone.as_deref() else {
        debug!(
            incident_id = incident.id,
            user_id = %recipient.user_id,
            channel = "whatsapp",
            "Recipient has no phone number, skipping channel"
        );
        return;
    };

    let message = templates::whatsapp_message(incident, &state.config.app_base_url);

    match state.whatsapp.send(phone, &message).await {
        Ok(true) => debug!(
            incident_id = incident.id,
            user_id = %recipient.user_id,
            channel = "whatsapp",
            "WhatsApp message accepted by transport"
        ),
        Ok(false) => warn!(
            incident_id = incident.id,
            user_id = %recipient.user_id,
            channel = "whatsapp",
            "WhatsApp transport declined message"
        ),
        Err(e) => warn!(
            incident_id = incident.id,
            user_id = %recipient.user_id,
            channel = "whatsapp",
            error = %e,
            "WhatsApp delivery failed"
        ),
    }
}

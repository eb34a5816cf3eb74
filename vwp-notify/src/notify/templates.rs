//! Message templates
//!
//! Presentation only: fixed strings parameterized by incident title, code,
//! location, and the deep link into the web application.

use vwp_common::IncidentEvent;

/// Deep link to the incident detail view
pub fn incident_url(app_base_url: &str, incident_id: i64) -> String {
    format!(
        "{}/incidenten/{}",
        app_base_url.trim_end_matches('/'),
        incident_id
    )
}

fn location_suffix(incident: &IncidentEvent) -> String {
    match &incident.location {
        Some(location) => format!(" op locatie {location}"),
        None => String::new(),
    }
}

pub fn in_app_title(incident: &IncidentEvent) -> String {
    format!("Nieuw incident: {}", incident.title)
}

pub fn in_app_message(incident: &IncidentEvent) -> String {
    format!(
        "Incident {} is gemeld{}.",
        incident.incident_code,
        location_suffix(incident)
    )
}

pub fn email_subject(incident: &IncidentEvent) -> String {
    format!("[{}] Nieuw incident: {}", incident.incident_code, incident.title)
}

pub fn email_html(incident: &IncidentEvent, app_base_url: &str) -> String {
    let url = incident_url(app_base_url, incident.id);
    let location = incident
        .location
        .as_deref()
        .unwrap_or("niet opgegeven");
    format!(
        "<h2>Nieuw incident gemeld</h2>\
         <p><strong>{}</strong> ({})</p>\
         <ul>\
         <li>Ernst: {}</li>\
         <li>Categorie: {}</li>\
         <li>Locatie: {}</li>\
         </ul>\
         <p><a href=\"{}\">Bekijk het incident</a></p>",
        incident.title, incident.incident_code, incident.severity, incident.category, location, url
    )
}

pub fn email_text(incident: &IncidentEvent, app_base_url: &str) -> String {
    let url = incident_url(app_base_url, incident.id);
    let location = incident
        .location
        .as_deref()
        .unwrap_or("niet opgegeven");
    format!(
        "Nieuw incident gemeld\n\n\
         {} ({})\n\
         Ernst: {}\n\
         Categorie: {}\n\
         Locatie: {}\n\n\
         Bekijk het incident: {}",
        incident.title, incident.incident_code, incident.severity, incident.category, location, url
    )
}

pub fn whatsapp_message(incident: &IncidentEvent, app_base_url: &str) -> String {
    format!(
        "Nieuw incident {}: {}{}\n{}",
        incident.incident_code,
        incident.title,
        location_suffix(incident),
        incident_url(app_base_url, incident.id)
    )
}

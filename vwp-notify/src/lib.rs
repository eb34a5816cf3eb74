//! vwp-notify library - Notification Dispatch module
//!
//! Evaluates administrator-managed notification rules against incident
//! events and fans delivery out across in-app, email, and WhatsApp
//! channels. Invoked by the incident service over HTTP; delivery itself is
//! best-effort and never reported back to the caller.

use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;

pub mod api;
pub mod clients;
pub mod config;
pub mod db;
pub mod error;
pub mod notify;

use clients::{EmailTransport, IdentityProvider, WhatsAppTransport};
use config::NotifyConfig;

/// Application state shared across HTTP handlers and the dispatch engine
#[derive(Clone)]
pub struct AppState {
    /// Platform database connection pool
    pub db: SqlitePool,
    /// Service configuration
    pub config: Arc<NotifyConfig>,
    /// Identity provider client (user profiles, contact data)
    pub identity: Arc<dyn IdentityProvider>,
    /// Outbound email transport
    pub mailer: Arc<dyn EmailTransport>,
    /// Outbound WhatsApp transport
    pub whatsapp: Arc<dyn WhatsAppTransport>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        db: SqlitePool,
        config: Arc<NotifyConfig>,
        identity: Arc<dyn IdentityProvider>,
        mailer: Arc<dyn EmailTransport>,
        whatsapp: Arc<dyn WhatsAppTransport>,
    ) -> Self {
        Self {
            db,
            config,
            identity,
            mailer,
            whatsapp,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::post;
    use tower_http::trace::TraceLayer;

    Router::new()
        .route("/notify/incident", post(api::accept_incident))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! vwp-notify - Notification Dispatch microservice
//!
//! Evaluates administrator-managed notification rules against incident
//! events posted by the incident service, and delivers across in-app,
//! email, and WhatsApp channels.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use vwp_notify::clients::{HttpEmailTransport, HttpIdentityProvider, HttpWhatsAppTransport};
use vwp_notify::config::NotifyConfig;
use vwp_notify::AppState;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "vwp-notify", about = "VeiligWerk notification dispatch service")]
struct Args {
    /// Platform root folder (overrides VWP_ROOT_FOLDER and the TOML config)
    #[arg(long)]
    root_folder: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting vwp-notify (Notification Dispatch) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();
    let root_folder =
        vwp_common::config::resolve_root_folder(args.root_folder.as_deref(), "VWP_ROOT_FOLDER");
    vwp_common::config::ensure_root_folder(&root_folder)?;

    let db_path = vwp_common::config::database_path(&root_folder);
    info!("Database: {}", db_path.display());
    let db = vwp_common::db::init_database(&db_path).await?;
    info!("Database connection established");

    let config = Arc::new(NotifyConfig::load(&root_folder));
    if config.identity.secret_key.is_none() {
        info!("Identity provider not configured; recipient enrichment will fail until it is");
    }
    if config.email.api_key.is_none() {
        info!("Email transport not configured, email channel disabled");
    }
    if !config.whatsapp.is_configured() {
        info!("WhatsApp transport not configured, whatsapp channel disabled");
    }

    let identity = Arc::new(HttpIdentityProvider::new(
        config.identity.api_url.clone(),
        config.identity.secret_key.clone(),
    ));
    let mailer = Arc::new(HttpEmailTransport::new(
        config.email.api_url.clone(),
        config.email.api_key.clone(),
        config.email.from.clone(),
    ));
    let whatsapp = Arc::new(HttpWhatsAppTransport::new(
        config.whatsapp.api_url.clone(),
        config.whatsapp.access_token.clone(),
        config.whatsapp.phone_number_id.clone(),
    ));

    let state = AppState::new(db, config.clone(), identity, mailer, whatsapp);
    let app = vwp_notify::build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

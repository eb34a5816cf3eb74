//! Database initialization
//!
//! Opens (or creates) the shared platform database and creates the tables
//! the notification service touches. Schema creation is idempotent, so
//! every service can call it at startup regardless of launch order.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // mode=rwc: read, write, create
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL allows concurrent readers with one writer, which matters while
    // parallel dispatch tasks insert notification rows
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_tables(&pool).await?;

    Ok(pool)
}

/// Create all tables used by the notification service (idempotent)
pub async fn create_tables(pool: &SqlitePool) -> Result<()> {
    // Administrator-managed dispatch rules. channels and filter are JSON
    // text written by the admin screens and validated at load time.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS notification_rules (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            name            TEXT NOT NULL,
            recipient_type  TEXT NOT NULL,
            recipient_id    TEXT NOT NULL,
            channels        TEXT NOT NULL,
            filter          TEXT NOT NULL DEFAULT '{}',
            organization_id INTEGER,
            enabled         INTEGER NOT NULL DEFAULT 1,
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    // In-app notification feed. Append-only from the dispatch engine; the
    // web UI flips the read flag.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS notifications (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     TEXT NOT NULL,
            kind        TEXT NOT NULL,
            title       TEXT NOT NULL,
            message     TEXT NOT NULL,
            incident_id INTEGER,
            read        INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Legacy per-user phone overrides. Predates provider-native phone
    // numbers and still wins over them when a row exists.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recipient_overrides (
            user_id TEXT PRIMARY KEY,
            phone   TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS project_members (
            project_id INTEGER NOT NULL,
            user_id    TEXT NOT NULL,
            status     TEXT NOT NULL DEFAULT 'active',
            PRIMARY KEY (project_id, user_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS organization_members (
            organization_id INTEGER NOT NULL,
            user_id         TEXT NOT NULL,
            status          TEXT NOT NULL DEFAULT 'active',
            PRIMARY KEY (organization_id, user_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_notifications_user ON notifications(user_id, read)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

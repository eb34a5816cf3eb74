//! In-app notification persistence

use sqlx::{Pool, Sqlite};
use vwp_common::Result;

/// Insert one in-app notification row (unread, timestamped now)
pub async fn insert_notification(
    db: &Pool<Sqlite>,
    user_id: &str,
    kind: &str,
    title: &str,
    message: &str,
    incident_id: i64,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO notifications (user_id, kind, title, message, incident_id, read, created_at) \
         VALUES (?, ?, ?, ?, ?, 0, ?)",
    )
    .bind(user_id)
    .bind(kind)
    .bind(title)
    .bind(message)
    .bind(incident_id)
    .bind(chrono::Utc::now().to_rfc3339())
    .execute(db)
    .await?;
    Ok(())
}

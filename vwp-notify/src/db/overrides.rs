//! Phone override store
//!
//! A legacy table keyed by user id that predates provider-native phone
//! numbers. When a row with a phone exists it wins over the identity
//! provider's data.

use sqlx::{Pool, Sqlite};
use vwp_common::Result;

/// Explicit phone override for a user, if one is stored
pub async fn get_override_phone(db: &Pool<Sqlite>, user_id: &str) -> Result<Option<String>> {
    let phone = sqlx::query_scalar::<_, Option<String>>(
        "SELECT phone FROM recipient_overrides WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    // No row and a row with NULL phone are the same: no override
    Ok(phone.flatten())
}

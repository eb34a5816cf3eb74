//! Membership store queries
//!
//! Memberships are owned by the project/organization services; this
//! service only reads them. Suspended and invited members never receive
//! notifications, so only `active` rows resolve.

use sqlx::{Pool, Sqlite};
use vwp_common::Result;

/// User ids of all active members of a project
pub async fn list_active_project_members(
    db: &Pool<Sqlite>,
    project_id: i64,
) -> Result<Vec<String>> {
    let ids = sqlx::query_scalar::<_, String>(
        "SELECT user_id FROM project_members WHERE project_id = ? AND status = 'active'",
    )
    .bind(project_id)
    .fetch_all(db)
    .await?;
    Ok(ids)
}

/// User ids of all active members of an organization
pub async fn list_active_org_members(
    db: &Pool<Sqlite>,
    organization_id: i64,
) -> Result<Vec<String>> {
    let ids = sqlx::query_scalar::<_, String>(
        "SELECT user_id FROM organization_members WHERE organization_id = ? AND status = 'active'",
    )
    .bind(organization_id)
    .fetch_all(db)
    .await?;
    Ok(ids)
}

//! Database queries for vwp-notify

pub mod memberships;
pub mod notifications;
pub mod overrides;
pub mod rules;

pub use memberships::{list_active_org_members, list_active_project_members};
pub use notifications::insert_notification;
pub use overrides::get_override_phone;
pub use rules::list_enabled_rules;

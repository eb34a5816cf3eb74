//! Shared test fixtures: in-memory database and fake collaborator clients

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use vwp_common::{Error, IncidentEvent, Result, Severity};
use vwp_notify::clients::{EmailTransport, IdentityProvider, IdentityUser, WhatsAppTransport};
use vwp_notify::config::NotifyConfig;
use vwp_notify::AppState;

/// In-memory identity provider with scriptable outages
#[derive(Default)]
pub struct FakeIdentity {
    users: HashMap<String, IdentityUser>,
    failing: HashSet<String>,
}

impl FakeIdentity {
    pub fn with_user(mut self, id: &str, email: Option<&str>, phone: Option<&str>) -> Self {
        self.users.insert(
            id.to_string(),
            IdentityUser {
                id: id.to_string(),
                first_name: None,
                last_name: None,
                email_addresses: email.into_iter().map(str::to_string).collect(),
                phone_numbers: phone.into_iter().map(str::to_string).collect(),
            },
        );
        self
    }

    /// Every lookup for this id errors, as if the provider were down
    pub fn with_failing(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn get_user(&self, user_id: &str) -> Result<IdentityUser> {
        if self.failing.contains(user_id) {
            return Err(Error::Transport(format!("simulated outage for {user_id}")));
        }
        self.users
            .get(user_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("user {user_id}")))
    }
}

/// Email transport that records every attempt and can fail per address
#[derive(Default)]
pub struct RecordingMailer {
    attempts: Mutex<Vec<(String, String)>>,
    fail_for: HashSet<String>,
}

impl RecordingMailer {
    pub fn failing_for(address: &str) -> Self {
        Self {
            attempts: Mutex::new(Vec::new()),
            fail_for: HashSet::from([address.to_string()]),
        }
    }

    /// Addresses of every send attempt, including failed ones
    pub fn attempted(&self) -> Vec<String> {
        self.attempts
            .lock()
            .unwrap()
            .iter()
            .map(|(to, _)| to.clone())
            .collect()
    }

    pub fn subjects(&self) -> Vec<String> {
        self.attempts
            .lock()
            .unwrap()
            .iter()
            .map(|(_, subject)| subject.clone())
            .collect()
    }
}

#[async_trait]
impl EmailTransport for RecordingMailer {
    fn is_configured(&self) -> bool {
        true
    }

    async fn send(&self, to: &str, subject: &str, _html: &str, _text: &str) -> Result<bool> {
        self.attempts
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string()));
        if self.fail_for.contains(to) {
            return Err(Error::Transport("simulated email outage".to_string()));
        }
        Ok(true)
    }
}

/// WhatsApp transport that records sends; configuration is scriptable
pub struct RecordingWhatsApp {
    configured: bool,
    sent: Mutex<Vec<(String, String)>>,
}

impl Default for RecordingWhatsApp {
    fn default() -> Self {
        Self {
            configured: true,
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingWhatsApp {
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Phone numbers of every delivered message
    pub fn sent_to(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(to, _)| to.clone())
            .collect()
    }
}

#[async_trait]
impl WhatsAppTransport for RecordingWhatsApp {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn send(&self, to: &str, message: &str) -> Result<bool> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), message.to_string()));
        Ok(true)
    }
}

/// Fresh in-memory state wired to the given fakes.
///
/// A single-connection pool keeps every query on the same in-memory
/// database.
pub async fn test_state(
    identity: FakeIdentity,
    mailer: Arc<RecordingMailer>,
    whatsapp: Arc<RecordingWhatsApp>,
) -> AppState {
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    vwp_common::db::create_tables(&db).await.unwrap();

    AppState::new(
        db,
        Arc::new(NotifyConfig::default()),
        Arc::new(identity),
        mailer,
        whatsapp,
    )
}

pub async fn insert_rule(
    db: &SqlitePool,
    name: &str,
    recipient_type: &str,
    recipient_id: &str,
    channels: &str,
    filter: &str,
    organization_id: Option<i64>,
) {
    sqlx::query(
        "INSERT INTO notification_rules \
         (name, recipient_type, recipient_id, channels, filter, organization_id, enabled) \
         VALUES (?, ?, ?, ?, ?, ?, 1)",
    )
    .bind(name)
    .bind(recipient_type)
    .bind(recipient_id)
    .bind(channels)
    .bind(filter)
    .bind(organization_id)
    .execute(db)
    .await
    .unwrap();
}

pub async fn insert_org_member(db: &SqlitePool, organization_id: i64, user_id: &str, status: &str) {
    sqlx::query(
        "INSERT INTO organization_members (organization_id, user_id, status) VALUES (?, ?, ?)",
    )
    .bind(organization_id)
    .bind(user_id)
    .bind(status)
    .execute(db)
    .await
    .unwrap();
}

pub async fn insert_project_member(db: &SqlitePool, project_id: i64, user_id: &str, status: &str) {
    sqlx::query("INSERT INTO project_members (project_id, user_id, status) VALUES (?, ?, ?)")
        .bind(project_id)
        .bind(user_id)
        .bind(status)
        .execute(db)
        .await
        .unwrap();
}

pub async fn set_override_phone(db: &SqlitePool, user_id: &str, phone: Option<&str>) {
    sqlx::query("INSERT OR REPLACE INTO recipient_overrides (user_id, phone) VALUES (?, ?)")
        .bind(user_id)
        .bind(phone)
        .execute(db)
        .await
        .unwrap();
}

/// All in-app notification rows as (user_id, title, incident_id)
pub async fn notification_rows(db: &SqlitePool) -> Vec<(String, String, i64)> {
    sqlx::query_as("SELECT user_id, title, incident_id FROM notifications ORDER BY user_id")
        .fetch_all(db)
        .await
        .unwrap()
}

/// The canonical test incident: critical excavation damage for tenant 3
pub fn critical_incident() -> IncidentEvent {
    IncidentEvent {
        id: 42,
        incident_code: "INC-2026-0042".to_string(),
        title: "Kabel geraakt bij graafwerk".to_string(),
        severity: Severity::Critical,
        category: "graafschade".to_string(),
        discipline: None,
        location: Some("Rijnstraat 8, Den Haag".to_string()),
        organization_id: Some(3),
        project_id: Some(17),
    }
}

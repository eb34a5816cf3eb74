//! Incident event payloads exchanged between VeiligWerk services
//!
//! The incident CRUD service posts an [`IncidentEvent`] to interested
//! services whenever an incident is created. The snapshot is immutable:
//! consumers never write back to it.

use serde::{Deserialize, Serialize};

/// Incident severity scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Wire/display name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable incident snapshot taken at creation time.
///
/// Field names follow the platform's JSON convention (camelCase) since this
/// payload crosses service boundaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentEvent {
    /// Numeric incident id (row id in the incident service)
    pub id: i64,
    /// Human-facing incident code, e.g. "INC-2026-0142"
    pub incident_code: String,
    /// Short incident title
    pub title: String,
    pub severity: Severity,
    /// Open category string, e.g. "graafschade"
    pub category: String,
    /// Discipline is optional; not every incident is tied to one
    #[serde(default)]
    pub discipline: Option<String>,
    /// Free-form location description
    #[serde(default)]
    pub location: Option<String>,
    /// Owning organization (tenant), when known
    #[serde(default)]
    pub organization_id: Option<i64>,
    /// Project the incident was reported under, when known
    #[serde(default)]
    pub project_id: Option<i64>,
}

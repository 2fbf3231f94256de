use std::cmp::Ordering;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// SEVERITY
// ============================================================================

/// Incident urgency. P1 is the most critical; `P1 > P2 > P3 > P4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    P1, // Critical: very high drift / data corruption
    P2, // Major
    P3, // Minor, noticeable
    P4, // Info, non-actionable
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::P1 => "P1",
            Severity::P2 => "P2",
            Severity::P3 => "P3",
            Severity::P4 => "P4",
        }
    }

    /// Higher is more urgent
    pub fn level(&self) -> u8 {
        match self {
            Severity::P1 => 4,
            Severity::P2 => 3,
            Severity::P3 => 2,
            Severity::P4 => 1,
        }
    }

    /// P4 never raises an incident
    pub fn is_actionable(&self) -> bool {
        *self != Severity::P4
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.level().cmp(&other.level())
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    #[default]
    Open,
    Mitigated,
    Resolved,
}

// ============================================================================
// INCIDENT RECORD
// ============================================================================

/// One line of the incident log. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
    /// UTC, second precision (serialized as `2025-11-22T00:00:00Z`)
    pub timestamp: DateTime<Utc>,
    pub incident_type: String,
    pub severity: Severity,
    /// Free-form metrics (drift_score, features, ...)
    pub details: Map<String, Value>,
    pub status: IncidentStatus,
    pub notes: String,
}

impl IncidentRecord {
    /// New open incident stamped with the current time
    pub fn new(incident_type: impl Into<String>, severity: Severity, details: Map<String, Value>) -> Self {
        Self {
            timestamp: Utc::now().trunc_subsecs(0),
            incident_type: incident_type.into(),
            severity,
            details,
            status: IncidentStatus::Open,
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// One-line operator acknowledgement
    pub fn summary_line(&self) -> String {
        format!(
            "{} | {} | {}",
            self.timestamp.format("%Y-%m-%dT%H:%M:%SZ"),
            self.incident_type,
            self.severity
        )
    }
}

//! Incident Module - Severity rules and the append-only incident log
//!
//! # Architecture
//! - `types.rs`: `Severity`, `IncidentStatus`, `IncidentRecord`
//! - `severity.rs`: metric -> severity rules
//! - `store.rs`: JSONL persistence (append / read_recent)
//! - `escalation.rs`: report -> incidents
//!
//! Records have no explicit id; position in the log plus timestamp identify them.

pub mod types;
pub mod severity;
pub mod store;
pub mod escalation;

pub use types::{IncidentRecord, IncidentStatus, Severity};
pub use severity::{decide_severity, severity_from_drift, severity_from_missing};
pub use store::IncidentStore;
pub use escalation::{escalate, missing_input_incident};

//! Severity rules: metric -> P1..P4
//!
//! Deterministic, total functions. Lower bounds are inclusive. Missing or
//! non-finite input is P4.

use serde_json::{Map, Value};

use super::types::Severity;

// ============================================================================
// CONSTANTS
// ============================================================================

const DRIFT_P1: f64 = 0.4;
const DRIFT_P2: f64 = 0.2;
const DRIFT_P3: f64 = 0.1;

const MISSING_P1: f64 = 0.25;
const MISSING_P2: f64 = 0.10;
const MISSING_P3: f64 = 0.03;

pub const DRIFT_SCORE_KEY: &str = "drift_score";
pub const MISSING_PCT_KEY: &str = "missing_pct";

// ============================================================================
// PUBLIC API
// ============================================================================

/// Severity of a drift score
pub fn severity_from_drift(drift_score: Option<f64>) -> Severity {
    tier(drift_score, DRIFT_P1, DRIFT_P2, DRIFT_P3)
}

/// Severity of a missing-row fraction
pub fn severity_from_missing(missing_pct: Option<f64>) -> Severity {
    tier(missing_pct, MISSING_P1, MISSING_P2, MISSING_P3)
}

/// Decide from whichever signal the event carries.
///
/// `drift_score` wins when present, even if its value is null; `missing_pct`
/// is only consulted when `drift_score` is absent. Neither key -> P4.
pub fn decide_severity(event: &Map<String, Value>) -> Severity {
    if let Some(value) = event.get(DRIFT_SCORE_KEY) {
        return severity_from_drift(value.as_f64());
    }
    if let Some(value) = event.get(MISSING_PCT_KEY) {
        return severity_from_missing(value.as_f64());
    }
    Severity::P4
}

// ============================================================================
// INTERNAL HELPERS
// ============================================================================

fn tier(metric: Option<f64>, p1: f64, p2: f64, p3: f64) -> Severity {
    match metric {
        Some(m) if m >= p1 => Severity::P1,
        Some(m) if m >= p2 => Severity::P2,
        Some(m) if m >= p3 => Severity::P3,
        // NaN fails every comparison above
        _ => Severity::P4,
    }
}

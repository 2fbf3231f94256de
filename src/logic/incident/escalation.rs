use std::path::Path;

use serde_json::{Map, Value};

use super::severity::{decide_severity, DRIFT_SCORE_KEY, MISSING_PCT_KEY};
use super::types::{IncidentRecord, Severity};
use crate::logic::report::DriftReport;

pub const DATA_DRIFT: &str = "Data Drift";
pub const MISSING_FEATURES: &str = "Missing Features";
pub const MISSING_INPUT: &str = "Missing Input";

/// Turn the worst signals of a report into incidents.
///
/// Drift and missing values are classified separately (each event carries a
/// single key), so one run can raise up to two incidents. P4 signals raise none.
pub fn escalate(report: &DriftReport) -> Vec<IncidentRecord> {
    let mut incidents = Vec::new();

    if let Some(worst) = report.worst_drift() {
        let mut details = Map::new();
        details.insert(DRIFT_SCORE_KEY.to_string(), Value::from(worst.score));
        details.insert("feature".to_string(), Value::from(worst.feature.clone()));
        details.insert(
            "top_features".to_string(),
            Value::from(
                report
                    .top_drifted_features
                    .iter()
                    .map(|f| f.feature.clone())
                    .collect::<Vec<_>>(),
            ),
        );

        let severity = decide_severity(&details);
        if severity.is_actionable() {
            let notes = format!("{} drifted with score {:.4}", worst.feature, worst.score);
            incidents.push(IncidentRecord::new(DATA_DRIFT, severity, details).with_notes(notes));
        } else {
            log::debug!("Worst drift {:.4} on '{}' below P3, no incident", worst.score, worst.feature);
        }
    }

    if let Some(worst) = report.worst_missing() {
        let mut details = Map::new();
        details.insert(MISSING_PCT_KEY.to_string(), Value::from(worst.missing_pct));
        details.insert("feature".to_string(), Value::from(worst.feature.clone()));

        let severity = decide_severity(&details);
        if severity.is_actionable() {
            let notes = format!("{:.1}% missing values in {}", worst.missing_pct * 100.0, worst.feature);
            incidents.push(IncidentRecord::new(MISSING_FEATURES, severity, details).with_notes(notes));
        } else {
            log::debug!(
                "Worst missing {:.4} on '{}' below P3, no incident",
                worst.missing_pct,
                worst.feature
            );
        }
    }

    incidents
}

/// Incident for an absent upstream dataset. Always P1: no report can be produced.
pub fn missing_input_incident(path: &Path) -> IncidentRecord {
    let mut details = Map::new();
    details.insert("path".to_string(), Value::from(path.display().to_string()));

    IncidentRecord::new(MISSING_INPUT, Severity::P1, details)
        .with_notes(format!("{} not found", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::drift::FeatureDriftScore;
    use crate::logic::incident::types::IncidentStatus;
    use crate::logic::missing::MissingSummary;
    use crate::logic::report::build_report;
    use serde_json::json;

    fn missing(feature: &str, pct: f64) -> MissingSummary {
        MissingSummary {
            feature: feature.into(),
            missing_pct: pct,
        }
    }

    #[test]
    fn test_drift_and_missing_raise_separate_incidents() {
        let report = build_report(
            vec![
                FeatureDriftScore::new("amount", 0.45),
                FeatureDriftScore::new("hour", 0.05),
            ],
            vec![missing("oldbalanceOrg", 0.12), missing("amount", 0.0)],
        );

        let incidents = escalate(&report);
        assert_eq!(incidents.len(), 2);

        let drift = &incidents[0];
        assert_eq!(drift.incident_type, DATA_DRIFT);
        assert_eq!(drift.severity, Severity::P1);
        assert_eq!(drift.status, IncidentStatus::Open);
        assert_eq!(drift.details["feature"], json!("amount"));
        assert_eq!(drift.details["top_features"], json!(["amount", "hour"]));

        let miss = &incidents[1];
        assert_eq!(miss.incident_type, MISSING_FEATURES);
        assert_eq!(miss.severity, Severity::P2);
        assert!(!miss.details.contains_key(DRIFT_SCORE_KEY));
    }

    #[test]
    fn test_p4_signals_raise_nothing() {
        let report = build_report(
            vec![FeatureDriftScore::new("amount", 0.05)],
            vec![missing("amount", 0.01)],
        );
        assert!(escalate(&report).is_empty());
    }

    #[test]
    fn test_empty_report_raises_nothing() {
        assert!(escalate(&DriftReport::default()).is_empty());
    }

    #[test]
    fn test_missing_input_incident() {
        let inc = missing_input_incident(Path::new("monitoring/production.csv"));
        assert_eq!(inc.severity, Severity::P1);
        assert_eq!(inc.incident_type, MISSING_INPUT);
        assert_eq!(inc.details["path"], json!("monitoring/production.csv"));
    }
}

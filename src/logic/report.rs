//! RCA report: ranked drift + missing-value summary
//!
//! Always the same two-field shape, whatever the list lengths. Where it goes
//! (console, `--out`, reports dir) is the caller's choice.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::MonitorResult;
use crate::logic::drift::FeatureDriftScore;
use crate::logic::missing::MissingSummary;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DriftReport {
    pub top_drifted_features: Vec<FeatureDriftScore>,
    pub missing_summary: Vec<MissingSummary>,
}

pub fn build_report(ranked_drift: Vec<FeatureDriftScore>, missing_summary: Vec<MissingSummary>) -> DriftReport {
    DriftReport {
        top_drifted_features: ranked_drift,
        missing_summary,
    }
}

impl DriftReport {
    /// Highest drift score, first one on ties
    pub fn worst_drift(&self) -> Option<&FeatureDriftScore> {
        self.top_drifted_features
            .iter()
            .reduce(|best, s| if s.score > best.score { s } else { best })
    }

    /// Highest missing fraction, first one on ties
    pub fn worst_missing(&self) -> Option<&MissingSummary> {
        self.missing_summary
            .iter()
            .reduce(|best, s| if s.missing_pct > best.missing_pct { s } else { best })
    }

    pub fn to_json_pretty(&self) -> MonitorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write pretty JSON to `path`, creating parent directories
    pub fn write_to(&self, path: &Path) -> MonitorResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json_pretty()?)?;
        log::info!("Wrote RCA summary to {:?}", path);
        Ok(())
    }
}

/// `<dir>/rca_summary_YYYYmmdd_HHMMSS.json`
pub fn timestamped_path(reports_dir: &Path) -> PathBuf {
    let stamp = Utc::now().format("%Y%m%d_%H%M%S");
    reports_dir.join(format!("rca_summary_{}.json", stamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    fn sample() -> DriftReport {
        build_report(
            vec![
                FeatureDriftScore::new("amount", 0.8),
                FeatureDriftScore::new("type", 0.1),
            ],
            vec![MissingSummary {
                feature: "oldbalanceOrg".into(),
                missing_pct: 0.3,
            }],
        )
    }

    #[test]
    fn test_report_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "top_drifted_features": [
                    {"feature": "amount", "score": 0.8},
                    {"feature": "type", "score": 0.1}
                ],
                "missing_summary": [
                    {"feature": "oldbalanceOrg", "missing_pct": 0.3}
                ]
            })
        );
    }

    #[test]
    fn test_empty_lists_keep_shape() {
        let value = serde_json::to_value(build_report(vec![], vec![])).unwrap();
        assert_eq!(value, json!({"top_drifted_features": [], "missing_summary": []}));
    }

    #[test]
    fn test_field_order_in_output() {
        let text = sample().to_json_pretty().unwrap();
        let drift_at = text.find("top_drifted_features").unwrap();
        let missing_at = text.find("missing_summary").unwrap();
        assert!(drift_at < missing_at);
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reports").join("summary.json");

        sample().write_to(&path).unwrap();

        let parsed: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["top_drifted_features"][0]["feature"], json!("amount"));
        let back: DriftReport = serde_json::from_value(parsed).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_worst_signals() {
        let report = sample();
        assert_eq!(report.worst_drift().unwrap().feature, "amount");
        assert_eq!(report.worst_missing().unwrap().feature, "oldbalanceOrg");
        assert!(DriftReport::default().worst_drift().is_none());
    }

    #[test]
    fn test_timestamped_path() {
        let path = timestamped_path(Path::new("monitoring/reports"));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("rca_summary_"));
        assert!(name.ends_with(".json"));
    }
}

//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_INCIDENT_LOG_PATH, DEFAULT_PRODUCTION_PATH, DEFAULT_REFERENCE_PATH,
    DEFAULT_REPORTS_DIR, DEFAULT_TOP_N,
};

/// Monitoring configuration
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// Trusted baseline dataset
    pub reference_path: PathBuf,

    /// Latest observed traffic (scored by the model)
    pub production_path: PathBuf,

    /// Append-only incident log (JSON Lines)
    pub incident_log_path: PathBuf,

    /// Directory for timestamped reports
    pub reports_dir: PathBuf,

    /// Number of drifted features to report
    pub top_n: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            reference_path: PathBuf::from(DEFAULT_REFERENCE_PATH),
            production_path: PathBuf::from(DEFAULT_PRODUCTION_PATH),
            incident_log_path: PathBuf::from(DEFAULT_INCIDENT_LOG_PATH),
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (env, test maps)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            reference_path: lookup("REFERENCE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.reference_path),

            production_path: lookup("PRODUCTION_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.production_path),

            incident_log_path: lookup("INCIDENT_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.incident_log_path),

            reports_dir: lookup("REPORTS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.reports_dir),

            top_n: lookup("TOP_N")
                .and_then(|n| n.parse().ok())
                .unwrap_or(defaults.top_n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = MonitorConfig::from_lookup(|_| None);
        assert_eq!(config, MonitorConfig::default());
        assert_eq!(config.top_n, 10);
        assert_eq!(config.reference_path, PathBuf::from("monitoring/reference.csv"));
    }

    #[test]
    fn test_overrides_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("PRODUCTION_PATH", "/data/prod.csv"),
            ("INCIDENT_LOG_PATH", "/var/log/incidents.jsonl"),
            ("TOP_N", "3"),
        ]
        .into_iter()
        .collect();

        let config = MonitorConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.production_path, PathBuf::from("/data/prod.csv"));
        assert_eq!(config.incident_log_path, PathBuf::from("/var/log/incidents.jsonl"));
        assert_eq!(config.top_n, 3);
        assert_eq!(config.reference_path, PathBuf::from("monitoring/reference.csv"));
    }

    #[test]
    fn test_invalid_top_n_falls_back() {
        let config = MonitorConfig::from_lookup(|k| (k == "TOP_N").then(|| "many".to_string()));
        assert_eq!(config.top_n, 10);
    }
}

//! Shared constants

// Default locations (relative to the working directory)
pub const DEFAULT_REFERENCE_PATH: &str = "monitoring/reference.csv";
pub const DEFAULT_PRODUCTION_PATH: &str = "monitoring/production.csv";
pub const DEFAULT_INCIDENT_LOG_PATH: &str = "incident/incident_log.jsonl";
pub const DEFAULT_REPORTS_DIR: &str = "monitoring/reports";
pub const DEFAULT_TOP_N: usize = 10;

/// Target column, never scored for drift
pub const LABEL_COLUMN: &str = "label";

/// Category substituted for missing cells in the categorical metric
pub const MISSING_CATEGORY: &str = "##MISSING##";

/// Cell values treated as missing when loading CSV
pub const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// Columns appended by batch inference
pub const PREDICTION_COLUMN: &str = "prediction";
pub const FRAUD_PROBA_COLUMN: &str = "fraud_proba";

/// Incidents shown by `--mode incidents` when `--n` is not given
pub const DEFAULT_INCIDENT_LIMIT: usize = 100;

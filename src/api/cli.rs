//! Command-line surface

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::MonitorConfig;

/// Run quick RCA on reference vs production data
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "fraud-monitor", version, about)]
pub struct Cli {
    /// What to run
    #[arg(long, value_enum, default_value_t = Mode::Summary)]
    pub mode: Mode,

    /// Top-n features for drift (incident count for `incidents`)
    #[arg(long)]
    pub n: Option<usize>,

    /// Write JSON summary (or scored CSV for `predict`) to file
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Reference dataset (overrides REFERENCE_PATH)
    #[arg(long)]
    pub reference: Option<PathBuf>,

    /// Production dataset (overrides PRODUCTION_PATH)
    #[arg(long)]
    pub production: Option<PathBuf>,

    /// Incident log (overrides INCIDENT_LOG_PATH)
    #[arg(long)]
    pub incident_log: Option<PathBuf>,

    /// Model JSON for `predict`
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Unscored input CSV for `predict`
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Score only the first N input rows in `predict`
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Ranked drift scores, one per line
    #[value(name = "top_drift")]
    TopDrift,
    /// Missing-value fractions of production columns
    #[value(name = "missing_values")]
    MissingValues,
    /// Full JSON report
    #[default]
    Summary,
    /// Report + escalate drift/missing signals into the incident log
    Check,
    /// Recent incidents from the log
    Incidents,
    /// Batch inference: attach prediction + fraud_proba
    Predict,
}

impl Cli {
    /// Layer CLI overrides on top of env configuration
    pub fn apply(&self, mut config: MonitorConfig) -> MonitorConfig {
        if let Some(path) = &self.reference {
            config.reference_path = path.clone();
        }
        if let Some(path) = &self.production {
            config.production_path = path.clone();
        }
        if let Some(path) = &self.incident_log {
            config.incident_log_path = path.clone();
        }
        if let Some(n) = self.n {
            config.top_n = n;
        }
        config
    }
}

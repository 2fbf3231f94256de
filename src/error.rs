//! Error handling

use std::path::PathBuf;

pub type MonitorResult<T> = Result<T, MonitorError>;

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    // Input errors
    #[error("Input dataset not found: {0}")]
    MissingInput(PathBuf),

    #[error("Malformed CSV at line {line}: {reason}")]
    MalformedCsv { line: usize, reason: String },

    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    ShapeMismatch { column: String, expected: usize, actual: usize },

    // Scoring errors (isolated per feature, never surfaced from ranking)
    #[error("Feature '{feature}' produced invalid score {score}")]
    InvalidScore { feature: String, score: f64 },

    // Model errors
    #[error("Model error: {0}")]
    Model(String),

    // Storage errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MonitorError {
    /// True for errors caused by an absent upstream dataset
    pub fn is_missing_input(&self) -> bool {
        matches!(self, MonitorError::MissingInput(_))
    }
}

//! Batch inference - score a dataset and attach predictions
//!
//! Contract cố định: `predict` trả về một label (0/1) cho mỗi row,
//! `predict_proba` trả về `[p_legit, p_fraud]` cho mỗi row. Không đoán shape.

use serde::{Deserialize, Serialize};

use crate::constants::{FRAUD_PROBA_COLUMN, PREDICTION_COLUMN};
use crate::error::{MonitorError, MonitorResult};
use crate::logic::dataset::{Column, Dataset};

// ============================================================================
// MODEL TRAIT
// ============================================================================

/// Binary fraud classifier. Both methods return exactly one entry per row.
pub trait FraudModel {
    /// Class label per row: 0 = legit, 1 = fraud
    fn predict(&self, rows: &Dataset) -> MonitorResult<Vec<u8>>;

    /// Per-class probabilities per row: `[p_legit, p_fraud]`
    fn predict_proba(&self, rows: &Dataset) -> MonitorResult<Vec<[f64; 2]>>;
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Aggregate view of one batch, for logs and the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub rows: usize,
    pub predicted_fraud: usize,
    pub mean_fraud_proba: f64,
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Run the model over `input` and return a copy with `prediction` and
/// `fraud_proba` columns appended (production dataset shape).
pub fn score_batch<M: FraudModel + ?Sized>(model: &M, input: &Dataset) -> MonitorResult<(Dataset, BatchSummary)> {
    let labels = model.predict(input)?;
    let proba = model.predict_proba(input)?;

    if labels.len() != input.n_rows() || proba.len() != input.n_rows() {
        return Err(MonitorError::Model(format!(
            "model returned {} labels and {} probabilities for {} rows",
            labels.len(),
            proba.len(),
            input.n_rows()
        )));
    }

    let fraud_proba: Vec<f64> = proba.iter().map(|p| p[1]).collect();

    let summary = BatchSummary {
        rows: input.n_rows(),
        predicted_fraud: labels.iter().filter(|&&l| l == 1).count(),
        mean_fraud_proba: if fraud_proba.is_empty() {
            0.0
        } else {
            fraud_proba.iter().sum::<f64>() / fraud_proba.len() as f64
        },
    };

    let scored = input
        .with_column(Column::from_values(PREDICTION_COLUMN, labels.iter().map(|l| l.to_string())))?
        .with_column(Column::from_numbers(FRAUD_PROBA_COLUMN, &fraud_proba))?;

    log::info!(
        "Scored {} rows: {} predicted fraud, mean fraud_proba {:.4}",
        summary.rows,
        summary.predicted_fraud,
        summary.mean_fraud_proba
    );

    Ok((scored, summary))
}

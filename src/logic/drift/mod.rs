//! Drift Module - Reference vs production distribution shift
//!
//! Mục đích: phát hiện feature nào của production traffic đã lệch khỏi
//! reference dataset, và lệch bao nhiêu.
//!
//! Cách hoạt động:
//! 1. Chọn test theo kiểu cột (numeric -> KS, categorical -> total variation)
//! 2. Tính score trong [0, 1] cho từng feature
//! 3. Sắp xếp giảm dần, lấy top-N
//!
//! # Structure
//! - `scorer.rs`: per-column statistics
//! - `ranker.rs`: feature selection, isolation of failures, ranking

pub mod scorer;
pub mod ranker;


use serde::{Deserialize, Serialize};

pub use ranker::{rank_drifted_features, score_features};
pub use scorer::{ks_statistic, score, score_columns, select_method, total_variation, DriftMethod};

/// Drift magnitude of one feature, in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDriftScore {
    pub feature: String,
    pub score: f64,
}

impl FeatureDriftScore {
    pub fn new(feature: impl Into<String>, score: f64) -> Self {
        Self {
            feature: feature.into(),
            score,
        }
    }
}

//! Model Module - Fraud classifier contract
//!
//! Tách model khỏi monitoring: drift/incident code chỉ đọc output
//! (`prediction`, `fraud_proba`), không bao giờ đọc model internals.

pub mod inference;
pub mod logistic;

pub use inference::{score_batch, BatchSummary, FraudModel};
pub use logistic::LogisticModel;

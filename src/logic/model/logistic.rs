use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::inference::FraudModel;
use crate::error::{MonitorError, MonitorResult};
use crate::logic::dataset::{Column, Dataset};

const DEFAULT_THRESHOLD: f64 = 0.5;

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

/// Logistic-regression fallback model, loaded from JSON:
///
/// ```json
/// {"bias": -4.0, "weights": {"amount": 0.00001, "is_large_transaction": 2.5}, "threshold": 0.5}
/// ```
///
/// Missing or non-numeric cells contribute nothing for that feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub bias: f64,
    pub weights: BTreeMap<String, f64>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl LogisticModel {
    pub fn load(path: &Path) -> MonitorResult<Self> {
        if !path.exists() {
            return Err(MonitorError::MissingInput(path.to_path_buf()));
        }

        log::info!("Loading model from {:?}", path);
        let model: Self = serde_json::from_str(&std::fs::read_to_string(path)?)?;

        if !(0.0..=1.0).contains(&model.threshold) {
            return Err(MonitorError::Model(format!(
                "threshold {} outside [0, 1]",
                model.threshold
            )));
        }
        Ok(model)
    }

    fn fraud_probabilities(&self, rows: &Dataset) -> MonitorResult<Vec<f64>> {
        let columns: Vec<(&Column, f64)> = self
            .weights
            .iter()
            .map(|(name, &w)| {
                rows.column(name)
                    .map(|col| (col, w))
                    .ok_or_else(|| MonitorError::Model(format!("input has no feature column '{}'", name)))
            })
            .collect::<MonitorResult<_>>()?;

        Ok((0..rows.n_rows())
            .map(|row| {
                let z = columns
                    .iter()
                    .fold(self.bias, |acc, (col, w)| acc + w * col.number_at(row).unwrap_or(0.0));
                sigmoid(z)
            })
            .collect())
    }
}

impl FraudModel for LogisticModel {
    fn predict(&self, rows: &Dataset) -> MonitorResult<Vec<u8>> {
        Ok(self
            .fraud_probabilities(rows)?
            .into_iter()
            .map(|p| u8::from(p >= self.threshold))
            .collect())
    }

    fn predict_proba(&self, rows: &Dataset) -> MonitorResult<Vec<[f64; 2]>> {
        Ok(self
            .fraud_probabilities(rows)?
            .into_iter()
            .map(|p| [1.0 - p, p])
            .collect())
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn model() -> LogisticModel {
        LogisticModel {
            bias: -2.0,
            weights: [("is_large_transaction".to_string(), 4.0)].into_iter().collect(),
            threshold: 0.5,
        }
    }

    fn rows() -> Dataset {
        Dataset::new(vec![
            Column::from_values("is_large_transaction", ["0", "1", ""]),
            Column::from_values("type", ["TRANSFER", "CASH_OUT", "TRANSFER"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_predict_proba_shape_and_sum() {
        let proba = model().predict_proba(&rows()).unwrap();
        assert_eq!(proba.len(), 3);
        for p in &proba {
            assert!((p[0] + p[1] - 1.0).abs() < 1e-12);
        }
        // z = -2 -> ~0.119, z = 2 -> ~0.881
        assert!(proba[0][1] < 0.2);
        assert!(proba[1][1] > 0.8);
        // missing cell contributes nothing
        assert_eq!(proba[2], proba[0]);
    }

    #[test]
    fn test_predict_uses_threshold() {
        assert_eq!(model().predict(&rows()).unwrap(), vec![0, 1, 0]);

        let strict = LogisticModel { threshold: 0.95, ..model() };
        assert_eq!(strict.predict(&rows()).unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn test_missing_feature_column_is_error() {
        let m = LogisticModel {
            weights: [("amount".to_string(), 1.0)].into_iter().collect(),
            ..model()
        };
        assert!(matches!(m.predict(&rows()), Err(MonitorError::Model(_))));
    }

    #[test]
    fn test_load_from_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, r#"{"bias": -2.0, "weights": {"is_large_transaction": 4.0}}"#).unwrap();

        let loaded = LogisticModel::load(&path).unwrap();
        assert_eq!(loaded, model());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = LogisticModel::load(&dir.path().join("none.json")).unwrap_err();
        assert!(err.is_missing_input());
    }

    #[test]
    fn test_load_rejects_bad_threshold() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, r#"{"bias": 0.0, "weights": {}, "threshold": 2.0}"#).unwrap();
        assert!(matches!(LogisticModel::load(&path), Err(MonitorError::Model(_))));
    }
}

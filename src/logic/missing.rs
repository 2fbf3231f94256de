//! Missing-value summary for production traffic

use serde::{Deserialize, Serialize};

use crate::logic::dataset::Dataset;

/// Fraction of missing cells in one column, in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingSummary {
    pub feature: String,
    pub missing_pct: f64,
}

/// One entry per production column, most-missing first (stable on ties).
/// A zero-row dataset reports 0.0 everywhere.
pub fn missing_summary(production: &Dataset) -> Vec<MissingSummary> {
    let rows = production.n_rows();

    let mut summary: Vec<MissingSummary> = production
        .columns()
        .iter()
        .map(|col| MissingSummary {
            feature: col.name().to_string(),
            missing_pct: if rows == 0 {
                0.0
            } else {
                col.missing_count() as f64 / rows as f64
            },
        })
        .collect();

    summary.sort_by(|a, b| b.missing_pct.total_cmp(&a.missing_pct));
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::dataset::Column;

    fn production() -> Dataset {
        Dataset::new(vec![
            Column::from_values("step", ["1", "2", "3", "4"]),
            Column::from_values("oldbalanceOrg", ["", "", "10", ""]),
            Column::from_values("type", ["a", "", "b", "c"]),
            Column::from_values("amount", ["1", "2", "", "4"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_sorted_descending_and_complete() {
        let summary = missing_summary(&production());

        assert_eq!(summary.len(), 4);
        assert_eq!(summary[0].feature, "oldbalanceOrg");
        assert_eq!(summary[0].missing_pct, 0.75);

        // tie between type and amount keeps column order
        assert_eq!(summary[1].feature, "type");
        assert_eq!(summary[2].feature, "amount");
        assert_eq!(summary[3].feature, "step");
        assert_eq!(summary[3].missing_pct, 0.0);

        for pair in summary.windows(2) {
            assert!(pair[0].missing_pct >= pair[1].missing_pct);
        }
        assert!(summary.iter().all(|s| (0.0..=1.0).contains(&s.missing_pct)));
    }

    #[test]
    fn test_zero_rows() {
        let ds = Dataset::new(vec![Column::from_values("a", Vec::<&str>::new())]).unwrap();
        let summary = missing_summary(&ds);
        assert_eq!(summary, vec![MissingSummary { feature: "a".into(), missing_pct: 0.0 }]);
    }

    #[test]
    fn test_empty_dataset() {
        assert!(missing_summary(&Dataset::default()).is_empty());
    }
}

use std::collections::HashMap;

use crate::error::{MonitorError, MonitorResult};
use crate::logic::dataset::{Column, ColumnKind};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Minimum present values per side for the KS test
const MIN_NUMERIC_SAMPLES: usize = 2;

// ============================================================================
// METHOD SELECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftMethod {
    /// Two-sample Kolmogorov-Smirnov statistic (numeric columns)
    KolmogorovSmirnov,
    /// Total variation distance of category frequencies
    TotalVariation,
}

impl DriftMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriftMethod::KolmogorovSmirnov => "ks",
            DriftMethod::TotalVariation => "total_variation",
        }
    }
}

/// Pick the test once, from both columns' kinds. Numeric only if both are numeric.
pub fn select_method(reference: &Column, production: &Column) -> DriftMethod {
    match (reference.kind(), production.kind()) {
        (ColumnKind::Numeric, ColumnKind::Numeric) => DriftMethod::KolmogorovSmirnov,
        (ref_kind, prod_kind) => {
            log::debug!(
                "'{}': {} vs {}, using total variation",
                reference.name(),
                ref_kind,
                prod_kind
            );
            DriftMethod::TotalVariation
        }
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Drift score of one feature. Errors degrade to 0.0 for this feature only.
pub fn score(reference: &Column, production: &Column) -> f64 {
    score_or_zero(reference.name(), score_columns(reference, production))
}

fn score_or_zero(feature: &str, result: MonitorResult<f64>) -> f64 {
    match result {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Drift scoring failed for '{}': {} - using 0.0", feature, e);
            0.0
        }
    }
}

/// Drift score of one feature, validated to lie in [0, 1]
pub fn score_columns(reference: &Column, production: &Column) -> MonitorResult<f64> {
    let method = select_method(reference, production);

    let value = match method {
        DriftMethod::KolmogorovSmirnov => {
            let ref_values = reference.numeric_values();
            let prod_values = production.numeric_values();

            // Không đủ mẫu: không kết luận được, mặc định 0
            if ref_values.len() < MIN_NUMERIC_SAMPLES || prod_values.len() < MIN_NUMERIC_SAMPLES {
                log::debug!(
                    "'{}': insufficient samples ({} vs {}), score 0.0",
                    reference.name(),
                    ref_values.len(),
                    prod_values.len()
                );
                return Ok(0.0);
            }

            ks_statistic(&ref_values, &prod_values)
        }
        DriftMethod::TotalVariation => total_variation(reference.categories(), production.categories()),
    };

    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(MonitorError::InvalidScore {
            feature: reference.name().to_string(),
            score: value,
        });
    }

    log::debug!("'{}': {} = {:.4}", reference.name(), method.as_str(), value);
    Ok(value)
}

/// Two-sample KS statistic: max |F_ref(x) - F_prod(x)| over every observed x.
///
/// Tied values are consumed together on both sides before comparing, so the
/// result matches the exact empirical-CDF definition. Empty input gives 0.0.
pub fn ks_statistic(reference: &[f64], production: &[f64]) -> f64 {
    if reference.is_empty() || production.is_empty() {
        return 0.0;
    }

    let mut a = reference.to_vec();
    let mut b = production.to_vec();
    a.sort_by(|x, y| x.total_cmp(y));
    b.sort_by(|x, y| x.total_cmp(y));

    let n1 = a.len() as f64;
    let n2 = b.len() as f64;

    let mut i = 0usize;
    let mut j = 0usize;
    let mut d_max = 0.0f64;

    while i < a.len() && j < b.len() {
        let x = if a[i] <= b[j] { a[i] } else { b[j] };

        while i < a.len() && a[i] <= x {
            i += 1;
        }
        while j < b.len() && b[j] <= x {
            j += 1;
        }

        let diff = (i as f64 / n1 - j as f64 / n2).abs();
        d_max = d_max.max(diff);
    }

    d_max
}

/// Total variation distance between two categorical samples: ½ Σ |p(k) - q(k)|
pub fn total_variation<'a, R, P>(reference: R, production: P) -> f64
where
    R: IntoIterator<Item = &'a str>,
    P: IntoIterator<Item = &'a str>,
{
    let ref_freq = frequencies(reference);
    let prod_freq = frequencies(production);

    let diff: f64 = ref_freq
        .keys()
        .chain(prod_freq.keys().filter(|k| !ref_freq.contains_key(*k)))
        .map(|k| {
            let p = ref_freq.get(k).copied().unwrap_or(0.0);
            let q = prod_freq.get(k).copied().unwrap_or(0.0);
            (p - q).abs()
        })
        .sum();

    // Rounding can push disjoint distributions a hair above 1.0
    (diff / 2.0).min(1.0)
}

// ============================================================================
// INTERNAL HELPERS
// ============================================================================

/// Normalized value counts
fn frequencies<'a, I>(values: I) -> HashMap<&'a str, f64>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&'a str, usize> = HashMap::new();
    let mut total = 0usize;

    for v in values {
        *counts.entry(v).or_insert(0) += 1;
        total += 1;
    }

    counts
        .into_iter()
        .map(|(k, c)| (k, c as f64 / total as f64))
        .collect()
}

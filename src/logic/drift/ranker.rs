use super::scorer;
use super::FeatureDriftScore;
use crate::constants::LABEL_COLUMN;
use crate::logic::dataset::Dataset;

/// Score every feature present in both datasets, in reference column order.
/// The label column is never scored.
pub fn score_features(reference: &Dataset, production: &Dataset) -> Vec<FeatureDriftScore> {
    reference
        .columns()
        .iter()
        .filter(|col| col.name() != LABEL_COLUMN)
        .filter_map(|ref_col| {
            production
                .column(ref_col.name())
                .map(|prod_col| FeatureDriftScore::new(ref_col.name(), scorer::score(ref_col, prod_col)))
        })
        .collect()
}

/// Top-N features by drift score, descending. Ties keep reference column order.
pub fn rank_drifted_features(
    reference: &Dataset,
    production: &Dataset,
    top_n: usize,
) -> Vec<FeatureDriftScore> {
    let mut ranked = score_features(reference, production);
    let shared = ranked.len();

    let unmatched: Vec<&str> = reference
        .column_names()
        .into_iter()
        .filter(|name| *name != LABEL_COLUMN && !production.has_column(name))
        .collect();
    if !unmatched.is_empty() {
        log::warn!("Reference features absent from production, not scored: {:?}", unmatched);
    }

    // sort_by là stable sort
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(top_n);

    log::info!("Ranked drift for {} shared features (top {})", shared, top_n);

    ranked
}

//! CLI mode handlers
//!
//! Each handler writes its human/JSON output to `out` and returns the
//! structured result, so `main` decides where stdout goes and tests can
//! capture it.

use std::io::Write;
use std::path::Path;

use crate::config::MonitorConfig;
use crate::error::{MonitorError, MonitorResult};
use crate::logic::dataset::Dataset;
use crate::logic::drift::rank_drifted_features;
use crate::logic::incident::{escalate, missing_input_incident, IncidentRecord, IncidentStore};
use crate::logic::missing::missing_summary;
use crate::logic::model::{score_batch, BatchSummary, LogisticModel};
use crate::logic::report::{build_report, timestamped_path, DriftReport};

// ============================================================================
// INPUTS
// ============================================================================

/// Load reference + production. Either one missing is fatal for the mode.
pub fn load_inputs(config: &MonitorConfig) -> MonitorResult<(Dataset, Dataset)> {
    let reference = Dataset::from_csv_path(&config.reference_path)?;
    let production = Dataset::from_csv_path(&config.production_path)?;
    Ok((reference, production))
}

// ============================================================================
// RCA MODES
// ============================================================================

/// `top_drift`: one `feature<TAB>score` line per ranked feature
pub fn top_drift<W: Write>(config: &MonitorConfig, out_path: Option<&Path>, out: &mut W) -> MonitorResult<DriftReport> {
    let (reference, production) = load_inputs(config)?;
    let top = rank_drifted_features(&reference, &production, config.top_n);

    for f in &top {
        writeln!(out, "{}\t{:.4}", f.feature, f.score)?;
    }

    let report = build_report(top, missing_summary(&production));
    if let Some(path) = out_path {
        write_report(&report, path, out)?;
    }
    Ok(report)
}

/// `missing_values`: one `feature<TAB>missing_pct` line per production column
pub fn missing_values<W: Write>(
    config: &MonitorConfig,
    out_path: Option<&Path>,
    out: &mut W,
) -> MonitorResult<DriftReport> {
    let production = Dataset::from_csv_path(&config.production_path)?;
    let missing = missing_summary(&production);

    writeln!(out, "feature\tmissing_pct")?;
    for m in &missing {
        writeln!(out, "{}\t{:.4}", m.feature, m.missing_pct)?;
    }

    let report = build_report(Vec::new(), missing);
    if let Some(path) = out_path {
        write_report(&report, path, out)?;
    }
    Ok(report)
}

/// `summary`: full report, to `out_path` if given, else printed as JSON
pub fn summary<W: Write>(config: &MonitorConfig, out_path: Option<&Path>, out: &mut W) -> MonitorResult<DriftReport> {
    let (reference, production) = load_inputs(config)?;
    let report = build_report(
        rank_drifted_features(&reference, &production, config.top_n),
        missing_summary(&production),
    );

    match out_path {
        Some(path) => write_report(&report, path, out)?,
        None => writeln!(out, "{}", report.to_json_pretty()?)?,
    }
    Ok(report)
}

// ============================================================================
// INCIDENT MODES
// ============================================================================

/// `check`: summary report + escalation into the incident log.
///
/// The report is also archived under `reports_dir`. A missing input dataset
/// is logged as a P1 incident before the error is returned.
pub fn check<W: Write>(
    config: &MonitorConfig,
    store: &IncidentStore,
    out_path: Option<&Path>,
    out: &mut W,
) -> MonitorResult<Vec<IncidentRecord>> {
    let (reference, production) = match load_inputs(config) {
        Ok(inputs) => inputs,
        Err(MonitorError::MissingInput(path)) => {
            let incident = missing_input_incident(&path);
            append_incident(store, &incident, out)?;
            return Err(MonitorError::MissingInput(path));
        }
        Err(e) => return Err(e),
    };

    let report = build_report(
        rank_drifted_features(&reference, &production, config.top_n),
        missing_summary(&production),
    );

    report.write_to(&timestamped_path(&config.reports_dir))?;
    match out_path {
        Some(path) => write_report(&report, path, out)?,
        None => writeln!(out, "{}", report.to_json_pretty()?)?,
    }

    let incidents = escalate(&report);
    if incidents.is_empty() {
        writeln!(out, "No drift or missing-value alert triggered.")?;
    }
    for incident in &incidents {
        append_incident(store, incident, out)?;
    }

    Ok(incidents)
}

/// `incidents`: last `limit` incidents as JSON lines, oldest first
pub fn recent_incidents<W: Write>(
    store: &IncidentStore,
    limit: usize,
    out: &mut W,
) -> MonitorResult<Vec<IncidentRecord>> {
    let records = store.read_recent(limit)?;

    if records.is_empty() {
        writeln!(out, "No incidents recorded in {}", store.path().display())?;
    }
    for record in &records {
        writeln!(out, "{}", serde_json::to_string(record)?)?;
    }
    Ok(records)
}

// ============================================================================
// MODEL MODE
// ============================================================================

/// `predict`: score `input_path` with the model and write the scored CSV.
/// `limit` keeps only the first rows, e.g. to cut a reference snapshot.
pub fn predict<W: Write>(
    model_path: &Path,
    input_path: &Path,
    output_path: &Path,
    limit: Option<usize>,
    out: &mut W,
) -> MonitorResult<BatchSummary> {
    let model = LogisticModel::load(model_path)?;
    let mut input = Dataset::from_csv_path(input_path)?;
    if let Some(n) = limit {
        input = input.head(n);
    }

    let (scored, summary) = score_batch(&model, &input)?;
    scored.write_csv(output_path)?;

    writeln!(
        out,
        "Saved predictions to {} ({} rows, {} flagged as fraud)",
        output_path.display(),
        summary.rows,
        summary.predicted_fraud
    )?;
    Ok(summary)
}

// ============================================================================
// HELPERS
// ============================================================================

fn write_report<W: Write>(report: &DriftReport, path: &Path, out: &mut W) -> MonitorResult<()> {
    report.write_to(path)?;
    writeln!(out, "Wrote RCA summary to {}", path.display())?;
    Ok(())
}

/// Append and echo the operator acknowledgement
fn append_incident<W: Write>(store: &IncidentStore, incident: &IncidentRecord, out: &mut W) -> MonitorResult<()> {
    store.append(incident)?;
    writeln!(out, "[INCIDENT LOGGED] {}", incident.summary_line())?;
    Ok(())
}

//! Fraud Monitor - Main Entry Point

use std::io;

use anyhow::Context;
use clap::Parser;

use fraud_monitor::api::cli::{Cli, Mode};
use fraud_monitor::api::commands;
use fraud_monitor::constants::DEFAULT_INCIDENT_LIMIT;
use fraud_monitor::logic::incident::IncidentStore;
use fraud_monitor::MonitorConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Load .env file if exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = cli.apply(MonitorConfig::from_env());
    let out_path = cli.out.as_deref();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    log::debug!("Running mode {:?} with {:?}", cli.mode, config);

    match cli.mode {
        Mode::TopDrift => {
            commands::top_drift(&config, out_path, &mut out).context("top_drift failed")?;
        }
        Mode::MissingValues => {
            commands::missing_values(&config, out_path, &mut out).context("missing_values failed")?;
        }
        Mode::Summary => {
            commands::summary(&config, out_path, &mut out).context("summary failed")?;
        }
        Mode::Check => {
            let store = IncidentStore::new(&config.incident_log_path);
            let incidents = commands::check(&config, &store, out_path, &mut out).context("check failed")?;
            log::info!("Check complete: {} incident(s) logged", incidents.len());
        }
        Mode::Incidents => {
            let store = IncidentStore::new(&config.incident_log_path);
            commands::recent_incidents(&store, cli.n.unwrap_or(DEFAULT_INCIDENT_LIMIT), &mut out)
                .context("reading incident log failed")?;
        }
        Mode::Predict => {
            let model = cli.model.as_deref().context("--model is required for predict")?;
            let input = cli.input.as_deref().unwrap_or(&config.production_path);
            let output = out_path.unwrap_or(&config.production_path);
            commands::predict(model, input, output, cli.limit, &mut out).context("predict failed")?;
        }
    }

    Ok(())
}

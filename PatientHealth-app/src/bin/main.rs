use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use patient_health_app::config::{AlertSink, AppConfig};
use patient_health_app::runner::{run_scenario, ScenarioReport};
use patient_health_app::scenario::Scenario;
use patient_health_domain::services::{ConsoleAlertService, LoggingAlertService};

/// The main entry point for the PatientHealth runner
///
/// This function:
/// 1. Initializes environment variables from .env file
/// 2. Sets up tracing for logging
/// 3. Loads the scenario (file or built-in demo)
/// 4. Runs every check and reports the totals
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    if dotenv().is_err() {
        eprintln!("Warning: .env file not found or couldn't be read. Using environment variables.");
    }

    let config = AppConfig::from_env()?;

    // Initialize tracing for structured logging
    let env_filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr))
        .with(env_filter)
        .init();

    info!("Starting PatientHealth checks");

    let scenario = match &config.scenario_path {
        Some(path) => {
            info!("Loading scenario from {}", path.display());
            Scenario::from_file(path).await?
        }
        None => {
            info!("No scenario file configured, running the demo scenario");
            Scenario::demo()
        }
    };

    let report = match config.alert_sink {
        AlertSink::Log => run_scenario(&scenario, LoggingAlertService).await?,
        AlertSink::Console => run_scenario(&scenario, ConsoleAlertService).await?,
    };

    log_report(&report);

    if report.failures > 0 {
        anyhow::bail!("{} check(s) failed", report.failures);
    }

    Ok(())
}

fn log_report(report: &ScenarioReport) {
    info!(
        patients = report.patients,
        checks = report.checks,
        alerts = report.alerts,
        failures = report.failures,
        "Scenario complete"
    );
}

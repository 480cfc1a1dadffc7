use std::io::Write;
use std::process::ExitCode;

use lumdist_core::{Cosmology, DistanceReport, IntegrationConfig};
use lumdist_physics::luminosity_distance;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// The single result line: fixed notation, 6 decimals, no trailing newline
fn render(report: &DistanceReport) -> String {
    format!("Value of luminosity distance = {:.6}", report.luminosity_distance)
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the result line
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cosmology = Cosmology::default();
    let config = IntegrationConfig::default();
    info!(?cosmology, ?config, "computing luminosity distance");

    let report = match luminosity_distance(&cosmology, &config) {
        Ok(report) => report,
        Err(e) => {
            error!("luminosity distance failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        evaluations = report.evaluations,
        integral = report.integral,
        factor_redshift = report.factor_redshift,
        "integration finished"
    );

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout
        .write_all(render(&report).as_bytes())
        .and_then(|()| stdout.flush())
    {
        error!("failed to write result: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

use anyhow::Result;
use clap::Parser;
use netshape_simulator::{SimulationReport, scenario_runner};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless grader for traffic-shaping lab scenarios")]
struct Args {
    /// Path to the scenario TOML file to execute.
    #[arg(long)]
    scenario: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt::init();
    info!("netshape-eval-host starting...");

    let report = scenario_runner::run_scenario_file(&args.scenario)?;
    log_summary(&report);
    Ok(())
}

fn log_summary(report: &SimulationReport) {
    info!(
        "Algorithm: {} | steps: {} | incoming: {} | sent: {} | dropped: {} | loss: {:.2}%",
        report.algorithm,
        report.steps.len(),
        report.summary.total_incoming,
        report.summary.total_sent,
        report.summary.total_dropped,
        report.summary.loss_percent()
    );
}

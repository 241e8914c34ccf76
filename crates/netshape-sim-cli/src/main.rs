mod input;
mod table;

use anyhow::{Context, Result};
use clap::Parser;
use netshape_abstract::{Algorithm, Scenario, ShapingConfig};
use netshape_simulator::report::render_lab_report;
use netshape_simulator::tui::{MemoryLogBuffer, TuiApp};
use netshape_simulator::{SimulationReport, scenario_runner, simulate};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Interactive traffic-shaping lab simulator")]
struct Args {
    /// Shaping algorithm to run: leaky or token.
    #[arg(long, default_value = "leaky")]
    algorithm: Algorithm,

    /// Maximum buffer (and token) capacity.
    #[arg(long, default_value_t = 10)]
    capacity: i64,

    /// Outflow rate (leaky) or token generation rate (token).
    #[arg(long, default_value_t = 3)]
    rate: i64,

    /// Comma-separated packet sizes, one per time unit.
    #[arg(long, default_value = "4, 2, 6, 8, 2")]
    packets: String,

    /// Run a scenario file instead of the ad-hoc parameters above.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Launch the terminal UI visualizer.
    #[arg(long, default_value_t = false)]
    tui: bool,

    /// Print the lab report sheet after the run.
    #[arg(long, default_value_t = false)]
    report: bool,

    /// Write a JSON trace of the finished simulation.
    #[arg(long)]
    trace_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = init_logging(args.tui);
    info!("netshape-sim-cli starting…");

    let report = if let Some(path) = &args.scenario {
        run_scenario(&args, path)?
    } else {
        run_ad_hoc(&args)?
    };

    if !args.tui {
        println!(
            "{}",
            table::render_step_table(report.algorithm, &report.steps)
        );
        println!();
        println!(
            "Totals: incoming={} sent={} dropped={} loss={:.2}%",
            report.summary.total_incoming,
            report.summary.total_sent,
            report.summary.total_dropped,
            report.summary.loss_percent()
        );
    }

    if args.report {
        println!();
        println!("{}", render_lab_report(&report));
    }

    if let Some(trace_path) = &args.trace_out {
        write_trace(trace_path, &report)?;
    }

    Ok(())
}

fn run_ad_hoc(args: &Args) -> Result<SimulationReport> {
    let config = ShapingConfig {
        capacity: args.capacity,
        rate: args.rate,
    };
    let packets = input::parse_packet_list(&args.packets);
    info!(
        "Running {} simulation over {} packets",
        args.algorithm,
        packets.len()
    );

    let steps = simulate(args.algorithm, &config, &packets);
    let report = SimulationReport::new(args.algorithm, config, packets, steps);

    if args.tui {
        run_tui(&report, None)?;
    }
    Ok(report)
}

fn run_scenario(args: &Args, path: &Path) -> Result<SimulationReport> {
    if args.tui {
        // The TUI steps through the trace itself; grade first, then visualize.
        let scenario = load_scenario(path)?;
        let report = scenario_runner::run_scenario(&scenario)?;
        run_tui(&report, Some(scenario.name.clone()))?;
        Ok(report)
    } else {
        scenario_runner::run_scenario_file(path)
    }
}

fn run_tui(report: &SimulationReport, scenario_name: Option<String>) -> Result<()> {
    let mut app = TuiApp::new(
        report.algorithm,
        report.config,
        report.steps.clone(),
        scenario_name,
    );
    app.run()
}

fn init_logging(use_tui: bool) -> Option<MemoryLogBuffer> {
    if use_tui {
        let buffer = MemoryLogBuffer::new();
        let writer = buffer.clone();
        tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .init();
        Some(buffer)
    } else {
        tracing_subscriber::fmt::init();
        None
    }
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
    let scenario: Scenario = toml::from_str(&content).context("Failed to parse scenario file")?;
    Ok(scenario)
}

fn write_trace(path: &Path, report: &SimulationReport) -> Result<()> {
    let data = serde_json::to_vec_pretty(report).context("Failed to serialize simulation trace")?;
    fs::write(path, &data)
        .with_context(|| format!("Failed to write trace file {}", path.display()))?;
    Ok(())
}

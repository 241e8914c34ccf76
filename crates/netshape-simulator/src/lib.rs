pub mod leaky;
pub mod token;

#[cfg(feature = "tui")]
pub mod tui;

pub mod report;
pub mod scenario_runner;
pub mod trace;

pub use leaky::run_leaky_bucket;
pub use token::run_token_bucket;
pub use trace::{RunSummary, SimulationReport};

use netshape_abstract::{Algorithm, ShapingConfig, SimulationStep};

/// Run the selected algorithm over one packet sequence.
pub fn simulate(
    algorithm: Algorithm,
    config: &ShapingConfig,
    packets: &[i64],
) -> Vec<SimulationStep> {
    match algorithm {
        Algorithm::Leaky => run_leaky_bucket(config, packets),
        Algorithm::Token => run_token_bucket(config, packets),
    }
}

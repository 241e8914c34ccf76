pub mod config;
pub mod scenario;
pub mod step;

pub use config::ShapingConfig;
pub use step::{Algorithm, SimulationStep};

pub use scenario::{Scenario, ScenarioAssertion, ShapingConfigOverride};

use netshape_abstract::{Algorithm, ShapingConfig, SimulationStep};
use serde::Serialize;

/// Whole-run totals, aggregated from the step trace by the reporting layer.
/// The simulate functions themselves never aggregate.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct RunSummary {
    pub total_incoming: i64,
    pub total_sent: i64,
    pub total_dropped: i64,
    /// Fraction of incoming traffic that was dropped, 0.0 when nothing arrived.
    pub loss_rate: f64,
}

impl RunSummary {
    pub fn from_steps(steps: &[SimulationStep]) -> Self {
        let total_incoming: i64 = steps.iter().map(|s| s.incoming).sum();
        let total_sent: i64 = steps.iter().map(|s| s.sent).sum();
        let total_dropped: i64 = steps.iter().map(|s| s.dropped).sum();
        let loss_rate = if total_incoming != 0 {
            total_dropped as f64 / total_incoming as f64
        } else {
            0.0
        };
        Self {
            total_incoming,
            total_sent,
            total_dropped,
            loss_rate,
        }
    }

    pub fn loss_percent(&self) -> f64 {
        self.loss_rate * 100.0
    }
}

/// A serializable record of one finished run, written via `--trace-out`.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub algorithm: Algorithm,
    pub config: ShapingConfig,
    pub packets: Vec<i64>,
    pub steps: Vec<SimulationStep>,
    pub summary: RunSummary,
}

impl SimulationReport {
    pub fn new(
        algorithm: Algorithm,
        config: ShapingConfig,
        packets: Vec<i64>,
        steps: Vec<SimulationStep>,
    ) -> Self {
        let summary = RunSummary::from_steps(&steps);
        Self {
            algorithm,
            config,
            packets,
            steps,
            summary,
        }
    }
}

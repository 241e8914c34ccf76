use crate::simulate;
use crate::trace::{RunSummary, SimulationReport};
use anyhow::{Context, Result, anyhow};
use netshape_abstract::{Scenario, ScenarioAssertion, ShapingConfig};
use std::fs;
use std::path::Path;
use tracing::info;

/// Load a scenario file, run it, and grade its assertions.
pub fn run_scenario_file(path: impl AsRef<Path>) -> Result<SimulationReport> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
    let scenario: Scenario = toml::from_str(&content).context("Failed to parse scenario file")?;
    run_scenario(&scenario)
}

/// Run a parsed scenario and grade its assertions. The first failed assertion
/// is returned as an error; a passing run returns the full report.
pub fn run_scenario(scenario: &Scenario) -> Result<SimulationReport> {
    info!("Running Scenario: {}", scenario.name);
    info!("Description: {}", scenario.description);

    let mut config = ShapingConfig::default();
    scenario.config.apply_to(&mut config);

    let steps = simulate(scenario.algorithm, &config, &scenario.packets);
    let report = SimulationReport::new(
        scenario.algorithm,
        config,
        scenario.packets.clone(),
        steps,
    );

    for assertion in &scenario.assertions {
        check_assertion(assertion, &report)?;
    }

    info!("Scenario passed: {}", scenario.name);
    Ok(report)
}

fn check_assertion(assertion: &ScenarioAssertion, report: &SimulationReport) -> Result<()> {
    let summary: &RunSummary = &report.summary;
    match assertion {
        ScenarioAssertion::TotalSent { min, max } => {
            check_range("total sent", summary.total_sent, *min, *max)
        }
        ScenarioAssertion::TotalDropped { min, max } => {
            check_range("total dropped", summary.total_dropped, *min, *max)
        }
        ScenarioAssertion::PeakBuffer { max } => {
            let peak = report
                .steps
                .iter()
                .map(|s| s.buffer_after)
                .max()
                .unwrap_or(0);
            if peak > *max {
                return Err(anyhow!(
                    "Assertion Failed: peak buffer {} exceeds allowed {}",
                    peak,
                    max
                ));
            }
            Ok(())
        }
        ScenarioAssertion::FinalBuffer { at_most } => {
            let last = report.steps.last().map(|s| s.buffer_after).unwrap_or(0);
            if last > *at_most {
                return Err(anyhow!(
                    "Assertion Failed: final buffer {} exceeds allowed {}",
                    last,
                    at_most
                ));
            }
            Ok(())
        }
        ScenarioAssertion::LossRateAtMost { percent } => {
            let actual = summary.loss_percent();
            if actual > *percent {
                return Err(anyhow!(
                    "Assertion Failed: loss rate {:.2}% exceeds allowed {:.2}%",
                    actual,
                    percent
                ));
            }
            Ok(())
        }
        ScenarioAssertion::StepCount { expected } => {
            if report.steps.len() != *expected {
                return Err(anyhow!(
                    "Assertion Failed: trace has {} steps, expected {}",
                    report.steps.len(),
                    expected
                ));
            }
            Ok(())
        }
    }
}

fn check_range(what: &str, value: i64, min: i64, max: Option<i64>) -> Result<()> {
    if value < min {
        return Err(anyhow!(
            "Assertion Failed: {} is {}, expected min {}",
            what,
            value,
            min
        ));
    }
    if let Some(max) = max {
        if value > max {
            return Err(anyhow!(
                "Assertion Failed: {} is {}, expected max {}",
                what,
                value,
                max
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run_scenario;
    use netshape_abstract::Scenario;

    fn parse(text: &str) -> Scenario {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn classic_leaky_scenario_passes_its_assertions() {
        let scenario = parse(
            r#"
            name = "classic-leaky"
            description = "Worked example"
            algorithm = "leaky"
            packets = [4, 2, 6, 8, 2]

            [config]
            capacity = 10
            rate = 3

            [[assertions]]
            type = "total_sent"
            min = 15
            max = 15

            [[assertions]]
            type = "total_dropped"
            min = 1
            max = 1

            [[assertions]]
            type = "peak_buffer"
            max = 10

            [[assertions]]
            type = "final_buffer"
            at_most = 6

            [[assertions]]
            type = "step_count"
            expected = 5
        "#,
        );

        let report = run_scenario(&scenario).unwrap();
        assert_eq!(report.summary.total_sent, 15);
    }

    #[test]
    fn failed_assertion_surfaces_as_error() {
        let scenario = parse(
            r#"
            name = "impossible"
            description = "Token run graded against an unreachable total"
            algorithm = "token"
            packets = [4, 2, 6, 8, 2]

            [config]
            capacity = 10
            rate = 3

            [[assertions]]
            type = "total_sent"
            min = 100
        "#,
        );

        let err = run_scenario(&scenario).unwrap_err();
        assert!(err.to_string().contains("total sent"));
    }

    #[test]
    fn loss_rate_assertion_uses_percent() {
        // Leaky classic run loses 1 of 22 units, about 4.5%
        let scenario = parse(
            r#"
            name = "loss-bound"
            description = "Loss stays under five percent"
            algorithm = "leaky"
            packets = [4, 2, 6, 8, 2]

            [[assertions]]
            type = "loss_rate_at_most"
            percent = 5.0
        "#,
        );

        assert!(run_scenario(&scenario).is_ok());
    }
}

use crate::config::ShapingConfig;
use crate::step::Algorithm;
use serde::Deserialize;

/// A lab scenario loaded from TOML: a workload plus the assertions that grade it.
#[derive(Deserialize, Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub algorithm: Algorithm,
    #[serde(default)]
    pub config: ShapingConfigOverride,
    pub packets: Vec<i64>,
    #[serde(default)]
    pub assertions: Vec<ScenarioAssertion>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ShapingConfigOverride {
    pub capacity: Option<i64>,
    pub rate: Option<i64>,
}

impl ShapingConfigOverride {
    pub fn apply_to(&self, config: &mut ShapingConfig) {
        if let Some(v) = self.capacity {
            config.capacity = v;
        }
        if let Some(v) = self.rate {
            config.rate = v;
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioAssertion {
    /// Assert that the total amount sent over the run is within range
    TotalSent { min: i64, max: Option<i64> },
    /// Assert that the total amount dropped over the run is within range
    TotalDropped { min: i64, max: Option<i64> },
    /// Assert that buffer occupancy never exceeds `max` at the end of any step
    PeakBuffer { max: i64 },
    /// Assert the buffer occupancy after the final step
    FinalBuffer { at_most: i64 },
    /// Assert that dropped/incoming stays at or below a percentage
    LossRateAtMost { percent: f64 },
    /// Assert the number of emitted steps (one per input packet)
    StepCount { expected: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_parses_from_toml() {
        let text = r#"
            name = "classic-leaky"
            description = "Worked example from the lab sheet"
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
            type = "peak_buffer"
            max = 10
        "#;

        let scenario: Scenario = toml::from_str(text).unwrap();
        assert_eq!(scenario.algorithm, Algorithm::Leaky);
        assert_eq!(scenario.packets, vec![4, 2, 6, 8, 2]);
        assert_eq!(scenario.config.capacity, Some(10));
        assert_eq!(scenario.assertions.len(), 2);

        let mut config = ShapingConfig {
            capacity: 1,
            rate: 1,
        };
        scenario.config.apply_to(&mut config);
        assert_eq!(config.capacity, 10);
        assert_eq!(config.rate, 3);
    }

    #[test]
    fn override_leaves_unset_fields_alone() {
        let partial = ShapingConfigOverride {
            capacity: None,
            rate: Some(5),
        };
        let mut config = ShapingConfig::default();
        partial.apply_to(&mut config);
        assert_eq!(config.capacity, 10);
        assert_eq!(config.rate, 5);
    }
}

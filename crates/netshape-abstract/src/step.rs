use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which shaping algorithm a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Leaky,
    Token,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Leaky => "leaky",
            Algorithm::Token => "token",
        }
    }

    /// Human-readable title used in tables and reports.
    pub fn title(&self) -> &'static str {
        match self {
            Algorithm::Leaky => "Leaky Bucket",
            Algorithm::Token => "Token Bucket",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leaky" | "leaky-bucket" => Ok(Algorithm::Leaky),
            "token" | "token-bucket" => Ok(Algorithm::Token),
            other => Err(format!(
                "unknown algorithm '{}' (expected 'leaky' or 'token')",
                other
            )),
        }
    }
}

/// One row of the simulation trace, covering a single discrete time unit.
///
/// `time` is 1-based and matches the packet's position in the input sequence.
/// The token fields are `None` for leaky-bucket runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimulationStep {
    pub time: u64,
    /// Packet size arriving at this time unit.
    pub incoming: i64,
    /// Buffer occupancy before admission.
    pub buffer_before: i64,
    /// Tokens present after generation, before consumption (token bucket only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_available: Option<i64>,
    /// Amount transmitted this time unit.
    pub sent: i64,
    /// Amount rejected this time unit.
    pub dropped: i64,
    /// Buffer occupancy at the end of the time unit.
    pub buffer_after: i64,
    /// Tokens remaining after consumption (token bucket only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_after: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::Algorithm;

    #[test]
    fn algorithm_parses_both_names() {
        assert_eq!("leaky".parse::<Algorithm>().unwrap(), Algorithm::Leaky);
        assert_eq!("Token".parse::<Algorithm>().unwrap(), Algorithm::Token);
        assert_eq!(
            "token-bucket".parse::<Algorithm>().unwrap(),
            Algorithm::Token
        );
        assert!("wfq".parse::<Algorithm>().is_err());
    }
}

use serde::{Deserialize, Serialize};

/// Bucket parameters for one simulation run.
///
/// `capacity` bounds the packet buffer in both algorithms and, for the token
/// bucket, also bounds the token pool. A single shared bound is the deliberate
/// simplification this lab teaches with; classic token-bucket designs size the
/// two independently.
///
/// Values are signed on purpose: the engines are defined for zero and negative
/// parameters too and just produce degenerate traces instead of failing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShapingConfig {
    /// Maximum buffer occupancy (and token ceiling for the token bucket).
    pub capacity: i64,
    /// Drain rate (leaky) or token-generation rate (token) per time unit.
    pub rate: i64,
}

impl Default for ShapingConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            rate: 3,
        }
    }
}

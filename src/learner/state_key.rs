//! Discretization of observations into table keys.
//!
//! A key is the comma-joined list of rounded feature values, in feature
//! order, e.g. `"-0.5,0,0.5,0.5,1,0.8"`. Rounding is half-up onto a grid of
//! 0.5 (positional features) or 0.2 (health and full-mode features).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::params::DiscretizationMode;
use crate::agent::Observation;

/// Grid resolution for positional features (steps of 0.5).
const COARSE_STEPS: f64 = 2.0;
/// Grid resolution for health and full-mode features (steps of 0.2).
const FINE_STEPS: f64 = 5.0;

/// Features read in coarse mode, paired with their grid resolution.
const COARSE_FEATURES: [(usize, f64); 6] = [
    (Observation::RELATIVE_X, COARSE_STEPS),
    (Observation::RELATIVE_Z, COARSE_STEPS),
    (Observation::DISTANCE, COARSE_STEPS),
    (Observation::RING_EDGE, COARSE_STEPS),
    (Observation::SELF_HEALTH, FINE_STEPS),
    (Observation::OPPONENT_HEALTH, FINE_STEPS),
];

/// Key of one row in an action-value table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateKey(String);

impl StateKey {
    /// Discretizes an observation.
    pub fn from_observation(observation: &Observation, mode: DiscretizationMode) -> Self {
        let values: Vec<f64> = match mode {
            DiscretizationMode::Coarse => COARSE_FEATURES
                .iter()
                .map(|&(index, steps)| quantize(observation[index], steps))
                .collect(),
            DiscretizationMode::Full => observation
                .as_slice()
                .iter()
                .map(|&v| quantize(v, FINE_STEPS))
                .collect(),
        };
        Self::from_values(&values)
    }

    fn from_values(values: &[f64]) -> Self {
        let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        Self(parts.join(","))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for StateKey {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rounds `value` half-up to the nearest multiple of `1 / steps`.
fn quantize(value: f64, steps: f64) -> f64 {
    // adding 0.0 folds −0 into 0 so both print the same
    (value * steps + 0.5).floor() / steps + 0.0
}

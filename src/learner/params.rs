//! Run parameters for training and evaluation.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How observations are reduced to table keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscretizationMode {
    /// Six features: relative position, distance, ring-edge distance, and
    /// both health values.
    #[default]
    Coarse,
    /// Every observation feature.
    Full,
}

impl From<bool> for DiscretizationMode {
    /// Maps the legacy `simpleMode` flag.
    fn from(simple: bool) -> Self {
        if simple {
            DiscretizationMode::Coarse
        } else {
            DiscretizationMode::Full
        }
    }
}

/// Whether a run updates the tables or only plays them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationMode {
    Train,
    Evaluate,
}

impl SimulationMode {
    pub fn is_training(self) -> bool {
        self == SimulationMode::Train
    }
}

/// Learning and episode parameters.
///
/// Deserialization fills any missing field with its default (see
/// [`SimulationParameters::default`]) and accepts the older `simpleMode`
/// boolean in place of `discretizationMode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawParameters")]
pub struct SimulationParameters {
    pub num_episodes: u32,
    pub max_steps: u32,
    /// Step size α of the value update.
    pub learning_rate: f64,
    /// Discount γ applied to the next state's best value.
    pub discount_factor: f64,
    /// Initial ε for epsilon-greedy selection.
    pub exploration_rate: f64,
    /// Multiplier applied to ε once per training tick.
    pub exploration_decay: f64,
    /// Floor for ε.
    pub min_exploration_rate: f64,
    pub discretization_mode: DiscretizationMode,
}

impl SimulationParameters {
    /// Checks every field, returning the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_steps == 0 {
            return Err(ConfigError::NonPositiveMaxSteps);
        }
        if self.num_episodes == 0 {
            return Err(ConfigError::NonPositiveEpisodes);
        }

        check_unit("learningRate", self.learning_rate)?;
        check_unit("discountFactor", self.discount_factor)?;
        check_unit("explorationRate", self.exploration_rate)?;
        check_unit("minExplorationRate", self.min_exploration_rate)?;
        if !(self.exploration_decay > 0.0 && self.exploration_decay <= 1.0) {
            return Err(ConfigError::InvalidRate {
                name: "explorationDecay",
                value: self.exploration_decay,
            });
        }

        if self.min_exploration_rate > self.exploration_rate {
            return Err(ConfigError::MinExplorationAboveStart {
                min: self.min_exploration_rate,
                start: self.exploration_rate,
            });
        }
        Ok(())
    }
}

fn check_unit(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { name, value })
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            num_episodes: 100,
            max_steps: 500,
            learning_rate: 0.1,
            discount_factor: 0.95,
            exploration_rate: 1.0,
            exploration_decay: 0.995,
            min_exploration_rate: 0.01,
            discretization_mode: DiscretizationMode::Coarse,
        }
    }
}

/// Wire shape accepted on input.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParameters {
    num_episodes: Option<u32>,
    max_steps: Option<u32>,
    learning_rate: Option<f64>,
    discount_factor: Option<f64>,
    exploration_rate: Option<f64>,
    exploration_decay: Option<f64>,
    min_exploration_rate: Option<f64>,
    discretization_mode: Option<DiscretizationMode>,
    simple_mode: Option<bool>,
}

impl From<RawParameters> for SimulationParameters {
    fn from(raw: RawParameters) -> Self {
        let d = SimulationParameters::default();
        Self {
            num_episodes: raw.num_episodes.unwrap_or(d.num_episodes),
            max_steps: raw.max_steps.unwrap_or(d.max_steps),
            learning_rate: raw.learning_rate.unwrap_or(d.learning_rate),
            discount_factor: raw.discount_factor.unwrap_or(d.discount_factor),
            exploration_rate: raw.exploration_rate.unwrap_or(d.exploration_rate),
            exploration_decay: raw.exploration_decay.unwrap_or(d.exploration_decay),
            min_exploration_rate: raw.min_exploration_rate.unwrap_or(d.min_exploration_rate),
            discretization_mode: raw
                .discretization_mode
                .or(raw.simple_mode.map(DiscretizationMode::from))
                .unwrap_or(d.discretization_mode),
        }
    }
}

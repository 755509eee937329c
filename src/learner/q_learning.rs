//! Epsilon-greedy tabular Q-learning for both fighters.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::params::SimulationParameters;
use super::snapshot::LearnerSnapshot;
use super::state_key::StateKey;
use super::table::ActionValueTable;
use crate::agent::{Action, Observation};
use crate::error::{ConfigError, SnapshotError};

/// Number of fighters, one table each.
pub const AGENT_COUNT: usize = 2;

/// Owns one action-value table per fighter and the exploration schedule.
///
/// # Lifecycle
///
/// 1. [`Learner::new`] with parameters and an RNG seed.
/// 2. [`Learner::set_training_mode`] for the run.
/// 3. Per tick: [`Learner::choose_action`] for each fighter, then
///    [`Learner::update`] with the observed transition, then
///    [`Learner::decay_exploration`].
#[derive(Debug)]
pub struct Learner {
    params: SimulationParameters,
    exploration_rate: f64,
    training: bool,
    tables: [ActionValueTable; AGENT_COUNT],
    rng: StdRng,
}

impl Learner {
    /// Creates a learner with empty tables, in training mode.
    pub fn new(params: SimulationParameters, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }

    /// Creates a learner drawing exploration decisions from `rng`.
    pub fn with_rng(params: SimulationParameters, rng: StdRng) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            exploration_rate: params.exploration_rate,
            params,
            training: true,
            tables: Default::default(),
            rng,
        })
    }

    /// Replaces the parameter set and restarts exploration from its
    /// initial rate. Tables are kept.
    pub fn configure(&mut self, params: SimulationParameters) -> Result<(), ConfigError> {
        params.validate()?;
        self.exploration_rate = params.exploration_rate;
        self.params = params;
        Ok(())
    }

    /// Switches between training and evaluation. Evaluation drops the
    /// exploration rate to its floor and freezes the tables.
    pub fn set_training_mode(&mut self, training: bool) {
        self.training = training;
        if !training {
            self.exploration_rate = self.params.min_exploration_rate;
        }
        log::debug!(
            "learner mode: {} (epsilon {:.4})",
            if training { "train" } else { "evaluate" },
            self.exploration_rate
        );
    }

    pub fn is_training(&self) -> bool {
        self.training
    }

    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.params
    }

    /// Table of fighter `agent`.
    pub fn table(&self, agent: usize) -> &ActionValueTable {
        &self.tables[agent]
    }

    /// Table key for an observation under the active discretization.
    pub fn state_key(&self, observation: &Observation) -> StateKey {
        StateKey::from_observation(observation, self.params.discretization_mode)
    }

    /// Picks an action for fighter `agent`.
    ///
    /// While training, explores uniformly with probability ε; otherwise
    /// takes the best-valued action, lowest index on ties.
    pub fn choose_action(&mut self, agent: usize, observation: &Observation) -> Action {
        let key = self.state_key(observation);
        if self.training && self.rng.gen::<f64>() < self.exploration_rate {
            return Action::nth(self.rng.gen_range(0..Action::COUNT));
        }
        self.tables[agent].best_action(&key)
    }

    /// One-step Q-learning update. No-op outside training.
    ///
    /// `Q[s][a] += α (r + γ max Q[s'] − Q[s][a])`
    pub fn update(
        &mut self,
        agent: usize,
        observation: &Observation,
        action: Action,
        reward: f64,
        next_observation: &Observation,
    ) {
        if !self.training {
            return;
        }

        let key = self.state_key(observation);
        let next_key = self.state_key(next_observation);
        let alpha = self.params.learning_rate;
        let gamma = self.params.discount_factor;

        let table = &mut self.tables[agent];
        let next_max = table.max_value(&next_key);
        let q = &mut table.row_mut(&key)[action.index()];
        *q += alpha * (reward + gamma * next_max - *q);
    }

    /// Multiplies ε by the decay factor, never going below the floor.
    /// No-op outside training.
    pub fn decay_exploration(&mut self) {
        if !self.training {
            return;
        }
        self.exploration_rate = (self.exploration_rate * self.params.exploration_decay)
            .max(self.params.min_exploration_rate);
    }

    /// Captures both tables and the parameters, with the current ε as the
    /// exploration rate.
    pub fn export_snapshot(&self) -> LearnerSnapshot {
        let params = SimulationParameters {
            exploration_rate: self.exploration_rate,
            ..self.params.clone()
        };
        let snapshot = LearnerSnapshot::capture(&self.tables, params);
        log::debug!(
            "exported snapshot: {} + {} rows",
            self.tables[0].len(),
            self.tables[1].len()
        );
        snapshot
    }

    /// Replaces both tables and reconfigures from the snapshot's
    /// parameters. On error the learner is left unchanged.
    pub fn import_snapshot(&mut self, snapshot: LearnerSnapshot) -> Result<(), SnapshotError> {
        let (tables, params) = snapshot.into_tables::<AGENT_COUNT>()?;
        self.configure(params)?;
        self.tables = tables;
        if !self.training {
            self.exploration_rate = self.params.min_exploration_rate;
        }
        log::debug!(
            "imported snapshot: {} + {} rows",
            self.tables[0].len(),
            self.tables[1].len()
        );
        Ok(())
    }
}

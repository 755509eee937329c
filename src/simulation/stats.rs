//! Episode outcomes and the running tally of a training run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of one episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    FirstWins,
    SecondWins,
    Draw,
}

impl Outcome {
    /// Decides the episode from the final tick's rewards: the higher reward
    /// wins, equal rewards draw.
    pub fn from_rewards(rewards: [f64; 2]) -> Self {
        if rewards[0] > rewards[1] {
            Outcome::FirstWins
        } else if rewards[1] > rewards[0] {
            Outcome::SecondWins
        } else {
            Outcome::Draw
        }
    }

    /// Slot in the win tally.
    pub fn index(self) -> usize {
        match self {
            Outcome::FirstWins => 0,
            Outcome::SecondWins => 1,
            Outcome::Draw => 2,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::FirstWins => write!(f, "fighter 0 wins"),
            Outcome::SecondWins => write!(f, "fighter 1 wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// Aggregates of a run: current episode index, `[fighter 0 wins, fighter 1
/// wins, draws]`, the exploration rate at the last boundary, and the step
/// index and rewards of the latest tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeStats {
    pub episode: u32,
    pub win_tally: [u32; 3],
    pub exploration_rate: f64,
    pub current_step: u32,
    pub rewards: [f64; 2],
}

impl EpisodeStats {
    pub fn new(exploration_rate: f64) -> Self {
        Self {
            episode: 0,
            win_tally: [0; 3],
            exploration_rate,
            current_step: 0,
            rewards: [0.0; 2],
        }
    }

    /// Remembers the latest tick.
    pub fn observe_tick(&mut self, step: u32, rewards: [f64; 2]) {
        self.current_step = step;
        self.rewards = rewards;
    }

    pub fn record(&mut self, outcome: Outcome) {
        self.win_tally[outcome.index()] += 1;
    }

    /// Episodes decided so far.
    pub fn episodes_played(&self) -> u32 {
        self.win_tally.iter().sum()
    }
}

impl fmt::Display for EpisodeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Run Stats ({} episodes) ===", self.episodes_played())?;
        writeln!(f, "  Fighter 0 wins:    {}", self.win_tally[0])?;
        writeln!(f, "  Fighter 1 wins:    {}", self.win_tally[1])?;
        writeln!(f, "  Draws:             {}", self.win_tally[2])?;
        writeln!(f, "  Exploration rate:  {:.4}", self.exploration_rate)?;
        writeln!(
            f,
            "  Last step:         {} (rewards {:.2} / {:.2})",
            self.current_step, self.rewards[0], self.rewards[1]
        )
    }
}

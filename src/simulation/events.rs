//! Payloads the simulation hands to its observers.

use serde::{Deserialize, Serialize};

use super::stats::{EpisodeStats, Outcome};
use crate::agent::AgentState;
use crate::RunId;

/// Published after every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickUpdate {
    pub agent_states: [AgentState; 2],
    /// Ticks taken in the current episode, counting this one.
    pub step_index: u32,
    pub rewards: [f64; 2],
}

/// Published when a training episode ends and the next one begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeComplete {
    /// Index of the episode about to start.
    pub episode_index: u32,
    pub outcome: Outcome,
    pub win_tally: [u32; 3],
    pub exploration_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// All episodes played.
    Completed,
    /// Stopped on request.
    Stopped,
}

/// Published once when a run ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationEnded {
    pub run_id: RunId,
    pub reason: EndReason,
    pub final_stats: EpisodeStats,
}

/// Episode transition produced by a tick, if any.
#[derive(Debug, Clone, PartialEq)]
pub enum EpisodeBoundary {
    Next(EpisodeComplete),
    Ended(SimulationEnded),
}

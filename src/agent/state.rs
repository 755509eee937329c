//! Per-tick fighter state published to observers.

use serde::{Deserialize, Serialize};

/// Snapshot of one fighter as streamed to a viewer each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentState {
    pub id: usize,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    pub orientation: f64,
    pub health: f64,
    pub energy: f64,
    pub stunned: bool,
    pub is_grounded: bool,
}

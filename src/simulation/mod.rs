//! Simulation loop: ticks, episodes, and run lifecycle.

pub mod events;
pub mod session;
pub mod stats;

#[cfg(test)]
mod tests;

pub use events::{EndReason, EpisodeBoundary, EpisodeComplete, SimulationEnded, TickUpdate};
pub use session::{LoopState, SimulationLoop, TickReport};
pub use stats::{EpisodeStats, Outcome};

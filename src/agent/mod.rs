//! Fighters: combat state, actions, and observations.

pub mod action;
pub mod fighter;
pub mod observation;
pub mod state;

pub use action::Action;
pub use fighter::{Agent, FighterBuild, MAX_ENERGY, MAX_HEALTH};
pub use observation::Observation;
pub use state::AgentState;

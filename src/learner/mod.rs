//! Tabular reinforcement learning for the two fighters.
//!
//! Each fighter has its own [`ActionValueTable`] keyed by a discretized
//! observation ([`StateKey`]). The [`Learner`] selects actions
//! epsilon-greedily, applies one-step Q-learning updates, and decays the
//! exploration rate while training.

pub mod params;
pub mod q_learning;
pub mod snapshot;
pub mod state_key;
pub mod table;

pub use params::{DiscretizationMode, SimulationMode, SimulationParameters};
pub use q_learning::{Learner, AGENT_COUNT};
pub use snapshot::LearnerSnapshot;
pub use state_key::StateKey;
pub use table::{ActionValueTable, ActionValues};

//! ringfight - two fighters in a circular ring, trained by tabular Q-learning.
//!
//! A [`PhysicsWorld`] integrates the fighters' bodies at a fixed time step,
//! [`Agent`]s turn discrete actions into movement and strikes, and a
//! [`Learner`] keeps one action-value table per fighter. The
//! [`SimulationLoop`] ties them together into episodes of training or
//! evaluation.

pub mod agent;
pub mod error;
pub mod learner;
pub mod physics;
pub mod simulation;

pub use agent::{Action, Agent, AgentState, Observation};
pub use error::{ConfigError, SnapshotError};
pub use learner::{
    DiscretizationMode, Learner, LearnerSnapshot, SimulationMode, SimulationParameters,
};
pub use physics::{BodyHandle, PhysicsConfig, PhysicsWorld, RigidBody, Vec3};
pub use simulation::{EpisodeBoundary, EpisodeStats, LoopState, SimulationLoop, TickReport};

/// Identifier of one training or evaluation run.
pub type RunId = String;

/// Generates a new unique run identifier (UUID v4).
pub fn generate_run_id() -> RunId {
    uuid::Uuid::new_v4().to_string()
}

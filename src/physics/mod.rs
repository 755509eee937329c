//! Arena physics: rigid bodies on a raised circular ring.

pub mod body;
pub mod config;
pub mod vector;
pub mod world;

pub use body::{BodyHandle, BodyMotion, RigidBody};
pub use config::PhysicsConfig;
pub use vector::{horizontal_distance, horizontal_length, planar, Vec3};
pub use world::{Collision, PhysicsWorld};

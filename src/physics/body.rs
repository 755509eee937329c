//! Rigid bodies and the handles used to refer to them.

use std::fmt;

use super::vector::Vec3;

/// Opaque reference to a body owned by a [`PhysicsWorld`](super::PhysicsWorld).
///
/// Handles are assigned in insertion order and stay valid until the world is
/// reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) usize);

impl BodyHandle {
    /// Position of the body in the world's table.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// A cylinder-like body: collides as a sphere of `radius`, rests on the
/// floor at half its `height`.
///
/// # Invariants
///
/// - `radius > 0`
/// - `mass > 0` unless `is_static`
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub mass: f64,
    pub radius: f64,
    pub height: f64,
    pub is_static: bool,
    pub is_grounded: bool,
}

impl RigidBody {
    /// Creates a dynamic body at rest.
    pub fn dynamic(position: Vec3, mass: f64, radius: f64, height: f64) -> Self {
        debug_assert!(mass > 0.0, "dynamic body needs positive mass");
        debug_assert!(radius > 0.0, "body radius must be positive");
        Self {
            position,
            velocity: Vec3::zeros(),
            mass,
            radius,
            height,
            is_static: false,
            is_grounded: false,
        }
    }

    /// Creates an immovable body. Static bodies take part in collisions but
    /// never receive impulses.
    pub fn fixed(position: Vec3, radius: f64, height: f64) -> Self {
        debug_assert!(radius > 0.0, "body radius must be positive");
        Self {
            position,
            velocity: Vec3::zeros(),
            mass: 0.0,
            radius,
            height,
            is_static: true,
            is_grounded: true,
        }
    }

    /// `1 / mass` for dynamic bodies, `0` for static ones.
    pub fn inverse_mass(&self) -> f64 {
        if self.is_static || self.mass <= 0.0 {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// The kinematic part of the body.
    pub fn motion(&self) -> BodyMotion {
        BodyMotion {
            position: self.position,
            velocity: self.velocity,
            is_grounded: self.is_grounded,
        }
    }
}

/// Position, velocity and contact flag of a body, exchanged as a whole
/// through [`PhysicsWorld::motion`](super::PhysicsWorld::motion) and
/// [`PhysicsWorld::set_motion`](super::PhysicsWorld::set_motion).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyMotion {
    pub position: Vec3,
    pub velocity: Vec3,
    pub is_grounded: bool,
}

//! Physical constants of the arena.

use qtty::{Quantity, Second};

/// Configuration for a [`PhysicsWorld`](super::PhysicsWorld).
///
/// Bundles gravity, ground friction, ring geometry, and collision response
/// coefficients. The ring is a disc centred on the origin of the floor plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConfig {
    /// Gravitational acceleration magnitude (m/s²), applied along −y.
    pub gravity: f64,
    /// Horizontal velocity damping rate while on the ground (per second).
    pub friction: f64,
    /// Radius of the ring floor.
    pub ring_radius: f64,
    /// Height of the ring floor above y = 0.
    pub ring_height: f64,
    /// Fixed integration increment.
    pub time_step: Quantity<Second>,
    /// Horizontal speed retained after bouncing off the ring edge.
    pub wall_damping: f64,
    /// Coefficient of restitution for body/body contacts.
    pub restitution: f64,
    /// Share of the penetration depth corrected per contact.
    pub correction_share: f64,
}

impl PhysicsConfig {
    /// Integration increment in seconds.
    pub fn dt(&self) -> f64 {
        self.time_step.value()
    }

    /// Height at which a body of the given `height` rests on the floor.
    pub fn ground_level(&self, height: f64) -> f64 {
        height / 2.0 + self.ring_height
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            friction: 0.3,
            ring_radius: 5.0,
            ring_height: 0.2,
            time_step: Quantity::<Second>::new(0.1),
            wall_damping: 0.8,
            restitution: 0.2,
            correction_share: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_arena() {
        let cfg = PhysicsConfig::default();
        assert_eq!(cfg.ring_radius, 5.0);
        assert!((cfg.dt() - 0.1).abs() < 1e-12);
        assert!((cfg.ground_level(1.5) - 0.95).abs() < 1e-12);
    }
}

//! Fixed-size observation vector fed to the learner.
//!
//! Layout (23 features):
//!
//! ```text
//! [0..9)   self:     x, z, vx, vz, sin θ, cos θ, health, energy, stunned
//! [9..18)  opponent: same nine features
//! [18]     opponent guarding (1 or 0)
//! [19..21) relative position to opponent (x, z)
//! [21]     distance to opponent
//! [22]     distance to ring edge
//! ```
//!
//! Positions are scaled by the ring radius, velocities and relative terms
//! by 10, health and energy by their maximum.

use std::ops::Index;

/// Observation of one fighter relative to its opponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation([f64; Observation::LEN]);

impl Observation {
    pub const LEN: usize = 23;

    /// Offset of the opponent block.
    pub const OPPONENT: usize = 9;
    pub const SELF_HEALTH: usize = 6;
    pub const OPPONENT_HEALTH: usize = Self::OPPONENT + 6;
    pub const OPPONENT_GUARDING: usize = 18;
    pub const RELATIVE_X: usize = 19;
    pub const RELATIVE_Z: usize = 20;
    pub const DISTANCE: usize = 21;
    pub const RING_EDGE: usize = 22;

    pub const fn from_array(values: [f64; Observation::LEN]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }
}

impl Index<usize> for Observation {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl Default for Observation {
    fn default() -> Self {
        Self([0.0; Observation::LEN])
    }
}

//! Vector helpers for the arena physics.
//!
//! The arena uses a y-up convention: `x` and `z` span the ring floor and
//! `y` is the vertical axis that gravity acts on.

use nalgebra::Vector3;

/// A position, velocity, or direction in arena space.
pub type Vec3 = Vector3<f64>;

/// Unit vector on the floor plane pointing along `angle` (radians, measured
/// from +x toward +z).
pub fn planar(angle: f64) -> Vec3 {
    Vec3::new(angle.cos(), 0.0, angle.sin())
}

/// Length of the projection onto the floor plane (ignores `y`).
pub fn horizontal_length(v: &Vec3) -> f64 {
    (v.x * v.x + v.z * v.z).sqrt()
}

/// Euclidean distance between two points on the floor plane.
pub fn horizontal_distance(a: &Vec3, b: &Vec3) -> f64 {
    horizontal_length(&(b - a))
}

/// Returns the components as `[x, y, z]`.
pub fn to_array(v: &Vec3) -> [f64; 3] {
    [v.x, v.y, v.z]
}

//! Fixed-timestep rigid-body world for the ring arena.
//!
//! Each step runs, per body: gravity → ground friction → integration →
//! ground clamp → ring confinement; then resolves every overlapping pair of
//! bodies with an impulse along the contact normal.

use qtty::{Quantity, Second};

use super::body::{BodyHandle, BodyMotion, RigidBody};
use super::config::PhysicsConfig;
use super::vector::{horizontal_length, planar, Vec3};

/// An overlapping pair found during a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub a: BodyHandle,
    pub b: BodyHandle,
    /// Centre distance at detection time.
    pub distance: f64,
}

/// Owns every rigid body in the arena.
///
/// Other components hold [`BodyHandle`]s and go through the accessor methods
/// to read or overwrite a body's motion.
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    config: PhysicsConfig,
    bodies: Vec<RigidBody>,
    elapsed: Quantity<Second>,
}

impl PhysicsWorld {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            bodies: Vec::new(),
            elapsed: Quantity::<Second>::new(0.0),
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Simulated time since the last reset.
    pub fn time(&self) -> Quantity<Second> {
        self.elapsed
    }

    /// Removes every body and rewinds the clock. Outstanding handles become
    /// invalid.
    pub fn reset(&mut self) {
        self.bodies.clear();
        self.elapsed = Quantity::<Second>::new(0.0);
    }

    /// Registers a body and returns its handle.
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        self.bodies.push(body);
        BodyHandle(self.bodies.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Returns the body behind `handle`, if it is registered.
    pub fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.0)
    }

    /// Returns the body behind `handle`.
    ///
    /// # Panics
    ///
    /// Panics if no body is registered for `handle`.
    pub fn body(&self, handle: BodyHandle) -> &RigidBody {
        match self.bodies.get(handle.0) {
            Some(body) => body,
            None => panic!("no body registered for {handle}"),
        }
    }

    fn body_mut(&mut self, handle: BodyHandle) -> &mut RigidBody {
        match self.bodies.get_mut(handle.0) {
            Some(body) => body,
            None => panic!("no body registered for {handle}"),
        }
    }

    /// Current position, velocity and contact flag of a body.
    pub fn motion(&self, handle: BodyHandle) -> BodyMotion {
        self.body(handle).motion()
    }

    /// Overwrites a body's motion and returns the previous one.
    ///
    /// # Panics
    ///
    /// Panics if no body is registered for `handle`.
    pub fn set_motion(&mut self, handle: BodyHandle, motion: BodyMotion) -> BodyMotion {
        let body = self.body_mut(handle);
        let previous = body.motion();
        body.position = motion.position;
        body.velocity = motion.velocity;
        body.is_grounded = motion.is_grounded;
        previous
    }

    /// Overwrites a body's velocity and returns the previous one.
    pub fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec3) -> Vec3 {
        let body = self.body_mut(handle);
        std::mem::replace(&mut body.velocity, velocity)
    }

    /// Horizontal distance of a body from the ring centre.
    pub fn distance_from_center(&self, handle: BodyHandle) -> f64 {
        horizontal_length(&self.body(handle).position)
    }

    /// True when the body's centre lies beyond the ring radius. Unknown
    /// handles are never out of the ring.
    pub fn is_out_of_ring(&self, handle: BodyHandle) -> bool {
        self.get(handle)
            .map(|b| horizontal_length(&b.position) > self.config.ring_radius)
            .unwrap_or(false)
    }

    /// Advances the world by the configured time step.
    pub fn step(&mut self) -> Vec<Collision> {
        self.step_by(self.config.dt())
    }

    /// Advances the world by `dt` seconds and returns the contacts found.
    pub fn step_by(&mut self, dt: f64) -> Vec<Collision> {
        self.elapsed = self.elapsed + Quantity::<Second>::new(dt);

        for body in &mut self.bodies {
            integrate(body, &self.config, dt);
        }

        let collisions = self.resolve_contacts();
        for c in &collisions {
            log::trace!("contact {} ↔ {} at {:.3}", c.a, c.b, c.distance);
        }
        collisions
    }

    fn resolve_contacts(&mut self) -> Vec<Collision> {
        let mut collisions = Vec::new();
        let n = self.bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = self.bodies.split_at_mut(j);
                if let Some(distance) = resolve_pair(&mut head[i], &mut tail[0], &self.config) {
                    collisions.push(Collision {
                        a: BodyHandle(i),
                        b: BodyHandle(j),
                        distance,
                    });
                }
            }
        }
        collisions
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

fn integrate(body: &mut RigidBody, config: &PhysicsConfig, dt: f64) {
    if body.is_static {
        return;
    }

    if body.mass > 0.0 {
        body.velocity.y -= config.gravity * dt;
    }

    let ground = config.ground_level(body.height);
    if body.position.y <= ground {
        let keep = 1.0 - config.friction * dt;
        body.velocity.x *= keep;
        body.velocity.z *= keep;
    }

    body.position += body.velocity * dt;

    if body.position.y < ground {
        body.position.y = ground;
        body.velocity.y = 0.0;
        body.is_grounded = true;
    } else {
        body.is_grounded = false;
    }

    confine_to_ring(body, config);
}

/// Pushes a body back onto the ring edge and bounces its horizontal velocity.
fn confine_to_ring(body: &mut RigidBody, config: &PhysicsConfig) {
    let limit = config.ring_radius - body.radius;
    if horizontal_length(&body.position) <= limit {
        return;
    }

    let angle = body.position.z.atan2(body.position.x);
    let normal = planar(angle);
    body.position.x = limit * normal.x;
    body.position.z = limit * normal.z;

    let along = body.velocity.x * normal.x + body.velocity.z * normal.z;
    body.velocity.x = (body.velocity.x - 2.0 * along * normal.x) * config.wall_damping;
    body.velocity.z = (body.velocity.z - 2.0 * along * normal.z) * config.wall_damping;
}

/// Resolves one pair. Returns the centre distance if the bodies overlap.
///
/// Coincident centres have no contact normal and are skipped.
fn resolve_pair(a: &mut RigidBody, b: &mut RigidBody, config: &PhysicsConfig) -> Option<f64> {
    let delta = b.position - a.position;
    let distance = delta.norm();
    let min_distance = a.radius + b.radius;
    if distance >= min_distance || distance == 0.0 {
        return None;
    }

    let normal = delta * (1.0 / distance);
    let along = (b.velocity - a.velocity).dot(&normal);
    if along >= 0.0 {
        return Some(distance);
    }

    let inv_a = a.inverse_mass();
    let inv_b = b.inverse_mass();
    let inv_sum = inv_a + inv_b;
    if inv_sum == 0.0 {
        return Some(distance);
    }

    let impulse = -(1.0 + config.restitution) * along / inv_sum;
    a.velocity -= normal * (impulse * inv_a);
    b.velocity += normal * (impulse * inv_b);

    let correction = (min_distance - distance) * config.correction_share;
    a.position -= normal * (correction * inv_a / inv_sum);
    b.position += normal * (correction * inv_b / inv_sum);

    Some(distance)
}

//! Fighter model: combat state on top of a physics body.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::action::Action;
use super::observation::Observation;
use super::state::AgentState;
use crate::physics::vector::{horizontal_distance, horizontal_length, planar, to_array};
use crate::physics::{BodyHandle, PhysicsWorld, RigidBody, Vec3};

pub const MAX_HEALTH: f64 = 100.0;
pub const MAX_ENERGY: f64 = 100.0;

/// Speed added by one movement action.
const MOVE_SPEED: f64 = 2.0;
const RETREAT_SCALE: f64 = 0.7;
const STRAFE_SCALE: f64 = 0.8;
const IDLE_RECOVERY: f64 = 2.0;
const RING_OUT_PENALTY: f64 = 50.0;
/// Opponents closer than this earn an engagement bonus.
const ENGAGE_DISTANCE: f64 = 3.0;

/// Static body measurements of a fighter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FighterBuild {
    pub height: f64,
    pub width: f64,
    pub depth: f64,
    pub mass: f64,
    pub radius: f64,
}

impl Default for FighterBuild {
    fn default() -> Self {
        Self {
            height: 1.5,
            width: 1.0,
            depth: 0.8,
            mass: 80.0,
            radius: 0.5,
        }
    }
}

/// Outcome table for one strike type.
struct Strike {
    range: f64,
    damage: f64,
    stun: u32,
    knockback: f64,
    reward: f64,
    blocked_damage: f64,
    blocked_reward: f64,
    miss_penalty: f64,
}

const SHORT_STRIKE: Strike = Strike {
    range: 1.5,
    damage: 10.0,
    stun: 2,
    knockback: 0.0,
    reward: 15.0,
    blocked_damage: 5.0,
    blocked_reward: 5.0,
    miss_penalty: 2.0,
};

const LONG_STRIKE: Strike = Strike {
    range: 2.0,
    damage: 20.0,
    stun: 3,
    knockback: 5.0,
    reward: 25.0,
    blocked_damage: 10.0,
    blocked_reward: 10.0,
    miss_penalty: 5.0,
};

/// One of the two fighters in the ring.
///
/// The fighter keeps a local copy of its body's position and velocity,
/// refreshed with [`Agent::sync_from_physics`]. Velocity changes made by an
/// action are written back to the world immediately; positions only change
/// when the world steps.
#[derive(Debug, Clone)]
pub struct Agent {
    id: usize,
    handle: BodyHandle,
    build: FighterBuild,
    ring_radius: f64,
    pub(crate) position: Vec3,
    pub(crate) velocity: Vec3,
    pub(crate) orientation: f64,
    pub(crate) is_grounded: bool,
    pub(crate) health: f64,
    pub(crate) energy: f64,
    pub(crate) stun: u32,
    pub(crate) blocking: bool,
}

impl Agent {
    /// Creates fighter `id` (0 or 1) and registers its body with `world`.
    ///
    /// Fighter 0 starts at x = 2 with orientation 0, fighter 1 at x = −2
    /// with orientation π.
    pub fn spawn(id: usize, world: &mut PhysicsWorld) -> Self {
        Self::spawn_with_build(id, FighterBuild::default(), world)
    }

    pub fn spawn_with_build(id: usize, build: FighterBuild, world: &mut PhysicsWorld) -> Self {
        debug_assert!(id < 2, "fighter id must be 0 or 1");
        let position = start_position(id, &build);
        let handle = world.add_body(Self::body_at(position, &build));
        Self {
            id,
            handle,
            build,
            ring_radius: world.config().ring_radius,
            position,
            velocity: Vec3::zeros(),
            orientation: start_orientation(id),
            is_grounded: true,
            health: MAX_HEALTH,
            energy: MAX_ENERGY,
            stun: 0,
            blocking: false,
        }
    }

    fn body_at(position: Vec3, build: &FighterBuild) -> RigidBody {
        let mut body = RigidBody::dynamic(position, build.mass, build.radius, build.height);
        body.is_grounded = true;
        body
    }

    /// Puts the fighter back on its starting mark with full health and
    /// energy.
    ///
    /// If the world was cleared, the body is registered again; fighters must
    /// then be reset in id order so each gets its original handle back.
    pub fn reset(&mut self, world: &mut PhysicsWorld) {
        self.position = start_position(self.id, &self.build);
        self.velocity = Vec3::zeros();
        self.orientation = start_orientation(self.id);
        self.is_grounded = true;
        self.health = MAX_HEALTH;
        self.energy = MAX_ENERGY;
        self.stun = 0;
        self.blocking = false;

        let body = Self::body_at(self.position, &self.build);
        if world.get(self.handle).is_some() {
            world.set_motion(self.handle, body.motion());
        } else {
            let handle = world.add_body(body);
            assert_eq!(
                handle, self.handle,
                "fighter {} re-registered out of order",
                self.id
            );
        }
    }

    /// Pulls position, velocity and ground contact from the world.
    pub fn sync_from_physics(&mut self, world: &PhysicsWorld) {
        let motion = world.motion(self.handle);
        self.position = motion.position;
        self.velocity = motion.velocity;
        self.is_grounded = motion.is_grounded;
    }

    /// Builds this fighter's observation of the match.
    pub fn observe(&self, opponent: &Agent) -> Observation {
        let mut values = [0.0; Observation::LEN];
        values[..Observation::OPPONENT].copy_from_slice(&self.own_features());
        values[Observation::OPPONENT..Observation::OPPONENT_GUARDING]
            .copy_from_slice(&opponent.own_features());
        values[Observation::OPPONENT_GUARDING] = flag(opponent.blocking);

        let offset = opponent.position - self.position;
        values[Observation::RELATIVE_X] = offset.x / 10.0;
        values[Observation::RELATIVE_Z] = offset.z / 10.0;
        values[Observation::DISTANCE] = horizontal_length(&offset) / 10.0;
        values[Observation::RING_EDGE] =
            (self.ring_radius - horizontal_length(&self.position)) / self.ring_radius;

        Observation::from_array(values)
    }

    fn own_features(&self) -> [f64; 9] {
        [
            self.position.x / self.ring_radius,
            self.position.z / self.ring_radius,
            self.velocity.x / 10.0,
            self.velocity.z / 10.0,
            self.orientation.sin(),
            self.orientation.cos(),
            self.health / MAX_HEALTH,
            self.energy / MAX_ENERGY,
            flag(self.is_stunned()),
        ]
    }

    /// Carries out `action` against `opponent` and returns this tick's
    /// reward.
    ///
    /// A stunned fighter loses the turn: the stun counter drops by one and
    /// the reward is 0.
    pub fn apply_action(
        &mut self,
        action: Action,
        opponent: &mut Agent,
        world: &mut PhysicsWorld,
    ) -> f64 {
        if self.stun > 0 {
            self.stun -= 1;
            return 0.0;
        }

        let mut reward = 0.0;

        self.energy = (self.energy - action.energy_cost()).max(0.0);
        if action == Action::Idle {
            self.energy = (self.energy + IDLE_RECOVERY).min(MAX_ENERGY);
        }

        let forward = planar(self.orientation);
        let right = planar(self.orientation + FRAC_PI_2);

        match action {
            Action::Advance => self.velocity += forward * MOVE_SPEED,
            Action::Retreat => self.velocity -= forward * (MOVE_SPEED * RETREAT_SCALE),
            Action::StrafeLeft => self.velocity -= right * (MOVE_SPEED * STRAFE_SCALE),
            Action::StrafeRight => self.velocity += right * (MOVE_SPEED * STRAFE_SCALE),
            Action::StrikeShort => reward += self.strike(&SHORT_STRIKE, opponent, world),
            Action::StrikeLong => reward += self.strike(&LONG_STRIKE, opponent, world),
            Action::Guard | Action::Idle => {}
        }

        world.set_velocity(self.handle, self.velocity);
        self.blocking = action == Action::Guard;

        if world.is_out_of_ring(self.handle) {
            self.health = 0.0;
            reward -= RING_OUT_PENALTY;
        }

        reward += (MAX_HEALTH - opponent.health) * 0.1;
        reward -= (MAX_HEALTH - self.health) * 0.1;
        reward += self.energy * 0.01;

        let distance = horizontal_distance(&self.position, &opponent.position);
        if distance < ENGAGE_DISTANCE {
            reward += (ENGAGE_DISTANCE - distance) * 0.5;
        }

        reward
    }

    fn strike(&self, strike: &Strike, opponent: &mut Agent, world: &mut PhysicsWorld) -> f64 {
        if !(self.in_range(opponent, strike.range) && self.is_facing(opponent)) {
            return -strike.miss_penalty;
        }

        if opponent.blocking {
            opponent.take_damage(strike.blocked_damage);
            return strike.blocked_reward;
        }

        opponent.take_damage(strike.damage);
        opponent.stun = strike.stun;
        if strike.knockback > 0.0 {
            opponent.velocity += planar(self.orientation) * strike.knockback;
            world.set_velocity(opponent.handle, opponent.velocity);
        }
        strike.reward
    }

    fn take_damage(&mut self, amount: f64) {
        self.health = (self.health - amount).max(0.0);
    }

    fn in_range(&self, opponent: &Agent, range: f64) -> bool {
        horizontal_distance(&self.position, &opponent.position) <= range
    }

    /// True when the opponent lies within ±90° of the facing direction.
    fn is_facing(&self, opponent: &Agent) -> bool {
        let offset = opponent.position - self.position;
        let bearing = offset.z.atan2(offset.x);
        wrap_angle(bearing - self.orientation).abs() <= FRAC_PI_2
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn handle(&self) -> BodyHandle {
        self.handle
    }

    pub fn build(&self) -> &FighterBuild {
        &self.build
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn stun_ticks(&self) -> u32 {
        self.stun
    }

    pub fn is_stunned(&self) -> bool {
        self.stun > 0
    }

    pub fn is_blocking(&self) -> bool {
        self.blocking
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }

    /// Payload for observers.
    pub fn state(&self) -> AgentState {
        AgentState {
            id: self.id,
            position: to_array(&self.position),
            velocity: to_array(&self.velocity),
            orientation: self.orientation,
            health: self.health,
            energy: self.energy,
            stunned: self.is_stunned(),
            is_grounded: self.is_grounded,
        }
    }
}

fn start_position(id: usize, build: &FighterBuild) -> Vec3 {
    let x = if id == 0 { 2.0 } else { -2.0 };
    Vec3::new(x, build.height / 2.0, 0.0)
}

fn start_orientation(id: usize) -> f64 {
    if id == 0 {
        0.0
    } else {
        PI
    }
}

fn flag(on: bool) -> f64 {
    if on {
        1.0
    } else {
        0.0
    }
}

/// Wraps an angle into [−π, π].
fn wrap_angle(mut angle: f64) -> f64 {
    while angle > PI {
        angle -= TAU;
    }
    while angle < -PI {
        angle += TAU;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::BodyMotion;

    const EPS: f64 = 1e-9;

    fn arena() -> (PhysicsWorld, Agent, Agent) {
        let mut world = PhysicsWorld::default();
        let a = Agent::spawn(0, &mut world);
        let b = Agent::spawn(1, &mut world);
        (world, a, b)
    }

    fn place(agent: &mut Agent, world: &mut PhysicsWorld, x: f64, z: f64) {
        let y = agent.position.y;
        world.set_motion(
            agent.handle(),
            BodyMotion {
                position: Vec3::new(x, y, z),
                velocity: Vec3::zeros(),
                is_grounded: true,
            },
        );
        agent.sync_from_physics(world);
    }

    /// Attacker at the centre facing +x, target `distance` ahead.
    fn face_off(distance: f64) -> (PhysicsWorld, Agent, Agent) {
        let (mut world, mut a, mut b) = arena();
        place(&mut a, &mut world, 0.0, 0.0);
        place(&mut b, &mut world, distance, 0.0);
        a.orientation = 0.0;
        (world, a, b)
    }

    /// Reward terms that do not depend on the action outcome.
    fn ambient(me: &Agent, opponent: &Agent) -> f64 {
        let d = horizontal_distance(&me.position, &opponent.position);
        let mut r = (MAX_HEALTH - opponent.health) * 0.1 - (MAX_HEALTH - me.health) * 0.1
            + me.energy * 0.01;
        if d < ENGAGE_DISTANCE {
            r += (ENGAGE_DISTANCE - d) * 0.5;
        }
        r
    }

    #[test]
    fn fighters_spawn_on_opposite_marks() {
        let (world, a, b) = arena();
        assert_eq!(a.handle().index(), 0);
        assert_eq!(b.handle().index(), 1);
        assert_eq!(a.position().x, 2.0);
        assert_eq!(b.position().x, -2.0);
        assert_eq!(a.orientation(), 0.0);
        assert!((b.orientation() - PI).abs() < EPS);
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn short_strike_hits_unguarded_opponent() {
        let (mut world, mut a, mut b) = face_off(1.0);
        let reward = a.apply_action(Action::StrikeShort, &mut b, &mut world);
        assert_eq!(b.health(), 90.0);
        assert_eq!(b.stun_ticks(), 2);
        assert_eq!(a.energy(), 95.0);
        // 15 hit + 1 damage dealt + 0.95 energy + 1 engagement
        assert!((reward - (15.0 + ambient(&a, &b))).abs() < EPS);
        assert!((reward - 17.95).abs() < EPS);
    }

    #[test]
    fn short_strike_on_guard_is_reduced() {
        let (mut world, mut a, mut b) = face_off(1.0);
        b.blocking = true;
        let reward = a.apply_action(Action::StrikeShort, &mut b, &mut world);
        assert_eq!(b.health(), 95.0);
        assert_eq!(b.stun_ticks(), 0);
        assert!((reward - (5.0 + ambient(&a, &b))).abs() < EPS);
    }

    #[test]
    fn strike_behind_misses() {
        let (mut world, mut a, mut b) = face_off(-1.0);
        let reward = a.apply_action(Action::StrikeShort, &mut b, &mut world);
        assert_eq!(b.health(), MAX_HEALTH);
        assert!((reward - (-2.0 + ambient(&a, &b))).abs() < EPS);
    }

    #[test]
    fn short_strike_out_of_range_misses() {
        let (mut world, mut a, mut b) = face_off(1.6);
        let reward = a.apply_action(Action::StrikeShort, &mut b, &mut world);
        assert_eq!(b.health(), MAX_HEALTH);
        assert!((reward - (-2.0 + ambient(&a, &b))).abs() < EPS);
    }

    #[test]
    fn long_strike_knocks_back() {
        let (mut world, mut a, mut b) = face_off(1.8);
        let reward = a.apply_action(Action::StrikeLong, &mut b, &mut world);
        assert_eq!(b.health(), 80.0);
        assert_eq!(b.stun_ticks(), 3);
        assert!((world.motion(b.handle()).velocity.x - 5.0).abs() < EPS);
        assert!((reward - (25.0 + ambient(&a, &b))).abs() < EPS);
    }

    #[test]
    fn long_strike_miss_penalty() {
        let (mut world, mut a, mut b) = face_off(2.5);
        let reward = a.apply_action(Action::StrikeLong, &mut b, &mut world);
        assert_eq!(b.health(), MAX_HEALTH);
        assert!((reward - (-5.0 + ambient(&a, &b))).abs() < EPS);
    }

    #[test]
    fn stunned_fighter_loses_turn() {
        let (mut world, mut a, mut b) = arena();
        a.stun = 2;
        let reward = a.apply_action(Action::StrikeLong, &mut b, &mut world);
        assert_eq!(reward, 0.0);
        assert_eq!(a.stun_ticks(), 1);
        assert_eq!(a.energy(), MAX_ENERGY);
    }

    #[test]
    fn movement_writes_velocity_to_world() {
        let (mut world, mut a, mut b) = arena();
        b.apply_action(Action::Advance, &mut a, &mut world);
        // fighter 1 faces −x
        assert!((b.velocity().x + 2.0).abs() < EPS);
        assert!((world.motion(b.handle()).velocity.x + 2.0).abs() < EPS);

        a.apply_action(Action::Retreat, &mut b, &mut world);
        assert!((world.motion(a.handle()).velocity.x + 1.4).abs() < EPS);

        a.apply_action(Action::StrafeRight, &mut b, &mut world);
        assert!((world.motion(a.handle()).velocity.z - 1.6).abs() < EPS);
    }

    #[test]
    fn energy_is_clamped() {
        let (mut world, mut a, mut b) = arena();
        a.energy = 3.0;
        a.apply_action(Action::StrikeShort, &mut b, &mut world);
        assert_eq!(a.energy(), 0.0);

        a.energy = 99.5;
        a.apply_action(Action::Idle, &mut b, &mut world);
        assert_eq!(a.energy(), MAX_ENERGY);
    }

    #[test]
    fn guard_lasts_one_action() {
        let (mut world, mut a, mut b) = arena();
        a.apply_action(Action::Guard, &mut b, &mut world);
        assert!(a.is_blocking());
        a.apply_action(Action::Idle, &mut b, &mut world);
        assert!(!a.is_blocking());
    }

    #[test]
    fn leaving_the_ring_is_fatal() {
        let (mut world, mut a, mut b) = arena();
        place(&mut a, &mut world, 5.2, 0.0);
        assert!(world.is_out_of_ring(a.handle()));
        let reward = a.apply_action(Action::Idle, &mut b, &mut world);
        assert_eq!(a.health(), 0.0);
        assert!(a.is_defeated());
        // −50 ring out, −10 damage taken, +1 energy
        assert!((reward + 59.0).abs() < EPS);
    }

    #[test]
    fn observation_features() {
        let (_world, a, b) = arena();
        let obs = a.observe(&b);
        assert_eq!(obs.as_slice().len(), Observation::LEN);
        assert!((obs[0] - 0.4).abs() < EPS);
        assert!((obs[Observation::OPPONENT] + 0.4).abs() < EPS);
        assert_eq!(obs[Observation::SELF_HEALTH], 1.0);
        assert_eq!(obs[Observation::OPPONENT_HEALTH], 1.0);
        assert!((obs[Observation::RELATIVE_X] + 0.4).abs() < EPS);
        assert!((obs[Observation::DISTANCE] - 0.4).abs() < EPS);
        assert!((obs[Observation::RING_EDGE] - 0.6).abs() < EPS);
        assert_eq!(obs[Observation::OPPONENT_GUARDING], 0.0);
    }

    #[test]
    fn reset_after_world_reset_keeps_handles() {
        let (mut world, mut a, mut b) = arena();
        a.health = 10.0;
        b.energy = 0.0;
        b.stun = 3;
        world.reset();
        a.reset(&mut world);
        b.reset(&mut world);
        assert_eq!(a.handle().index(), 0);
        assert_eq!(b.handle().index(), 1);
        assert_eq!(a.health(), MAX_HEALTH);
        assert_eq!(b.energy(), MAX_ENERGY);
        assert_eq!(b.stun_ticks(), 0);
        assert_eq!(world.motion(b.handle()).position.x, -2.0);
    }

    #[test]
    fn wrap_angle_into_half_turn() {
        assert!((wrap_angle(3.0 * PI / 2.0) + FRAC_PI_2).abs() < EPS);
        assert!((wrap_angle(-3.0 * PI / 2.0) - FRAC_PI_2).abs() < EPS);
        assert_eq!(wrap_angle(0.5), 0.5);
    }
}

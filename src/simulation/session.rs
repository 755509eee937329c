//! Tick orchestration and the episode state machine.
//!
//! ```text
//! Idle ──start──▶ Running ──episode ends──▶ Running (next episode)
//!                    │                  └──▶ Ended (last episode)
//!                    └──stop──▶ Ended
//! ```

use super::events::{
    EndReason, EpisodeBoundary, EpisodeComplete, SimulationEnded, TickUpdate,
};
use super::stats::{EpisodeStats, Outcome};
use crate::agent::Agent;
use crate::error::{ConfigError, SnapshotError};
use crate::learner::{Learner, LearnerSnapshot, SimulationMode, SimulationParameters};
use crate::physics::{Collision, PhysicsConfig, PhysicsWorld};
use crate::{generate_run_id, RunId};

/// Lifecycle state of a [`SimulationLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running { mode: SimulationMode },
    Ended,
}

/// Everything produced by one tick.
#[derive(Debug, Clone)]
pub struct TickReport {
    pub update: TickUpdate,
    pub collisions: Vec<Collision>,
    pub boundary: Option<EpisodeBoundary>,
}

/// Two fighters, their arena, and the learner training them.
///
/// The loop is driven externally: call [`SimulationLoop::tick`] at whatever
/// cadence the caller chooses while [`SimulationLoop::is_running`] holds.
/// Learned tables survive episode resets and new runs; only a snapshot
/// import replaces them.
#[derive(Debug)]
pub struct SimulationLoop {
    world: PhysicsWorld,
    agents: [Agent; 2],
    learner: Learner,
    params: SimulationParameters,
    state: LoopState,
    stats: EpisodeStats,
    step: u32,
    run_id: RunId,
}

impl SimulationLoop {
    /// Creates an idle loop with the default arena.
    pub fn new(seed: u64) -> Self {
        Self::with_physics(PhysicsConfig::default(), seed)
    }

    /// Creates an idle loop; `seed` drives exploration.
    pub fn with_physics(physics: PhysicsConfig, seed: u64) -> Self {
        let mut world = PhysicsWorld::new(physics);
        let agents = [Agent::spawn(0, &mut world), Agent::spawn(1, &mut world)];
        let params = SimulationParameters::default();
        let learner = match Learner::new(params.clone(), seed) {
            Ok(learner) => learner,
            Err(e) => unreachable!("default parameters are valid: {e}"),
        };
        Self {
            world,
            agents,
            learner,
            stats: EpisodeStats::new(params.exploration_rate),
            params,
            state: LoopState::Idle,
            step: 0,
            run_id: RunId::new(),
        }
    }

    /// Begins a run. Rejects invalid parameters without touching the
    /// current state.
    pub fn start(
        &mut self,
        params: SimulationParameters,
        mode: SimulationMode,
    ) -> Result<(), ConfigError> {
        self.learner.configure(params.clone())?;
        self.learner.set_training_mode(mode.is_training());
        self.params = params;

        self.reset_arena();
        self.stats = EpisodeStats::new(self.learner.exploration_rate());
        self.step = 0;
        self.run_id = generate_run_id();
        self.state = LoopState::Running { mode };

        log::info!(
            "run {} started: {:?}, {} episodes x {} steps",
            self.run_id,
            mode,
            self.params.num_episodes,
            self.params.max_steps
        );
        Ok(())
    }

    /// Ends the run immediately. Returns the end payload, or `None` if no
    /// run was in progress.
    pub fn stop(&mut self) -> Option<SimulationEnded> {
        if !self.is_running() {
            log::warn!("stop requested while {:?}", self.state);
            return None;
        }
        Some(self.end(EndReason::Stopped))
    }

    /// Plays one decision tick.
    ///
    /// # Panics
    ///
    /// Panics unless the loop is running.
    pub fn tick(&mut self) -> TickReport {
        let mode = match self.state {
            LoopState::Running { mode } => mode,
            other => panic!("tick requires a running simulation (state {other:?})"),
        };

        for agent in &mut self.agents {
            agent.sync_from_physics(&self.world);
        }
        let [first, second] = &mut self.agents;

        let observations = [first.observe(second), second.observe(first)];
        let actions = [
            self.learner.choose_action(0, &observations[0]),
            self.learner.choose_action(1, &observations[1]),
        ];

        let rewards = [
            first.apply_action(actions[0], second, &mut self.world),
            second.apply_action(actions[1], first, &mut self.world),
        ];

        let collisions = self.world.step();
        first.sync_from_physics(&self.world);
        second.sync_from_physics(&self.world);

        let next = [first.observe(second), second.observe(first)];
        for i in 0..2 {
            self.learner
                .update(i, &observations[i], actions[i], rewards[i], &next[i]);
        }
        self.learner.decay_exploration();

        self.step += 1;
        log::trace!(
            "step {}: {} / {} -> rewards {:.3} / {:.3}",
            self.step,
            actions[0],
            actions[1],
            rewards[0],
            rewards[1]
        );

        self.stats.observe_tick(self.step, rewards);

        let update = TickUpdate {
            agent_states: [first.state(), second.state()],
            step_index: self.step,
            rewards,
        };

        let done = first.is_defeated()
            || second.is_defeated()
            || self.step >= self.params.max_steps;
        let boundary = done.then(|| self.finish_episode(rewards, mode));

        TickReport {
            update,
            collisions,
            boundary,
        }
    }

    /// Ticks until the run ends and returns the end payload.
    ///
    /// # Panics
    ///
    /// Panics unless the loop is running.
    pub fn run_to_end(&mut self) -> SimulationEnded {
        loop {
            if let Some(EpisodeBoundary::Ended(ended)) = self.tick().boundary {
                return ended;
            }
        }
    }

    fn finish_episode(&mut self, rewards: [f64; 2], mode: SimulationMode) -> EpisodeBoundary {
        let outcome = Outcome::from_rewards(rewards);
        self.stats.record(outcome);
        self.stats.exploration_rate = self.learner.exploration_rate();

        let more = self.stats.episode + 1 < self.params.num_episodes;
        if !(mode.is_training() && more) {
            log::info!("run {}: final episode {}", self.run_id, outcome);
            return EpisodeBoundary::Ended(self.end(EndReason::Completed));
        }

        self.stats.episode += 1;
        self.step = 0;
        self.reset_arena();
        log::info!(
            "run {}: episode {} -> {} (tally {:?}, epsilon {:.4})",
            self.run_id,
            self.stats.episode,
            outcome,
            self.stats.win_tally,
            self.stats.exploration_rate
        );

        EpisodeBoundary::Next(EpisodeComplete {
            episode_index: self.stats.episode,
            outcome,
            win_tally: self.stats.win_tally,
            exploration_rate: self.stats.exploration_rate,
        })
    }

    fn end(&mut self, reason: EndReason) -> SimulationEnded {
        self.state = LoopState::Ended;
        log::info!(
            "run {} ended ({:?}): tally {:?}",
            self.run_id,
            reason,
            self.stats.win_tally
        );
        SimulationEnded {
            run_id: self.run_id.clone(),
            reason,
            final_stats: self.stats.clone(),
        }
    }

    /// Clears the world and puts both fighters back on their marks.
    fn reset_arena(&mut self) {
        self.world.reset();
        for agent in &mut self.agents {
            agent.reset(&mut self.world);
        }
    }

    /// Captures the learner. Must not be called while a tick is in flight.
    pub fn export_snapshot(&self) -> LearnerSnapshot {
        self.learner.export_snapshot()
    }

    /// Replaces the learner's tables and parameters.
    pub fn import_snapshot(&mut self, snapshot: LearnerSnapshot) -> Result<(), SnapshotError> {
        self.learner.import_snapshot(snapshot)?;
        self.params = self.learner.parameters().clone();
        Ok(())
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    /// Ticks taken in the current episode.
    pub fn step_index(&self) -> u32 {
        self.step
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn learner(&self) -> &Learner {
        &self.learner
    }

    pub fn agents(&self) -> &[Agent; 2] {
        &self.agents
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub(crate) fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }
}

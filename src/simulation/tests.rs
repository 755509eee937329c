//! Scenario tests for the simulation loop.

use super::*;
use crate::learner::{SimulationMode, SimulationParameters};
use crate::physics::{BodyMotion, Vec3};

fn greedy(num_episodes: u32, max_steps: u32) -> SimulationParameters {
    SimulationParameters {
        num_episodes,
        max_steps,
        exploration_rate: 0.0,
        min_exploration_rate: 0.0,
        ..SimulationParameters::default()
    }
}

fn exploring(num_episodes: u32, max_steps: u32) -> SimulationParameters {
    SimulationParameters {
        num_episodes,
        max_steps,
        exploration_decay: 0.95,
        min_exploration_rate: 0.05,
        ..SimulationParameters::default()
    }
}

mod lifecycle {
    use super::*;

    #[test]
    fn new_loop_is_idle() {
        let sim = SimulationLoop::new(1);
        assert_eq!(sim.state(), LoopState::Idle);
        assert!(!sim.is_running());
    }

    #[test]
    #[should_panic(expected = "tick requires a running simulation")]
    fn tick_before_start_panics() {
        let mut sim = SimulationLoop::new(1);
        sim.tick();
    }

    #[test]
    fn invalid_parameters_rejected_at_start() {
        let mut sim = SimulationLoop::new(1);
        let result = sim.start(greedy(1, 0), SimulationMode::Train);
        assert!(result.is_err());
        assert_eq!(sim.state(), LoopState::Idle);
    }

    #[test]
    fn stop_when_idle_is_a_no_op() {
        let mut sim = SimulationLoop::new(1);
        assert!(sim.stop().is_none());
        assert_eq!(sim.state(), LoopState::Idle);
    }

    #[test]
    fn stop_ends_the_run_between_ticks() {
        let mut sim = SimulationLoop::new(1);
        sim.start(greedy(10, 100), SimulationMode::Train).unwrap();
        sim.tick();
        sim.tick();
        let ended = sim.stop().expect("run was active");
        assert_eq!(ended.reason, EndReason::Stopped);
        assert_eq!(ended.run_id, sim.run_id());
        assert_eq!(sim.state(), LoopState::Ended);
        assert!(sim.stop().is_none());
    }

    #[test]
    #[should_panic(expected = "tick requires a running simulation")]
    fn tick_after_stop_panics() {
        let mut sim = SimulationLoop::new(1);
        sim.start(greedy(1, 100), SimulationMode::Evaluate).unwrap();
        sim.stop();
        sim.tick();
    }

    #[test]
    fn start_resets_the_arena() {
        let mut sim = SimulationLoop::new(1);
        sim.start(greedy(1, 100), SimulationMode::Train).unwrap();
        for _ in 0..5 {
            sim.tick();
        }
        sim.start(greedy(1, 100), SimulationMode::Train).unwrap();
        assert_eq!(sim.step_index(), 0);
        assert_eq!(sim.world().len(), 2);
        assert_eq!(sim.agents()[0].position().x, 2.0);
        assert_eq!(sim.agents()[1].position().x, -2.0);
        assert_eq!(sim.stats().win_tally, [0, 0, 0]);
    }
}

mod episodes {
    use super::*;

    #[test]
    fn evaluation_ends_at_max_steps_exactly_once() {
        let mut sim = SimulationLoop::new(1);
        sim.start(greedy(4, 5), SimulationMode::Evaluate).unwrap();

        for step in 1..=4 {
            let report = sim.tick();
            assert_eq!(report.update.step_index, step);
            assert!(report.boundary.is_none());
        }
        let report = sim.tick();
        assert_eq!(report.update.step_index, 5);
        match report.boundary {
            Some(EpisodeBoundary::Ended(ended)) => {
                assert_eq!(ended.reason, EndReason::Completed);
                assert_eq!(ended.final_stats.episodes_played(), 1);
                assert_eq!(ended.final_stats.current_step, 5);
                assert_eq!(ended.final_stats.rewards, report.update.rewards);
            }
            other => panic!("expected end of run, got {other:?}"),
        }
        assert_eq!(sim.state(), LoopState::Ended);
    }

    #[test]
    fn training_runs_every_episode() {
        let mut sim = SimulationLoop::new(1);
        sim.start(greedy(3, 4), SimulationMode::Train).unwrap();

        let mut boundaries = Vec::new();
        for tick in 1..=12 {
            let report = sim.tick();
            assert_eq!(report.update.step_index, (tick - 1) % 4 + 1);
            if let Some(boundary) = report.boundary {
                boundaries.push((tick, boundary));
            }
        }

        assert_eq!(boundaries.len(), 3);
        match &boundaries[0] {
            (4, EpisodeBoundary::Next(next)) => assert_eq!(next.episode_index, 1),
            other => panic!("unexpected boundary {other:?}"),
        }
        match &boundaries[1] {
            (8, EpisodeBoundary::Next(next)) => assert_eq!(next.episode_index, 2),
            other => panic!("unexpected boundary {other:?}"),
        }
        match &boundaries[2] {
            (12, EpisodeBoundary::Ended(ended)) => {
                assert_eq!(ended.final_stats.episodes_played(), 3);
                assert_eq!(ended.final_stats.episode, 2);
            }
            other => panic!("unexpected boundary {other:?}"),
        }
        assert!(!sim.is_running());
    }

    #[test]
    fn fighter_pushed_out_of_ring_loses() {
        let mut sim = SimulationLoop::new(1);
        sim.start(greedy(1, 50), SimulationMode::Evaluate).unwrap();

        let handle = sim.agents()[0].handle();
        let y = sim.world().motion(handle).position.y;
        sim.world_mut().set_motion(
            handle,
            BodyMotion {
                position: Vec3::new(5.5, y, 0.0),
                velocity: Vec3::zeros(),
                is_grounded: true,
            },
        );

        let report = sim.tick();
        assert_eq!(report.update.agent_states[0].health, 0.0);
        assert!(report.update.rewards[0] <= -50.0);
        match report.boundary {
            Some(EpisodeBoundary::Ended(ended)) => {
                assert_eq!(ended.final_stats.win_tally, [0, 1, 0]);
            }
            other => panic!("expected end of run, got {other:?}"),
        }
    }

    #[test]
    fn tables_survive_episode_resets_and_new_runs() {
        let mut sim = SimulationLoop::new(5);
        sim.start(exploring(3, 30), SimulationMode::Train).unwrap();
        sim.run_to_end();
        let rows = sim.learner().table(0).len();
        assert!(rows > 0);

        sim.start(exploring(1, 1), SimulationMode::Train).unwrap();
        assert!(sim.learner().table(0).len() >= rows);
    }
}

mod invariants {
    use super::*;

    #[test]
    fn health_and_energy_stay_in_bounds() {
        let mut sim = SimulationLoop::new(11);
        sim.start(exploring(4, 150), SimulationMode::Train).unwrap();
        while sim.is_running() {
            let report = sim.tick();
            for state in &report.update.agent_states {
                assert!((0.0..=100.0).contains(&state.health), "{state:?}");
                assert!((0.0..=100.0).contains(&state.energy), "{state:?}");
            }
        }
    }

    #[test]
    fn exploration_never_increases_while_training() {
        let params = exploring(3, 100);
        let floor = params.min_exploration_rate;
        let mut sim = SimulationLoop::new(13);
        sim.start(params, SimulationMode::Train).unwrap();

        let mut previous = sim.learner().exploration_rate();
        while sim.is_running() {
            sim.tick();
            let rate = sim.learner().exploration_rate();
            assert!(rate <= previous);
            assert!(rate >= floor);
            previous = rate;
        }
        assert_eq!(previous, floor);
    }

    #[test]
    fn same_seed_same_run() {
        let rewards = |seed: u64| {
            let mut sim = SimulationLoop::new(seed);
            sim.start(exploring(2, 50), SimulationMode::Train).unwrap();
            let mut trace = Vec::new();
            while sim.is_running() {
                trace.push(sim.tick().update.rewards);
            }
            trace
        };
        assert_eq!(rewards(21), rewards(21));
    }

    #[test]
    fn snapshot_moves_policy_between_loops() {
        let mut trainer = SimulationLoop::new(17);
        trainer.start(exploring(2, 80), SimulationMode::Train).unwrap();
        trainer.run_to_end();
        let json = trainer.export_snapshot().to_json().unwrap();

        let mut player = SimulationLoop::new(99);
        player
            .import_snapshot(crate::learner::LearnerSnapshot::from_json(&json).unwrap())
            .unwrap();
        assert_eq!(
            player.learner().table(0).len(),
            trainer.learner().table(0).len()
        );
        assert_eq!(player.parameters().max_steps, 80);

        player
            .start(player.parameters().clone(), SimulationMode::Evaluate)
            .unwrap();
        assert_eq!(
            player.learner().exploration_rate(),
            player.parameters().min_exploration_rate
        );
    }
}

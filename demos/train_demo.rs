// Demonstration: train the two fighters and optionally save the learned tables.
//
// Build/run from this repo root:
//   cargo run --example train_demo -- --episodes 200 --steps 500 --mode train --save tables.json

use std::env;
use std::fs;

use ringfight::{LearnerSnapshot, SimulationLoop, SimulationMode, SimulationParameters};

fn main() {
    let args: Vec<String> = env::args().collect();
    let episodes: u32 = arg_value(&args, "--episodes")
        .and_then(|s| s.parse().ok())
        .unwrap_or(100);
    let steps: u32 = arg_value(&args, "--steps")
        .and_then(|s| s.parse().ok())
        .unwrap_or(500);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let mode = match arg_value(&args, "--mode").unwrap_or("train") {
        "train" => SimulationMode::Train,
        "evaluate" => SimulationMode::Evaluate,
        other => {
            eprintln!("Unknown --mode '{}'; expected 'train' or 'evaluate'.", other);
            std::process::exit(2);
        }
    };

    let mut sim = SimulationLoop::new(seed);

    if let Some(path) = arg_value(&args, "--load") {
        let loaded = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| LearnerSnapshot::from_json(&json).map_err(|e| e.to_string()))
            .and_then(|snapshot| sim.import_snapshot(snapshot).map_err(|e| e.to_string()));
        if let Err(e) = loaded {
            eprintln!("Could not load '{}': {}", path, e);
            std::process::exit(1);
        }
    }

    let params = SimulationParameters {
        num_episodes: episodes,
        max_steps: steps,
        ..sim.parameters().clone()
    };
    if let Err(e) = sim.start(params, mode) {
        eprintln!("Invalid parameters: {}", e);
        std::process::exit(2);
    }

    let ended = sim.run_to_end();
    println!("Run: {}", ended.run_id);
    println!("{}", ended.final_stats);
    for (i, _) in sim.agents().iter().enumerate() {
        println!("Fighter {} knows {} states", i, sim.learner().table(i).len());
    }

    if let Some(path) = arg_value(&args, "--save") {
        let written = sim
            .export_snapshot()
            .to_json()
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(path, json).map_err(|e| e.to_string()));
        match written {
            Ok(()) => println!("Saved tables to {}", path),
            Err(e) => {
                eprintln!("Could not save '{}': {}", path, e);
                std::process::exit(1);
            }
        }
    }
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}

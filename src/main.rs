//! Bubble Burst headless runner
//!
//! Plays a game with a simple idle-mode AI and prints the result. Useful for
//! checking tuning files and reproducing seeds without a renderer.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use bubble_burst::sim::{GameEvent, GamePhase};
use bubble_burst::{Engine, Tuning};

/// Headless bubble shooter runner.
#[derive(Debug, Parser)]
#[command(name = "bubble-burst", version, about)]
struct Args {
    /// Game seed (same seed + same inputs = same game)
    #[arg(short, long, default_value = "12345")]
    seed: u64,

    /// JSON tuning file; omitted fields keep their defaults
    #[arg(short, long, value_name = "FILE")]
    tuning: Option<PathBuf>,

    /// Stop after this many shots even if the game is still running
    #[arg(long, default_value = "500")]
    max_shots: u32,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Tuning::default(),
    };
    log::info!("Bubble Burst (headless) starting with seed {}", args.seed);

    let mut engine = Engine::new(args.seed, tuning)?;
    let mut ai_rng = Pcg32::seed_from_u64(args.seed ^ 0x9e37_79b9_7f4a_7c15);
    let mut snapshot = engine.snapshot();
    let mut matches = 0u32;
    let mut rows = 0u32;

    while !snapshot.game_over && engine.state().shots_fired < args.max_shots {
        if snapshot.phase == GamePhase::Aiming {
            let target = pick_target(&engine, &mut ai_rng);
            engine.aim(target);
            engine.launch();
        }
        snapshot = engine.tick()?;
        for event in &snapshot.events {
            match event {
                GameEvent::Matched { .. } => matches += 1,
                GameEvent::RowInjected => rows += 1,
                _ => {}
            }
        }
    }

    println!(
        "seed {}: score {} after {} shots ({} matches, {} rows injected){}",
        args.seed,
        engine.score(),
        engine.state().shots_fired,
        matches,
        rows,
        if engine.is_game_over() { ", game over" } else { "" }
    );
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}

/// Idle-mode aim: the lowest bubble matching the loaded color, jittered a
/// little, or a random point on the board when there is none.
fn pick_target(engine: &Engine, rng: &mut Pcg32) -> Vec2 {
    let state = engine.state();
    let tuning = &state.tuning;
    let loaded = state.shooter.loaded;

    let lowest = engine
        .bubbles()
        .filter(|b| b.color == loaded)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    match lowest {
        Some(bubble) => {
            let jitter = rng.random_range(-tuning.bubble_radius..tuning.bubble_radius);
            Vec2::new(bubble.pos.x + jitter, bubble.pos.y)
        }
        None => Vec2::new(
            rng.random_range(0.0..tuning.field_width()),
            rng.random_range(0.0..tuning.launch_line_y()),
        ),
    }
}

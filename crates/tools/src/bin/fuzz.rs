use std::collections::{BTreeSet, VecDeque};

use anyhow::{Result, bail};
use clap::Parser;
use dungeon_core::test_support::random_tree_layout;
use dungeon_core::{CellKind, Coord, GeneratorConfig, GridDefinition, GridGenerator};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tools::logging;
use tracing::{debug, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of layouts to generate and check
    #[arg(short, long, default_value_t = 200)]
    runs: u32,
    #[arg(long, default_value_t = 4)]
    layout_width: usize,
    #[arg(long, default_value_t = 3)]
    layout_height: usize,
}

fn walkable(generated: &GridDefinition, pos: Coord) -> bool {
    generated.cell_at(pos) != CellKind::Wall
}

fn exit_reachable(generated: &GridDefinition) -> bool {
    let mut open = VecDeque::from([generated.player_start]);
    let mut seen = BTreeSet::from([generated.player_start]);
    while let Some(pos) = open.pop_front() {
        if pos == generated.exit {
            return true;
        }
        for next in pos.neighbors() {
            if walkable(generated, next) && seen.insert(next) {
                open.push_back(next);
            }
        }
    }
    false
}

fn check_invariants(generated: &GridDefinition, run: u32) -> Result<()> {
    for pos in generated.dangers.keys() {
        if generated.rewards.contains_key(pos) {
            bail!("Invariant failed: danger and reward share {pos:?} on run {run}");
        }
        if generated.cell_at(*pos) != CellKind::Room {
            bail!("Invariant failed: danger outside a room at {pos:?} on run {run}");
        }
    }
    for pos in generated.rewards.keys() {
        if generated.cell_at(*pos) != CellKind::Room {
            bail!("Invariant failed: reward outside a room at {pos:?} on run {run}");
        }
    }
    if !exit_reachable(generated) {
        bail!("Invariant failed: exit unreachable from start on run {run}");
    }
    Ok(())
}

fn main() -> Result<()> {
    logging::init_tracing("warn");
    let args = Args::parse();

    println!("Starting grid fuzz harness on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let cells = args.layout_width * args.layout_height;

    for run in 0..args.runs {
        let rooms = 2 + (rng.next_u64() as usize % cells.saturating_sub(1).max(1));
        let layout = random_tree_layout(&mut rng, args.layout_width, args.layout_height, rooms);
        let grid_seed = rng.next_u64();

        let generator = GridGenerator::new(grid_seed, GeneratorConfig::default());
        let generated = generator.generate(&layout)?;
        check_invariants(&generated, run)?;

        let again = generator.generate(&layout)?;
        if again.fingerprint() != generated.fingerprint() {
            bail!("Invariant failed: seed {grid_seed} is not reproducible on run {run}");
        }
        debug!(run, grid_seed, rooms, fingerprint = generated.fingerprint(), "run passed");
    }

    info!(runs = args.runs, "fuzz finished");
    println!("Fuzzing completed successfully.");
    Ok(())
}

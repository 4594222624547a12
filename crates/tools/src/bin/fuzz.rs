use std::collections::HashSet;
use std::io;

use anyhow::{Result, ensure};
use clap::Parser;
use crawler_core::{Attribute, Direction, Game, TileKind, TurnOutcome, TurnPhase};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    turns: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for max {} turns...", args.seed, args.turns);
    let mut game = Game::new(args.seed)?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut deaths = 0_u32;
    let mut deepest = 1;

    for step in 0..args.turns {
        // Bias towards movement so runs actually explore.
        let report = match rng.next_u64() % 12 {
            0 => {
                let slot = choose(&mut rng, &[1, 2, 3, 4]);
                game.use_item(slot, Some(choose(&mut rng, &Direction::ALL)))
            }
            1 => game.drop_item(choose(&mut rng, &[1, 2, 5])),
            2 => game.disable_trap(),
            3 => game.upgrade_attribute(choose(
                &mut rng,
                &[Attribute::Health, Attribute::Attack, Attribute::Defense],
            )),
            _ => game.move_player(choose(&mut rng, &Direction::ALL))?,
        };

        let state = game.state();
        let player = &state.player;
        ensure!(
            (0..=player.max_hp).contains(&player.hp),
            "Invariant failed: player hp out of range"
        );
        ensure!(
            player.inventory.len() <= player.max_inventory_size,
            "Invariant failed: inventory over capacity"
        );
        ensure!(
            state.map.tile_at(player.pos) != TileKind::Wall,
            "Invariant failed: player inside wall"
        );
        let mut occupied = HashSet::from([player.pos]);
        for enemy in state.enemies.values() {
            ensure!(
                state.map.tile_at(enemy.pos) != TileKind::Wall,
                "Invariant failed: enemy inside wall"
            );
            ensure!(occupied.insert(enemy.pos), "Invariant failed: two actors share a tile");
        }
        deepest = deepest.max(game.dungeon_level());

        if report.outcome == TurnOutcome::PlayerDead {
            ensure!(game.phase() == TurnPhase::PlayerDead, "Invariant failed: death phase mismatch");
            deaths += 1;
            info!(step, deaths, dungeon_level = game.dungeon_level(), "run ended, restarting");
            game.restart()?;
        }
    }

    println!("Fuzz harness finished: deaths {deaths}, deepest level {deepest}");
    println!("Final Hash: {}", game.snapshot_hash());
    Ok(())
}

mod command;
mod render;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use command::{Command, HELP, parse_command};
use crawler_core::{Game, TurnReport};
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the run; the same seed and commands replay the same game
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Stop after this many commands
    #[arg(short, long)]
    turns: Option<u32>,
    /// Print the snapshot as JSON instead of an ASCII map
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut game = Game::new(args.seed)
        .with_context(|| format!("Failed to generate the first level for seed {}", args.seed))?;
    let mut page = 0;
    let stdin = io::stdin();

    show(&game, page, args.json)?;
    let mut commands = 0;
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read command from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(error) => {
                println!("{error:#}");
                continue;
            }
        };
        let report: Option<TurnReport> = match command {
            Command::Move(direction) => Some(game.move_player(direction)?),
            Command::Use { slot, direction } => {
                Some(game.use_item_named(slot, direction.as_deref()))
            }
            Command::Drop(slot) => Some(game.drop_item(slot)),
            Command::DisableTrap => Some(game.disable_trap()),
            Command::Upgrade(name) => Some(game.upgrade_attribute_named(&name)),
            Command::Restart => Some(game.restart()?),
            Command::Page(index) => {
                page = index;
                None
            }
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Quit => break,
        };
        if let Some(report) = report {
            debug!(outcome = ?report.outcome, events = ?report.events, "turn resolved");
        }

        show(&game, page, args.json)?;
        commands += 1;
        if args.turns.is_some_and(|limit| commands >= limit) {
            break;
        }
    }

    println!("Snapshot Hash: {}", game.snapshot_hash());
    Ok(())
}

fn show(game: &Game, page: usize, json: bool) -> Result<()> {
    let snapshot = game.snapshot(page);
    if json {
        let encoded =
            serde_json::to_string(&snapshot).context("Failed to serialize snapshot JSON")?;
        println!("{encoded}");
    } else {
        print!("{}", render::render(&snapshot));
    }
    io::stdout().flush().context("Failed to flush stdout")
}

//! Text commands typed at the `crawler` prompt.

use anyhow::{Context, Result, bail};
use crawler_core::Direction;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    /// Direction tokens are passed through untouched so the game can report bad ones.
    Use { slot: usize, direction: Option<String> },
    Drop(usize),
    DisableTrap,
    Upgrade(String),
    Page(usize),
    Restart,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  w/a/s/d or move <up|down|left|right>   move or attack
  use <slot> [direction]                 use an item (scrolls need a direction)
  drop <slot>                            drop an item
  disable                                disable the trap underfoot
  upgrade <health|attack|defense>        spend a skill point
  page <n>                               show inventory page n (1-based)
  restart | help | quit";

pub fn parse_command(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        bail!("empty command");
    };
    let head = head.to_ascii_lowercase();

    let command = match head.as_str() {
        "w" => Command::Move(Direction::Up),
        "a" => Command::Move(Direction::Left),
        "s" => Command::Move(Direction::Down),
        "d" => Command::Move(Direction::Right),
        "up" | "down" | "left" | "right" => Command::Move(head.parse()?),
        "move" | "go" => {
            let token = words.next().context("move needs a direction")?;
            Command::Move(token.parse()?)
        }
        "use" => {
            let slot = parse_number(words.next(), "use")?;
            Command::Use { slot, direction: words.next().map(str::to_string) }
        }
        "drop" => Command::Drop(parse_number(words.next(), "drop")?),
        "disable" => Command::DisableTrap,
        "upgrade" => {
            let name = words.next().context("upgrade needs an attribute")?;
            Command::Upgrade(name.to_string())
        }
        "page" => {
            let page = parse_number(words.next(), "page")?;
            Command::Page(page.saturating_sub(1))
        }
        "restart" => Command::Restart,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => bail!("unknown command `{other}` (try `help`)"),
    };
    Ok(command)
}

fn parse_number(word: Option<&str>, verb: &str) -> Result<usize> {
    let word = word.with_context(|| format!("{verb} needs a number"))?;
    word.parse().with_context(|| format!("`{word}` is not a number"))
}

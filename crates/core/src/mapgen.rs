//! Procedural dungeon generation split into coherent submodules.

pub mod model;
pub mod progression;

mod generator;
mod grid;
mod layout;
mod spawns;

pub use generator::LevelGenerator;
pub use layout::{DungeonLayout, build_dungeon};
pub use model::{EnemySpawn, GeneratedLevel, ItemSpawn, Room, TrapSpawn};
pub use progression::{MAP_HEIGHT, MAP_WIDTH, STARTING_DUNGEON_LEVEL};

use crate::rng::GameRng;
use crate::types::GameError;

pub fn generate_level(rng: &mut GameRng, dungeon_level: u32) -> Result<GeneratedLevel, GameError> {
    LevelGenerator::new().generate(rng, dungeon_level)
}

//! High-level level generation orchestration that composes layout and spawns.

use tracing::{debug, warn};

use crate::rng::GameRng;
use crate::types::{GameError, GenerationStage};

use super::layout::build_dungeon;
use super::model::GeneratedLevel;
use super::progression::{self, ITEM_COUNT, MAP_HEIGHT, MAP_WIDTH, ROOM_COUNT, TRAP_COUNT};
use super::spawns::Placement;

/// Full rebuilds (fresh layout plus placement) before a placement failure is reported.
const MAX_LEVEL_ATTEMPTS: u32 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelGenerator {
    width: usize,
    height: usize,
    room_count: usize,
}

impl Default for LevelGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelGenerator {
    pub fn new() -> Self {
        Self::with_size(MAP_WIDTH, MAP_HEIGHT, ROOM_COUNT)
    }

    pub fn with_size(width: usize, height: usize, room_count: usize) -> Self {
        Self { width, height, room_count }
    }

    /// Builds one dungeon level: rooms and corridors, exit, then items, enemies, traps
    /// and, on boss levels, the boss. All randomness is drawn from `rng`.
    ///
    /// A layout whose rooms cannot hold every spawn is thrown away and rebuilt, up to
    /// a fixed number of times. Room failures are returned at once since the layout
    /// pass already restarts on its own.
    pub fn generate(
        &self,
        rng: &mut GameRng,
        dungeon_level: u32,
    ) -> Result<GeneratedLevel, GameError> {
        let mut attempt = 1;
        loop {
            match self.try_generate(rng, dungeon_level) {
                Err(GameError::GenerationUnsatisfiable { stage, attempts })
                    if stage != GenerationStage::Rooms && attempt < MAX_LEVEL_ATTEMPTS =>
                {
                    debug!(
                        dungeon_level,
                        attempt,
                        %stage,
                        attempts,
                        "placement failed, rebuilding level"
                    );
                    attempt += 1;
                }
                Err(error) => {
                    warn!(dungeon_level, attempt, %error, "level generation failed");
                    return Err(error);
                }
                Ok(level) => return Ok(level),
            }
        }
    }

    fn try_generate(
        &self,
        rng: &mut GameRng,
        dungeon_level: u32,
    ) -> Result<GeneratedLevel, GameError> {
        let layout = build_dungeon(rng, self.width, self.height, self.room_count)?;
        let mut tiles = layout.tiles;

        let mut placement = Placement::new(self.width, &mut tiles, &layout.rooms, layout.player_start);
        placement.place_items(rng, ITEM_COUNT)?;
        placement.place_enemies(rng, progression::enemy_spawn_count(dungeon_level), dungeon_level)?;
        placement.place_traps(rng, TRAP_COUNT)?;
        if progression::has_boss(dungeon_level) {
            placement.place_boss(rng, dungeon_level)?;
        }

        let Placement { item_spawns, trap_spawns, enemy_spawns, .. } = placement;
        debug!(
            dungeon_level,
            enemies = enemy_spawns.len(),
            items = item_spawns.len(),
            traps = trap_spawns.len(),
            "level generated"
        );

        Ok(GeneratedLevel {
            dungeon_level,
            width: self.width,
            height: self.height,
            tiles,
            rooms: layout.rooms,
            player_start: layout.player_start,
            exit_tile: layout.exit_tile,
            enemy_spawns,
            item_spawns,
            trap_spawns,
        })
    }
}

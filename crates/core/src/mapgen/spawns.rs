//! Item, trap, enemy and boss placement rules for generated maps.

use tracing::debug;

use crate::content::{self, NORMAL_ITEM_POOL, SPECIAL_ITEM_CHANCE_PERCENT, SPECIAL_ITEM_POOL};
use crate::rng::GameRng;
use crate::types::{GameError, GenerationStage, ItemKind, Pos, TileKind};

use super::grid::{set_tile, tile_at};
use super::model::{EnemySpawn, ItemSpawn, Room, TrapSpawn};

/// Rejection-sampling budget for a single entity.
const ATTEMPTS_PER_PLACEMENT: u32 = 5_000;

/// Accumulates spawns on a carved layout, stamping item and trap markers as it goes.
pub(super) struct Placement<'a> {
    pub(super) width: usize,
    pub(super) tiles: &'a mut [TileKind],
    pub(super) rooms: &'a [Room],
    pub(super) player_start: Pos,
    pub(super) item_spawns: Vec<ItemSpawn>,
    pub(super) trap_spawns: Vec<TrapSpawn>,
    pub(super) enemy_spawns: Vec<EnemySpawn>,
}

impl<'a> Placement<'a> {
    pub(super) fn new(
        width: usize,
        tiles: &'a mut [TileKind],
        rooms: &'a [Room],
        player_start: Pos,
    ) -> Self {
        Self {
            width,
            tiles,
            rooms,
            player_start,
            item_spawns: Vec::new(),
            trap_spawns: Vec::new(),
            enemy_spawns: Vec::new(),
        }
    }

    pub(super) fn place_items(&mut self, rng: &mut GameRng, count: usize) -> Result<(), GameError> {
        for _ in 0..count {
            let pos = self.sample_interior(rng, GenerationStage::Items)?;
            let kind = if rng.percent_roll(SPECIAL_ITEM_CHANCE_PERCENT) {
                *rng.pick(&SPECIAL_ITEM_POOL)
            } else {
                *rng.pick(&NORMAL_ITEM_POOL)
            };
            set_tile(self.tiles, self.width, pos, marker_for(kind));
            self.item_spawns.push(ItemSpawn { kind, pos });
        }
        Ok(())
    }

    pub(super) fn place_traps(&mut self, rng: &mut GameRng, count: usize) -> Result<(), GameError> {
        for _ in 0..count {
            let pos = self.sample_interior(rng, GenerationStage::Traps)?;
            set_tile(self.tiles, self.width, pos, TileKind::Trap);
            self.trap_spawns.push(TrapSpawn { pos });
        }
        Ok(())
    }

    pub(super) fn place_enemies(
        &mut self,
        rng: &mut GameRng,
        count: usize,
        dungeon_level: u32,
    ) -> Result<(), GameError> {
        let stats = content::regular_enemy_stats(dungeon_level);
        for _ in 0..count {
            let pos = self.sample_interior(rng, GenerationStage::Enemies)?;
            self.enemy_spawns.push(EnemySpawn { pos, stats, is_boss: false });
        }
        Ok(())
    }

    /// The boss always stands on the centre of a non-spawn room.
    pub(super) fn place_boss(
        &mut self,
        rng: &mut GameRng,
        dungeon_level: u32,
    ) -> Result<(), GameError> {
        for _ in 0..ATTEMPTS_PER_PLACEMENT {
            let Some(room) = self.random_non_spawn_room(rng) else {
                break;
            };
            let pos = room.center();
            if self.is_free(pos) {
                let stats = content::boss_stats(dungeon_level);
                self.enemy_spawns.push(EnemySpawn { pos, stats, is_boss: true });
                debug!(?pos, dungeon_level, "boss placed");
                return Ok(());
            }
        }
        Err(self.give_up(GenerationStage::Boss))
    }

    fn sample_interior(&self, rng: &mut GameRng, stage: GenerationStage) -> Result<Pos, GameError> {
        for _ in 0..ATTEMPTS_PER_PLACEMENT {
            let Some(room) = self.random_non_spawn_room(rng) else {
                break;
            };
            let x = rng.range_inclusive(room.x + 1, room.x + room.width - 2);
            let y = rng.range_inclusive(room.y + 1, room.y + room.height - 2);
            let pos = Pos { y, x };
            if self.is_free(pos) {
                return Ok(pos);
            }
        }
        Err(self.give_up(stage))
    }

    fn random_non_spawn_room(&self, rng: &mut GameRng) -> Option<Room> {
        if self.rooms.len() < 2 {
            return None;
        }
        let index = rng.range_inclusive(1, self.rooms.len() as i32 - 1) as usize;
        Some(self.rooms[index])
    }

    fn is_free(&self, pos: Pos) -> bool {
        tile_at(self.tiles, self.width, pos) == TileKind::Floor
            && pos != self.player_start
            && !self.enemy_spawns.iter().any(|spawn| spawn.pos == pos)
            && !self.item_spawns.iter().any(|spawn| spawn.pos == pos)
            && !self.trap_spawns.iter().any(|spawn| spawn.pos == pos)
    }

    fn give_up(&self, stage: GenerationStage) -> GameError {
        debug!(%stage, rooms = self.rooms.len(), "placement attempts exhausted");
        GameError::GenerationUnsatisfiable { stage, attempts: ATTEMPTS_PER_PLACEMENT }
    }
}

pub(super) fn marker_for(kind: ItemKind) -> TileKind {
    if kind.is_special() { TileKind::SpecialItem } else { TileKind::Item }
}

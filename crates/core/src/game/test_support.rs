//! Shared test fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating map and entity setup across many tests.
//! It does not own production gameplay logic.

use super::*;
use crate::content::{ENEMY_SYMBOL, WATER_POOL_DAMAGE, WATER_POOL_DURATION};
use crate::state::{Enemy, Item, Map, TrapKind};

pub(crate) const ARENA_WIDTH: usize = 12;
pub(crate) const ARENA_HEIGHT: usize = 9;

pub(crate) fn arena_center() -> Pos {
    Pos { y: 4, x: 6 }
}

/// A walled 12x9 room with nothing in it but the player at its centre.
pub(crate) fn arena_game() -> Game {
    arena_game_with_seed(1_234)
}

pub(crate) fn arena_game_with_seed(seed: u64) -> Game {
    let mut game = Game::new(seed).expect("fixture level generates");
    let mut map = Map::new(ARENA_WIDTH, ARENA_HEIGHT);
    for y in 1..(ARENA_HEIGHT as i32 - 1) {
        for x in 1..(ARENA_WIDTH as i32 - 1) {
            map.set_tile(Pos { y, x }, TileKind::Floor);
        }
    }
    game.state.map = map;
    game.state.rooms.clear();
    game.state.enemies.clear();
    game.state.items.clear();
    game.state.traps.clear();
    game.state.exit_tile = Pos { y: 1, x: ARENA_WIDTH as i32 - 2 };
    game.state.map.set_tile(game.state.exit_tile, TileKind::Exit);
    game.state.player.pos = arena_center();
    game
}

pub(crate) fn add_enemy(game: &mut Game, pos: Pos, hp: i32, attack: i32) -> EnemyId {
    game.state.spawn_enemy(|id| Enemy {
        id,
        pos,
        hp,
        max_hp: hp,
        attack,
        defense: 0,
        xp_value: 60,
        is_boss: false,
        symbol: ENEMY_SYMBOL,
    })
}

pub(crate) fn add_boss(game: &mut Game, pos: Pos, hp: i32) -> EnemyId {
    game.state.spawn_enemy(|id| Enemy {
        id,
        pos,
        hp,
        max_hp: hp,
        attack: 25,
        defense: 0,
        xp_value: 250,
        is_boss: true,
        symbol: ENEMY_SYMBOL,
    })
}

pub(crate) fn add_floor_trap(game: &mut Game, pos: Pos) -> TrapId {
    game.state.add_trap(pos, TrapKind::Static)
}

pub(crate) fn add_water_pool(game: &mut Game, pos: Pos) -> TrapId {
    game.state.add_trap(
        pos,
        TrapKind::WaterPool { turns_left: WATER_POOL_DURATION, damage: WATER_POOL_DAMAGE },
    )
}

pub(crate) fn add_ground_item(game: &mut Game, pos: Pos, kind: ItemKind) -> ItemId {
    game.state.drop_item_at(pos, Item::new(kind))
}

/// Puts `kind` straight into the pack, as if picked up, with its passive effect applied.
pub(crate) fn give_item(game: &mut Game, kind: ItemKind) {
    game.state.player.inventory.push(Item::new(kind));
    if kind.applies_on_pickup() {
        game.apply_item_effect(kind);
    }
    game.pending = TurnLog::default();
}

/// Swaps in a generator whose map is too small for its rooms, so every new level fails.
pub(crate) fn break_level_generation(game: &mut Game) {
    game.generator = LevelGenerator::with_size(12, 10, 8);
}

pub(crate) fn restore_level_generation(game: &mut Game) {
    game.generator = LevelGenerator::new();
}

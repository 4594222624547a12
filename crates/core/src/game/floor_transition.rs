//! Level transition: installing generated levels, descending, and restarting a run.
//! This module exists to keep world teardown and regeneration in one place.
//! It does not own turn sequencing around the transition.

use super::*;
use crate::content::ENEMY_SYMBOL;
use crate::mapgen::{GeneratedLevel, STARTING_DUNGEON_LEVEL, progression};
use crate::state::{Enemy, Item, Map, Player, TrapKind};

impl Game {
    /// Replaces the level-scoped world with `generated`. The player keeps stats
    /// and inventory; only their position changes.
    pub(super) fn install_level(&mut self, generated: GeneratedLevel) {
        let GeneratedLevel {
            dungeon_level,
            width,
            height,
            tiles,
            rooms,
            player_start,
            exit_tile,
            enemy_spawns,
            item_spawns,
            trap_spawns,
        } = generated;

        let state = &mut self.state;
        state.map = Map::from_tiles(width, height, tiles);
        state.rooms = rooms;
        state.exit_tile = exit_tile;
        state.dungeon_level = dungeon_level;
        state.player.pos = player_start;
        state.enemies.clear();
        state.items.clear();
        state.traps.clear();

        for spawn in enemy_spawns {
            state.spawn_enemy(|id| Enemy {
                id,
                pos: spawn.pos,
                hp: spawn.stats.hp,
                max_hp: spawn.stats.hp,
                attack: spawn.stats.attack,
                defense: spawn.stats.defense,
                xp_value: spawn.stats.xp_value,
                is_boss: spawn.is_boss,
                symbol: ENEMY_SYMBOL,
            });
        }
        for spawn in item_spawns {
            state.drop_item_at(spawn.pos, Item::new(spawn.kind));
        }
        for spawn in trap_spawns {
            state.add_trap(spawn.pos, TrapKind::Static);
        }
    }

    /// Descends one level. Called from the exit tile inside a movement turn.
    ///
    /// On failure the current level is left installed and the phase stays
    /// `LevelComplete`.
    pub(super) fn advance_level(&mut self) -> Result<u32, GameError> {
        self.phase = TurnPhase::LevelComplete;
        self.emit(GameEvent::NextLevel);

        let next_level = self.state.dungeon_level + 1;
        let generated = self.generator.generate(&mut self.rng, next_level)?;
        self.install_level(generated);
        if progression::has_boss(next_level) {
            self.say("A powerful Boss awaits you on this level!");
        }

        info!(seed = self.seed, turn = self.turn, dungeon_level = next_level, "level advanced");
        Ok(next_level)
    }

    /// Starts a fresh run on level one with default stats and an empty log.
    ///
    /// Valid from any phase; this is the only intent accepted after death. When the
    /// first level cannot be generated the old run, log included, is left as it was.
    pub fn restart(&mut self) -> Result<TurnReport, GameError> {
        let generated = self.generator.generate(&mut self.rng, STARTING_DUNGEON_LEVEL)?;
        self.pending = TurnLog::default();
        self.message_history.clear();
        self.state.player = Player::new(generated.player_start);
        self.install_level(generated);
        self.turn = 0;

        info!(seed = self.seed, "run restarted");
        Ok(self.finish_turn(TurnOutcome::FreeAction))
    }
}

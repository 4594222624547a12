//! Movement turn resolution: the one intent that advances the world.
//! This module exists to sequence player action, trap and item resolution,
//! enemy reaction and the environment tick. It does not own the rules of any
//! single step, which live in the sibling modules.

use super::*;
use crate::state::TrapKind;


impl Game {
    /// Resolves one movement intent.
    ///
    /// A wall bump costs the turn: only the trap tick follows. Moving into an enemy
    /// attacks it. Otherwise the player steps, then traps and items on the new tile
    /// resolve; stepping onto the exit descends immediately and enemies get no reply.
    /// After a normal step enemies act, then the trap tick runs. The tick also runs
    /// on the turn the player dies.
    ///
    /// Returns `Err` only when descending fails to generate the next level. The
    /// player is then left standing on the exit of the old level, nothing said
    /// during the call is kept, the turn counter is unchanged and the phase stays
    /// `LevelComplete` until the next intent.
    pub fn move_player(&mut self, direction: Direction) -> Result<TurnReport, GameError> {
        if !self.ensure_running() {
            return Ok(self.finish_free_action());
        }
        self.phase = TurnPhase::Resolving;
        let target = self.state.player.pos.step(direction);

        if self.state.map.tile_at(target) == TileKind::Wall {
            self.emit(GameEvent::Bump);
            self.say("You bump into a wall.");
            self.update_traps();
            return Ok(self.end_turn());
        }

        if let Some(enemy_id) = self.state.enemy_at(target) {
            self.player_attack(enemy_id);
        } else {
            self.state.player.pos = target;
            self.resolve_arrival(target);
            if self.state.player.is_alive && self.state.map.tile_at(target) == TileKind::Exit {
                self.say("You have reached the exit! Proceeding to the next dungeon level...");
                let new_level = match self.advance_level() {
                    Ok(level) => level,
                    Err(error) => {
                        self.discard_pending();
                        return Err(error);
                    }
                };
                self.turn += 1;
                return Ok(self.finish_turn(TurnOutcome::LevelComplete { new_level }));
            }
        }

        if self.state.player.is_alive {
            self.move_enemies();
        }
        self.update_traps();
        Ok(self.end_turn())
    }

    /// Armed floor trap first, then whatever lies on the tile.
    fn resolve_arrival(&mut self, pos: Pos) {
        let armed_trap = self
            .state
            .traps
            .iter()
            .find(|(_, trap)| trap.pos == pos && trap.is_active() && trap.kind == TrapKind::Static)
            .map(|(id, _)| id);
        if let Some(trap_id) = armed_trap {
            self.trigger_trap(trap_id);
        }
        if !self.state.player.is_alive {
            return;
        }
        if let Some(item_id) = self.state.item_at(pos) {
            self.pick_up(item_id);
        }
    }

    fn end_turn(&mut self) -> TurnReport {
        self.turn += 1;
        let outcome = if self.state.player.is_alive {
            TurnOutcome::Resolved
        } else {
            TurnOutcome::PlayerDead
        };
        self.finish_turn(outcome)
    }
}

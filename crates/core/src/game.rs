//! Turn engine facade: owns the world, the seeded RNG and the message log.
//! Behaviour is split across submodules that each add an `impl Game` block.

use std::mem;

use tracing::info;

use crate::mapgen::LevelGenerator;
use crate::rng::GameRng;
use crate::state::WorldState;
use crate::types::*;

mod bootstrap;
mod combat;
mod enemies;
mod engine;
mod floor_transition;
mod hash;
mod items;
mod snapshot;
mod traps;

#[cfg(test)]
mod test_support;

pub use snapshot::{
    CellKind, INVENTORY_PAGE_SIZE, InventoryEntry, InventoryPage, PlayerView,
    RECENT_MESSAGE_COUNT, Snapshot,
};

/// Everything said and signalled while the current intent resolves.
#[derive(Debug, Default)]
struct TurnLog {
    messages: Vec<String>,
    events: Vec<GameEvent>,
    errors: Vec<GameError>,
}

pub struct Game {
    seed: u64,
    turn: u64,
    rng: GameRng,
    generator: LevelGenerator,
    state: WorldState,
    phase: TurnPhase,
    message_history: Vec<String>,
    pending: TurnLog,
}

impl Game {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of turn-consuming intents resolved in the current run.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn dungeon_level(&self) -> u32 {
        self.state.dungeon_level
    }

    pub fn is_over(&self) -> bool {
        self.phase == TurnPhase::PlayerDead
    }

    /// Every message since the run started, oldest first.
    pub fn message_history(&self) -> &[String] {
        &self.message_history
    }

    fn say(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.message_history.push(message.clone());
        self.pending.messages.push(message);
    }

    fn emit(&mut self, event: GameEvent) {
        self.pending.events.push(event);
    }

    /// Records a recoverable error; its text goes to the player like any other message.
    fn reject(&mut self, error: GameError) {
        self.say(error.to_string());
        self.pending.errors.push(error);
    }

    /// Guard shared by every intent: a dead run only accepts `restart`.
    fn ensure_running(&mut self) -> bool {
        if self.phase == TurnPhase::PlayerDead {
            self.reject(GameError::RunOver);
            return false;
        }
        true
    }

    fn finish_turn(&mut self, outcome: TurnOutcome) -> TurnReport {
        self.phase = match outcome {
            TurnOutcome::PlayerDead => TurnPhase::PlayerDead,
            TurnOutcome::Resolved | TurnOutcome::FreeAction | TurnOutcome::LevelComplete { .. } => {
                TurnPhase::AwaitingInput
            }
        };
        let log = mem::take(&mut self.pending);
        TurnReport { outcome, messages: log.messages, events: log.events, errors: log.errors }
    }

    /// Drops everything said during the current intent, from the report and the history.
    fn discard_pending(&mut self) {
        let log = mem::take(&mut self.pending);
        let kept = self.message_history.len().saturating_sub(log.messages.len());
        self.message_history.truncate(kept);
    }

    /// Report for an intent that changed nothing beyond itself.
    fn finish_free_action(&mut self) -> TurnReport {
        let outcome = if self.state.player.is_alive {
            TurnOutcome::FreeAction
        } else {
            TurnOutcome::PlayerDead
        };
        self.finish_turn(outcome)
    }

    fn kill_player(&mut self) {
        if !self.state.player.is_alive {
            return;
        }
        self.state.player.hp = 0;
        self.state.player.is_alive = false;
        self.phase = TurnPhase::PlayerDead;
        self.emit(GameEvent::Death);
        info!(
            seed = self.seed,
            turn = self.turn,
            dungeon_level = self.state.dungeon_level,
            player_level = self.state.player.level,
            "player died"
        );
    }
}

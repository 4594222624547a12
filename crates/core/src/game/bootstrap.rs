//! Starting world construction for a new run.
//! This module exists to isolate initialization details from runtime turn flow.
//! It does not own level regeneration once a run is under way.

use super::*;
use crate::mapgen::STARTING_DUNGEON_LEVEL;
use crate::state::{Map, Player};

impl Game {
    /// Seeds the run and generates the first dungeon level.
    ///
    /// Fails only when the generator cannot satisfy its placement constraints.
    pub fn new(seed: u64) -> Result<Self, GameError> {
        let mut rng = GameRng::from_seed(seed);
        let generator = LevelGenerator::new();
        let generated = generator.generate(&mut rng, STARTING_DUNGEON_LEVEL)?;

        let map = Map::new(generated.width, generated.height);
        let player = Player::new(generated.player_start);
        let state = WorldState::new(map, player, STARTING_DUNGEON_LEVEL);

        let mut game = Self {
            seed,
            turn: 0,
            rng,
            generator,
            state,
            phase: TurnPhase::AwaitingInput,
            message_history: Vec::new(),
            pending: TurnLog::default(),
        };
        game.install_level(generated);
        info!(seed, "run started");
        Ok(game)
    }
}

pub mod content;
pub mod game;
pub mod mapgen;
pub mod rng;
pub mod state;
pub mod types;

pub use game::{
    CellKind, Game, INVENTORY_PAGE_SIZE, InventoryEntry, InventoryPage, PlayerView,
    RECENT_MESSAGE_COUNT, Snapshot,
};
pub use mapgen::{GeneratedLevel, LevelGenerator, Room, generate_level};
pub use rng::GameRng;
pub use state::{Enemy, GroundItem, Item, Map, Player, Trap, TrapKind, WorldState};
pub use types::*;

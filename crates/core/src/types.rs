use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use slotmap::new_key_type;

new_key_type! {
    pub struct EnemyId;
    pub struct ItemId;
    pub struct TrapId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self { y: self.y + dy, x: self.x + dx }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TileKind {
    Wall,
    Floor,
    Exit,
    Item,
    SpecialItem,
    Trap,
}

impl TileKind {
    /// Everything except walls can be stood on.
    pub fn is_walkable(self) -> bool {
        self != TileKind::Wall
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// `(dx, dy)` offset for one step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(GameError::InvalidDirection),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ItemKind {
    Sword,
    Shield,
    Potion,
    Amulet,
    WaterTrapScroll,
    BagOfHolding,
    RingOfPower,
    BossTrophy,
}

impl ItemKind {
    pub fn name(self) -> &'static str {
        match self {
            ItemKind::Sword => "Sword",
            ItemKind::Shield => "Shield",
            ItemKind::Potion => "Potion",
            ItemKind::Amulet => "Amulet",
            ItemKind::WaterTrapScroll => "Water Trap Scroll",
            ItemKind::BagOfHolding => "Bag of Holding",
            ItemKind::RingOfPower => "Ring of Power",
            ItemKind::BossTrophy => "Boss Trophy",
        }
    }

    pub fn is_special(self) -> bool {
        matches!(self, ItemKind::BagOfHolding | ItemKind::RingOfPower | ItemKind::BossTrophy)
    }

    /// Potions only take effect when drunk, never on pickup.
    pub fn applies_on_pickup(self) -> bool {
        self != ItemKind::Potion
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Health,
    Attack,
    Defense,
}

impl FromStr for Attribute {
    type Err = GameError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "health" => Ok(Attribute::Health),
            "attack" => Ok(Attribute::Attack),
            "defense" => Ok(Attribute::Defense),
            other => Err(GameError::InvalidAttribute(other.to_string())),
        }
    }
}

/// Named presentation cues. The core never plays media; callers map these to effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameEvent {
    Attack,
    Hit,
    Pickup,
    LevelUp,
    Death,
    Bump,
    NextLevel,
    Heal,
    Upgrade,
}

impl GameEvent {
    pub fn name(self) -> &'static str {
        match self {
            GameEvent::Attack => "attack",
            GameEvent::Hit => "hit",
            GameEvent::Pickup => "pickup",
            GameEvent::LevelUp => "levelup",
            GameEvent::Death => "death",
            GameEvent::Bump => "bump",
            GameEvent::NextLevel => "nextlevel",
            GameEvent::Heal => "heal",
            GameEvent::Upgrade => "upgrade",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TurnPhase {
    AwaitingInput,
    Resolving,
    LevelComplete,
    PlayerDead,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TurnOutcome {
    /// A full turn ran: enemies and the environment reacted.
    Resolved,
    /// Nothing beyond the action itself happened.
    FreeAction,
    LevelComplete { new_level: u32 },
    PlayerDead,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub outcome: TurnOutcome,
    pub messages: Vec<String>,
    pub events: Vec<GameEvent>,
    pub errors: Vec<GameError>,
}

impl TurnReport {
    pub fn has_event(&self, event: GameEvent) -> bool {
        self.events.contains(&event)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationStage {
    Rooms,
    Items,
    Traps,
    Enemies,
    Boss,
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GenerationStage::Rooms => "rooms",
            GenerationStage::Items => "items",
            GenerationStage::Traps => "traps",
            GenerationStage::Enemies => "enemies",
            GenerationStage::Boss => "boss",
        })
    }
}

/// Display text doubles as the player-facing message for recoverable errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Invalid inventory slot.")]
    InvalidSlot { slot: usize, len: usize },

    #[error("Please specify a direction (up, down, left, right).")]
    InvalidDirection,

    #[error("Invalid attribute. You can upgrade health, attack, or defense.")]
    InvalidAttribute(String),

    #[error("You have no skill points to spend.")]
    NoSkillPoints,

    #[error("Inventory full! Cannot pick up more items.")]
    InventoryFull { capacity: usize },

    #[error("You cannot use {0} right now.")]
    ItemNotUsable(ItemKind),

    #[error("There is no trap here to disable.")]
    NoTrapHere,

    #[error("You have died. Restart to begin a new run.")]
    RunOver,

    #[error("dungeon generation gave up placing {stage} after {attempts} attempts")]
    GenerationUnsatisfiable { stage: GenerationStage, attempts: u32 },
}

impl GameError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::GenerationUnsatisfiable { .. })
    }
}

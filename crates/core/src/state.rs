//! World state aggregate for one dungeon level plus the run-persistent player.

use slotmap::SlotMap;

use crate::content::{
    PLAYER_START_ATTACK, PLAYER_START_DEFENSE, PLAYER_START_HP, PLAYER_START_INVENTORY_SIZE,
    PLAYER_START_LUCK, PLAYER_START_XP_TO_LEVEL,
};
use crate::mapgen::Room;
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Map {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<TileKind>,
}

impl Map {
    /// Solid rock everywhere; rooms are carved in by the generator.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, tiles: vec![TileKind::Wall; width * height] }
    }

    pub fn from_tiles(width: usize, height: usize, tiles: Vec<TileKind>) -> Self {
        debug_assert_eq!(tiles.len(), width * height);
        Self { width, height, tiles }
    }

    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub id: EnemyId,
    pub pos: Pos,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub xp_value: u32,
    pub is_boss: bool,
    pub symbol: char,
}

impl Enemy {
    /// Subject used in combat messages: "the Boss" or "the enemy".
    pub fn the_name(&self) -> &'static str {
        if self.is_boss { "the Boss" } else { "the enemy" }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Item {
    pub kind: ItemKind,
}

impl Item {
    pub fn new(kind: ItemKind) -> Self {
        Self { kind }
    }

    pub fn is_special(self) -> bool {
        self.kind.is_special()
    }
}

/// An item lying on the map. Held items live in [`Player::inventory`] instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroundItem {
    pub id: ItemId,
    pub pos: Pos,
    pub item: Item,
    /// Drop sequence number; lower numbers were dropped earlier.
    pub order: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrapKind {
    /// Generated floor trap: hurts the player once per step while active.
    Static,
    /// Deployed by a scroll: counts down and damages enemies standing in it.
    WaterPool { turns_left: u32, damage: i32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trap {
    pub id: TrapId,
    pub pos: Pos,
    pub kind: TrapKind,
    pub disabled: bool,
}

impl Trap {
    pub fn is_active(&self) -> bool {
        !self.disabled
    }

    pub fn is_water_pool(&self) -> bool {
        matches!(self.kind, TrapKind::WaterPool { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub pos: Pos,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub luck: i32,
    pub level: u32,
    pub xp: u32,
    pub xp_to_level: u32,
    pub skill_points: u32,
    pub inventory: Vec<Item>,
    pub max_inventory_size: usize,
    pub is_alive: bool,
}

impl Player {
    /// Fresh run defaults.
    pub fn new(pos: Pos) -> Self {
        Self {
            pos,
            hp: PLAYER_START_HP,
            max_hp: PLAYER_START_HP,
            attack: PLAYER_START_ATTACK,
            defense: PLAYER_START_DEFENSE,
            luck: PLAYER_START_LUCK,
            level: 1,
            xp: 0,
            xp_to_level: PLAYER_START_XP_TO_LEVEL,
            skill_points: 0,
            inventory: Vec::new(),
            max_inventory_size: PLAYER_START_INVENTORY_SIZE,
            is_alive: true,
        }
    }

    pub fn inventory_full(&self) -> bool {
        self.inventory.len() >= self.max_inventory_size
    }

    /// Applies damage and clamps at zero. Returns true when this hit was lethal.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.hp = (self.hp - amount).max(0);
        self.hp == 0
    }

    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    pub fn is_low_hp(&self) -> bool {
        self.hp * 5 < self.max_hp
    }
}

pub struct WorldState {
    pub map: Map,
    pub rooms: Vec<Room>,
    pub exit_tile: Pos,
    pub enemies: SlotMap<EnemyId, Enemy>,
    pub items: SlotMap<ItemId, GroundItem>,
    pub traps: SlotMap<TrapId, Trap>,
    pub player: Player,
    pub dungeon_level: u32,
    next_drop: u64,
}

impl WorldState {
    pub fn new(map: Map, player: Player, dungeon_level: u32) -> Self {
        Self {
            map,
            rooms: Vec::new(),
            exit_tile: player.pos,
            enemies: SlotMap::with_key(),
            items: SlotMap::with_key(),
            traps: SlotMap::with_key(),
            player,
            dungeon_level,
            next_drop: 0,
        }
    }

    pub fn spawn_enemy(&mut self, build: impl FnOnce(EnemyId) -> Enemy) -> EnemyId {
        self.enemies.insert_with_key(build)
    }

    pub fn drop_item_at(&mut self, pos: Pos, item: Item) -> ItemId {
        let order = self.next_drop;
        self.next_drop += 1;
        let id = self.items.insert_with_key(|id| GroundItem { id, pos, item, order });
        self.refresh_tile(pos);
        id
    }

    pub fn add_trap(&mut self, pos: Pos, kind: TrapKind) -> TrapId {
        let id = self.traps.insert_with_key(|id| Trap { id, pos, kind, disabled: false });
        self.refresh_tile(pos);
        id
    }

    pub fn enemy_at(&self, pos: Pos) -> Option<EnemyId> {
        self.enemies.iter().find(|(_, enemy)| enemy.pos == pos).map(|(id, _)| id)
    }

    /// First item dropped on `pos` is the first picked up.
    pub fn item_at(&self, pos: Pos) -> Option<ItemId> {
        self.items
            .iter()
            .filter(|(_, ground)| ground.pos == pos)
            .min_by_key(|(_, ground)| ground.order)
            .map(|(id, _)| id)
    }

    pub fn active_trap_at(&self, pos: Pos) -> Option<TrapId> {
        self.traps.iter().find(|(_, trap)| trap.pos == pos && trap.is_active()).map(|(id, _)| id)
    }

    /// A tile holds a body when the player or any enemy stands on it.
    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.player.pos == pos || self.enemy_at(pos).is_some()
    }

    /// Recomputes the marker on `pos` from what lies there: item, then active
    /// floor trap, then bare floor. Walls and the exit keep their kind.
    pub fn refresh_tile(&mut self, pos: Pos) {
        let current = self.map.tile_at(pos);
        if matches!(current, TileKind::Wall | TileKind::Exit) {
            return;
        }
        let marker = if let Some(id) = self.item_at(pos) {
            if self.items[id].item.is_special() { TileKind::SpecialItem } else { TileKind::Item }
        } else if self
            .traps
            .values()
            .any(|trap| trap.pos == pos && trap.is_active() && trap.kind == TrapKind::Static)
        {
            TileKind::Trap
        } else {
            TileKind::Floor
        };
        self.map.set_tile(pos, marker);
    }
}

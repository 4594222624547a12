//! Render-ready description of the world for front ends.
//! This module exists to flatten entity collections into per-cell semantics.
//! It does not own how cells are drawn.

use serde::Serialize;

use super::*;
use crate::state::TrapKind;

pub const INVENTORY_PAGE_SIZE: usize = 5;
pub const RECENT_MESSAGE_COUNT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CellKind {
    Player,
    Enemy,
    Boss,
    Item,
    SpecialItem,
    Trap,
    WaterPool,
    Wall,
    Floor,
    Exit,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerView {
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
    pub inventory_len: usize,
    pub max_inventory_size: usize,
    pub low_hp: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InventoryEntry {
    /// 1-based slot, as accepted by `use_item` and `drop_item`.
    pub slot: usize,
    pub kind: ItemKind,
    pub name: &'static str,
    pub special: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InventoryPage {
    /// 0-based page index after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub entries: Vec<InventoryEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major, `width * height` cells.
    pub cells: Vec<CellKind>,
    pub player: PlayerView,
    pub inventory: InventoryPage,
    pub dungeon_level: u32,
    pub turn: u64,
    pub phase: TurnPhase,
    pub messages: Vec<String>,
}

impl Snapshot {
    pub fn cell_at(&self, pos: Pos) -> CellKind {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height {
            return CellKind::Wall;
        }
        self.cells[pos.y as usize * self.width + pos.x as usize]
    }

    /// Cells of one row, for line-oriented renderers.
    pub fn row(&self, y: usize) -> &[CellKind] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }
}

impl Game {
    /// Captures the world with inventory page `page` (clamped to the last page).
    pub fn snapshot(&self, page: usize) -> Snapshot {
        let state = &self.state;
        let (width, height) = (state.map.width, state.map.height);

        let mut cells: Vec<CellKind> = state.map.tiles.iter().map(|tile| terrain_cell(*tile)).collect();
        let mut paint = |pos: Pos, cell: CellKind| {
            if state.map.in_bounds(pos) {
                cells[pos.y as usize * width + pos.x as usize] = cell;
            }
        };

        // Lowest precedence first; later strokes win.
        for trap in state.traps.values().filter(|trap| trap.is_active()) {
            let cell = match trap.kind {
                TrapKind::Static => CellKind::Trap,
                TrapKind::WaterPool { .. } => CellKind::WaterPool,
            };
            paint(trap.pos, cell);
        }
        for ground in state.items.values() {
            let cell = if ground.item.is_special() { CellKind::SpecialItem } else { CellKind::Item };
            paint(ground.pos, cell);
        }
        for enemy in state.enemies.values() {
            paint(enemy.pos, if enemy.is_boss { CellKind::Boss } else { CellKind::Enemy });
        }
        paint(state.player.pos, CellKind::Player);

        let recent_start = self.message_history.len().saturating_sub(RECENT_MESSAGE_COUNT);

        Snapshot {
            width,
            height,
            cells,
            player: self.player_view(),
            inventory: self.inventory_page(page),
            dungeon_level: state.dungeon_level,
            turn: self.turn,
            phase: self.phase,
            messages: self.message_history[recent_start..].to_vec(),
        }
    }

    fn player_view(&self) -> PlayerView {
        let player = &self.state.player;
        PlayerView {
            pos: player.pos,
            hp: player.hp,
            max_hp: player.max_hp,
            attack: player.attack,
            defense: player.defense,
            luck: player.luck,
            level: player.level,
            xp: player.xp,
            xp_to_level: player.xp_to_level,
            skill_points: player.skill_points,
            inventory_len: player.inventory.len(),
            max_inventory_size: player.max_inventory_size,
            low_hp: player.is_low_hp(),
        }
    }

    fn inventory_page(&self, page: usize) -> InventoryPage {
        let inventory = &self.state.player.inventory;
        let total_pages = inventory.len().div_ceil(INVENTORY_PAGE_SIZE).max(1);
        let page = page.min(total_pages - 1);
        let entries = inventory
            .iter()
            .enumerate()
            .skip(page * INVENTORY_PAGE_SIZE)
            .take(INVENTORY_PAGE_SIZE)
            .map(|(index, item)| InventoryEntry {
                slot: index + 1,
                kind: item.kind,
                name: item.kind.name(),
                special: item.is_special(),
            })
            .collect();
        InventoryPage { page, total_pages, entries }
    }
}

fn terrain_cell(tile: TileKind) -> CellKind {
    match tile {
        TileKind::Wall => CellKind::Wall,
        TileKind::Exit => CellKind::Exit,
        TileKind::Floor | TileKind::Item | TileKind::SpecialItem | TileKind::Trap => {
            CellKind::Floor
        }
    }
}

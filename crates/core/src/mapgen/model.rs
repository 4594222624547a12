//! Public data models for generated levels, rooms, and entity spawns.

use crate::content::EnemyStats;
use crate::types::{ItemKind, Pos, TileKind};

/// Axis-aligned room rectangle in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub fn center(self) -> Pos {
        Pos { y: self.y + self.height / 2, x: self.x + self.width / 2 }
    }

    /// Inclusive bounding-box test: rooms whose edges touch count as overlapping.
    pub fn overlaps(self, other: &Self) -> bool {
        self.x <= other.x + other.width
            && self.x + self.width >= other.x
            && self.y <= other.y + other.height
            && self.y + self.height >= other.y
    }

    pub fn contains(self, pos: Pos) -> bool {
        pos.x >= self.x
            && pos.x < self.x + self.width
            && pos.y >= self.y
            && pos.y < self.y + self.height
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemySpawn {
    pub pos: Pos,
    pub stats: EnemyStats,
    pub is_boss: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemSpawn {
    pub kind: ItemKind,
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrapSpawn {
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedLevel {
    pub dungeon_level: u32,
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<TileKind>,
    pub rooms: Vec<Room>,
    pub player_start: Pos,
    pub exit_tile: Pos,
    pub enemy_spawns: Vec<EnemySpawn>,
    pub item_spawns: Vec<ItemSpawn>,
    pub trap_spawns: Vec<TrapSpawn>,
}

impl GeneratedLevel {
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if pos.x < 0 || pos.y < 0 {
            return TileKind::Wall;
        }
        let x = pos.x as usize;
        let y = pos.y as usize;
        if x >= self.width || y >= self.height {
            return TileKind::Wall;
        }
        self.tiles[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_rooms_count_as_overlapping() {
        let left = Room { x: 1, y: 1, width: 4, height: 4 };
        let touching = Room { x: 5, y: 1, width: 4, height: 4 };
        let separated = Room { x: 6, y: 1, width: 4, height: 4 };
        assert!(left.overlaps(&touching));
        assert!(!left.overlaps(&separated));
        assert!(!separated.overlaps(&left));
    }

    #[test]
    fn center_rounds_down() {
        let room = Room { x: 3, y: 2, width: 5, height: 4 };
        assert_eq!(room.center(), Pos { y: 4, x: 5 });
        assert!(room.contains(room.center()));
        assert!(!room.contains(Pos { y: 2, x: 8 }));
    }
}

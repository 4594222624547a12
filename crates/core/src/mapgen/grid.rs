//! Grid and tile-space primitives used by layout carving and entity placement.

use crate::types::{Pos, TileKind};

pub(super) fn in_bounds(width: usize, height: usize, pos: Pos) -> bool {
    pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height
}

pub(super) fn tile_index(width: usize, pos: Pos) -> usize {
    (pos.y as usize) * width + (pos.x as usize)
}

pub(super) fn tile_at(tiles: &[TileKind], width: usize, pos: Pos) -> TileKind {
    tiles[tile_index(width, pos)]
}

pub(super) fn set_tile(tiles: &mut [TileKind], width: usize, pos: Pos, tile: TileKind) {
    tiles[tile_index(width, pos)] = tile;
}

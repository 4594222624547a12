//! Room placement and corridor carving logic for base level topology.

use tracing::{debug, warn};

use crate::rng::GameRng;
use crate::types::{GameError, GenerationStage, Pos, TileKind};

use super::grid::{in_bounds, set_tile};
use super::model::Room;

const MIN_ROOM_WIDTH: i32 = 4;
const MAX_ROOM_WIDTH: i32 = 10;
const MIN_ROOM_HEIGHT: i32 = 4;
const MAX_ROOM_HEIGHT: i32 = 8;

const ATTEMPTS_PER_LAYOUT: u32 = 2_000;
const MAX_LAYOUT_RESTARTS: u32 = 16;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DungeonLayout {
    pub tiles: Vec<TileKind>,
    pub rooms: Vec<Room>,
    pub player_start: Pos,
    pub exit_tile: Pos,
}

/// Carves `room_count` connected rooms into a walled grid and stamps the exit.
///
/// Rooms are sampled until they clear every accepted room; each accepted room is
/// joined to the one accepted before it. A pass that stalls is thrown away and the
/// grid restarts, so a pathological size/count combination fails instead of hanging.
pub fn build_dungeon(
    rng: &mut GameRng,
    width: usize,
    height: usize,
    room_count: usize,
) -> Result<DungeonLayout, GameError> {
    if room_count == 0 {
        return Err(GameError::GenerationUnsatisfiable {
            stage: GenerationStage::Rooms,
            attempts: 0,
        });
    }

    for restart in 0..MAX_LAYOUT_RESTARTS {
        if let Some(layout) = try_build_layout(rng, width, height, room_count) {
            return Ok(layout);
        }
        debug!(restart, room_count, "room layout stalled, restarting");
    }

    let attempts = ATTEMPTS_PER_LAYOUT * MAX_LAYOUT_RESTARTS;
    warn!(width, height, room_count, attempts, "giving up on room layout");
    Err(GameError::GenerationUnsatisfiable { stage: GenerationStage::Rooms, attempts })
}

fn try_build_layout(
    rng: &mut GameRng,
    width: usize,
    height: usize,
    room_count: usize,
) -> Option<DungeonLayout> {
    let mut tiles = vec![TileKind::Wall; width * height];
    let mut rooms: Vec<Room> = Vec::with_capacity(room_count);

    let mut attempts = 0;
    while rooms.len() < room_count {
        if attempts >= ATTEMPTS_PER_LAYOUT {
            return None;
        }
        attempts += 1;

        let candidate = sample_room(rng, width, height)?;
        if rooms.iter().any(|existing| existing.overlaps(&candidate)) {
            continue;
        }

        carve_room(&mut tiles, width, &candidate);
        if let Some(previous) = rooms.last() {
            let horizontal_first = rng.coin_flip();
            carve_l_shaped_corridor(
                &mut tiles,
                width,
                height,
                candidate.center(),
                previous.center(),
                horizontal_first,
            );
        }
        rooms.push(candidate);
    }

    let player_start = rooms.first()?.center();
    let exit_tile = rooms.last()?.center();
    set_tile(&mut tiles, width, exit_tile, TileKind::Exit);

    Some(DungeonLayout { tiles, rooms, player_start, exit_tile })
}

/// Samples a room fully inside the one-tile wall margin; `None` when the map is too small.
fn sample_room(rng: &mut GameRng, width: usize, height: usize) -> Option<Room> {
    let room_width = rng.range_inclusive(MIN_ROOM_WIDTH, MAX_ROOM_WIDTH);
    let room_height = rng.range_inclusive(MIN_ROOM_HEIGHT, MAX_ROOM_HEIGHT);
    let max_x = width as i32 - room_width - 1;
    let max_y = height as i32 - room_height - 1;
    if max_x < 1 || max_y < 1 {
        return None;
    }
    let x = rng.range_inclusive(1, max_x);
    let y = rng.range_inclusive(1, max_y);
    Some(Room { x, y, width: room_width, height: room_height })
}

pub(super) fn carve_room(tiles: &mut [TileKind], width: usize, room: &Room) {
    for y in room.y..room.y + room.height {
        for x in room.x..room.x + room.width {
            set_tile(tiles, width, Pos { y, x }, TileKind::Floor);
        }
    }
}

fn carve_l_shaped_corridor(
    tiles: &mut [TileKind],
    width: usize,
    height: usize,
    start: Pos,
    end: Pos,
    horizontal_first: bool,
) {
    if horizontal_first {
        carve_horizontal_line(tiles, width, height, start.y, start.x, end.x);
        carve_vertical_line(tiles, width, height, end.x, start.y, end.y);
    } else {
        carve_vertical_line(tiles, width, height, start.x, start.y, end.y);
        carve_horizontal_line(tiles, width, height, end.y, start.x, end.x);
    }
}

fn carve_horizontal_line(
    tiles: &mut [TileKind],
    width: usize,
    height: usize,
    y: i32,
    left_x: i32,
    right_x: i32,
) {
    for x in left_x.min(right_x)..=left_x.max(right_x) {
        let pos = Pos { y, x };
        if in_bounds(width, height, pos) {
            set_tile(tiles, width, pos, TileKind::Floor);
        }
    }
}

fn carve_vertical_line(
    tiles: &mut [TileKind],
    width: usize,
    height: usize,
    x: i32,
    top_y: i32,
    bottom_y: i32,
) {
    for y in top_y.min(bottom_y)..=top_y.max(bottom_y) {
        let pos = Pos { y, x };
        if in_bounds(width, height, pos) {
            set_tile(tiles, width, pos, TileKind::Floor);
        }
    }
}

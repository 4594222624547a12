//! Dungeon-depth progression rules used by level generation.

pub const MAP_WIDTH: usize = 50;
pub const MAP_HEIGHT: usize = 20;
pub const ROOM_COUNT: usize = 8;
pub const ITEM_COUNT: usize = 5;
pub const TRAP_COUNT: usize = 10;
pub const STARTING_DUNGEON_LEVEL: u32 = 1;

const BASE_ENEMY_COUNT: usize = 5;
const ENEMIES_PER_LEVEL: usize = 2;
const BOSS_LEVEL_INTERVAL: u32 = 5;

pub fn enemy_spawn_count(dungeon_level: u32) -> usize {
    BASE_ENEMY_COUNT + ENEMIES_PER_LEVEL * dungeon_level as usize
}

pub fn has_boss(dungeon_level: u32) -> bool {
    dungeon_level > 0 && dungeon_level % BOSS_LEVEL_INTERVAL == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enemy_count_scales_with_depth() {
        assert_eq!(enemy_spawn_count(1), 7);
        assert_eq!(enemy_spawn_count(4), 13);
    }

    #[test]
    fn boss_appears_every_fifth_level() {
        let boss_levels: Vec<u32> = (1..=15).filter(|level| has_boss(*level)).collect();
        assert_eq!(boss_levels, vec![5, 10, 15]);
    }
}

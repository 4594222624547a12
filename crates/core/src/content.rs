//! Fixed game-balance tables: starting stats, enemy formulas, item effects.

use crate::types::{Attribute, ItemKind};

pub const PLAYER_START_HP: i32 = 100;
pub const PLAYER_START_ATTACK: i32 = 10;
pub const PLAYER_START_DEFENSE: i32 = 5;
pub const PLAYER_START_LUCK: i32 = 5;
pub const PLAYER_START_XP_TO_LEVEL: u32 = 100;
pub const PLAYER_START_INVENTORY_SIZE: usize = 4;

pub const POTION_HEAL: i32 = 50;
pub const WATER_POOL_DURATION: u32 = 3;
pub const WATER_POOL_DAMAGE: i32 = 30;
pub const TRAP_DAMAGE_MIN: i32 = 10;
pub const TRAP_DAMAGE_MAX: i32 = 20;
pub const BOSS_INVENTORY_BONUS: usize = 2;

/// Enemies notice the player within this Euclidean distance.
pub const ENEMY_SIGHT_RADIUS: i32 = 5;

pub const MIN_MISS_CHANCE: i32 = 5;
pub const BASE_MISS_CHANCE: i32 = 20;
pub const MIN_ENEMY_DAMAGE: i32 = 2;

pub const SPECIAL_ITEM_CHANCE_PERCENT: i32 = 10;
pub const NORMAL_ITEM_POOL: [ItemKind; 5] = [
    ItemKind::Sword,
    ItemKind::Shield,
    ItemKind::Potion,
    ItemKind::Amulet,
    ItemKind::WaterTrapScroll,
];
pub const SPECIAL_ITEM_POOL: [ItemKind; 2] = [ItemKind::BagOfHolding, ItemKind::RingOfPower];

const NORMAL_EFFECT_MULTIPLIER: i32 = 2;

pub const ENEMY_SYMBOL: char = '☺';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyStats {
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub xp_value: u32,
}

pub fn regular_enemy_stats(dungeon_level: u32) -> EnemyStats {
    let level = dungeon_level as i32;
    EnemyStats {
        hp: 20 + level * 10,
        attack: 5 + level * 2,
        defense: 0,
        xp_value: 50 + dungeon_level * 10,
    }
}

pub fn boss_stats(dungeon_level: u32) -> EnemyStats {
    let level = dungeon_level as i32;
    EnemyStats {
        hp: 100 + level * 20,
        attack: 20 + level * 5,
        defense: 0,
        xp_value: 200 + dungeon_level * 50,
    }
}

pub fn player_miss_chance(luck: i32) -> i32 {
    (BASE_MISS_CHANCE - luck).max(MIN_MISS_CHANCE)
}

pub fn enemy_miss_chance(dungeon_level: u32) -> i32 {
    (BASE_MISS_CHANCE - 2 * dungeon_level as i32).max(MIN_MISS_CHANCE)
}

/// Damage dealt by the player; one formula for every enemy variant.
pub fn player_hit_damage(attack: i32, enemy_defense: i32) -> i32 {
    (attack - enemy_defense).max(0)
}

pub fn enemy_hit_damage(attack: i32, player_defense: i32) -> i32 {
    (attack - player_defense).max(MIN_ENEMY_DAMAGE)
}

pub fn next_xp_threshold(current: u32) -> u32 {
    current * 3 / 2
}

/// Permanent stat change granted while an item is held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatModifier {
    pub attack: i32,
    pub defense: i32,
    pub inventory_capacity: i32,
}

pub fn item_modifier(kind: ItemKind) -> StatModifier {
    match kind {
        ItemKind::Sword => StatModifier { attack: 5 * NORMAL_EFFECT_MULTIPLIER, ..Default::default() },
        ItemKind::Shield => {
            StatModifier { defense: 3 * NORMAL_EFFECT_MULTIPLIER, ..Default::default() }
        }
        ItemKind::Amulet => StatModifier {
            attack: 2 * NORMAL_EFFECT_MULTIPLIER,
            defense: 2 * NORMAL_EFFECT_MULTIPLIER,
            ..Default::default()
        },
        ItemKind::Potion | ItemKind::WaterTrapScroll => StatModifier::default(),
        ItemKind::BagOfHolding => StatModifier { inventory_capacity: 2, ..Default::default() },
        ItemKind::RingOfPower => StatModifier { attack: 10, defense: 5, ..Default::default() },
        ItemKind::BossTrophy => StatModifier { attack: 15, defense: 10, ..Default::default() },
    }
}

pub fn apply_message(kind: ItemKind) -> Option<&'static str> {
    match kind {
        ItemKind::BagOfHolding => Some("Your inventory capacity has increased!"),
        ItemKind::RingOfPower => Some("You feel a surge of power!"),
        ItemKind::BossTrophy => Some("You feel empowered by the Boss Trophy!"),
        _ => None,
    }
}

pub fn remove_message(kind: ItemKind) -> Option<&'static str> {
    match kind {
        ItemKind::BagOfHolding => Some("Your inventory capacity has decreased."),
        ItemKind::RingOfPower => Some("You feel less powerful."),
        ItemKind::BossTrophy => Some("The power of the Boss Trophy fades."),
        _ => None,
    }
}

pub struct AttributeUpgrade {
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub message: &'static str,
}

pub fn attribute_upgrade(attribute: Attribute) -> AttributeUpgrade {
    match attribute {
        Attribute::Health => AttributeUpgrade {
            max_hp: 20,
            attack: 0,
            defense: 0,
            message: "You have increased your maximum health!",
        },
        Attribute::Attack => AttributeUpgrade {
            max_hp: 0,
            attack: 5,
            defense: 0,
            message: "You have increased your attack power!",
        },
        Attribute::Defense => AttributeUpgrade {
            max_hp: 0,
            attack: 0,
            defense: 3,
            message: "You have increased your defense!",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_chances_never_drop_below_floor() {
        assert_eq!(player_miss_chance(5), 15);
        assert_eq!(player_miss_chance(30), MIN_MISS_CHANCE);
        assert_eq!(enemy_miss_chance(1), 18);
        assert_eq!(enemy_miss_chance(9), MIN_MISS_CHANCE);
    }

    #[test]
    fn enemy_damage_has_minimum_of_two() {
        assert_eq!(enemy_hit_damage(3, 50), 2);
        assert_eq!(enemy_hit_damage(30, 5), 25);
        assert_eq!(player_hit_damage(10, 0), 10);
        assert_eq!(player_hit_damage(3, 8), 0);
    }

    #[test]
    fn xp_threshold_grows_by_half_rounded_down() {
        assert_eq!(next_xp_threshold(100), 150);
        assert_eq!(next_xp_threshold(225), 337);
    }

    #[test]
    fn boss_outclasses_regular_enemy_on_same_level() {
        let regular = regular_enemy_stats(5);
        let boss = boss_stats(5);
        assert_eq!(regular, EnemyStats { hp: 70, attack: 15, defense: 0, xp_value: 100 });
        assert_eq!(boss, EnemyStats { hp: 200, attack: 45, defense: 0, xp_value: 450 });
    }

    #[test]
    fn only_consumables_have_no_passive_modifier() {
        for kind in NORMAL_ITEM_POOL.iter().chain(SPECIAL_ITEM_POOL.iter()) {
            let passive = item_modifier(*kind) != StatModifier::default();
            let consumable = matches!(kind, ItemKind::Potion | ItemKind::WaterTrapScroll);
            assert_eq!(passive, !consumable, "{kind:?}");
        }
    }
}

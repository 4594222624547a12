//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from simulation control code.
//! It does not own what a run replays or how intents are recorded.

use std::hash::Hasher;

use super::*;
use crate::state::TrapKind;
use xxhash_rust::xxh3::Xxh3;

impl Game {
    /// Content hash of the observable world. Entities are hashed in position
    /// order so the value does not depend on slot allocation.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.turn);
        hasher.write_u32(self.state.dungeon_level);
        hasher.write_u8(match self.phase {
            TurnPhase::AwaitingInput => 0,
            TurnPhase::Resolving => 1,
            TurnPhase::LevelComplete => 2,
            TurnPhase::PlayerDead => 3,
        });

        let player = &self.state.player;
        write_pos(&mut hasher, player.pos);
        for stat in [player.hp, player.max_hp, player.attack, player.defense, player.luck] {
            hasher.write_i32(stat);
        }
        for counter in [player.level, player.xp, player.xp_to_level, player.skill_points] {
            hasher.write_u32(counter);
        }
        hasher.write_u64(player.max_inventory_size as u64);
        hasher.write_u8(u8::from(player.is_alive));
        hasher.write_u64(player.inventory.len() as u64);
        for item in &player.inventory {
            hasher.write_u8(item.kind as u8);
        }

        let mut enemies: Vec<_> = self.state.enemies.values().collect();
        enemies.sort_by_key(|enemy| enemy.pos);
        hasher.write_u64(enemies.len() as u64);
        for enemy in enemies {
            write_pos(&mut hasher, enemy.pos);
            hasher.write_i32(enemy.hp);
            hasher.write_i32(enemy.attack);
            hasher.write_i32(enemy.defense);
            hasher.write_u8(u8::from(enemy.is_boss));
        }

        let mut items: Vec<_> = self.state.items.values().collect();
        items.sort_by_key(|ground| (ground.pos, ground.item.kind));
        hasher.write_u64(items.len() as u64);
        for ground in items {
            write_pos(&mut hasher, ground.pos);
            hasher.write_u8(ground.item.kind as u8);
        }

        let mut traps: Vec<_> = self.state.traps.values().collect();
        traps.sort_by_key(|trap| trap.pos);
        hasher.write_u64(traps.len() as u64);
        for trap in traps {
            write_pos(&mut hasher, trap.pos);
            hasher.write_u8(u8::from(trap.disabled));
            match trap.kind {
                TrapKind::Static => hasher.write_u8(0),
                TrapKind::WaterPool { turns_left, damage } => {
                    hasher.write_u8(1);
                    hasher.write_u32(turns_left);
                    hasher.write_i32(damage);
                }
            }
        }

        for tile in &self.state.map.tiles {
            hasher.write_u8(*tile as u8);
        }
        hasher.finish()
    }
}

fn write_pos(hasher: &mut Xxh3, pos: Pos) {
    hasher.write_i32(pos.y);
    hasher.write_i32(pos.x);
}

//! Enemy turn: greedy pursuit of a visible player and melee on contact.
//! This module exists to keep enemy stepping rules apart from player movement.
//! It does not own damage formulas, which live in combat.

use super::*;
use crate::content::ENEMY_SIGHT_RADIUS;

impl Game {
    /// Every enemy that sees the player steps one tile toward them on both axes.
    /// A step that would land on the player becomes an attack instead; a step into
    /// a wall or another body is skipped.
    pub(super) fn move_enemies(&mut self) {
        let enemy_ids: Vec<EnemyId> = self.state.enemies.keys().collect();
        for enemy_id in enemy_ids {
            if !self.state.player.is_alive {
                return;
            }
            let Some(enemy) = self.state.enemies.get(enemy_id) else {
                continue;
            };
            let player_pos = self.state.player.pos;
            if !can_see(enemy.pos, player_pos) {
                continue;
            }

            let next = Pos {
                y: enemy.pos.y + (player_pos.y - enemy.pos.y).signum(),
                x: enemy.pos.x + (player_pos.x - enemy.pos.x).signum(),
            };
            if next == player_pos {
                self.enemy_attack(enemy_id);
            } else if self.state.map.tile_at(next).is_walkable() && !self.state.is_occupied(next) {
                self.state.enemies[enemy_id].pos = next;
            }
        }
    }
}

/// Euclidean sight check with no occlusion.
fn can_see(from: Pos, to: Pos) -> bool {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    dx * dx + dy * dy <= ENEMY_SIGHT_RADIUS * ENEMY_SIGHT_RADIUS
}

//! Floor traps, deployable water pools and their per-turn upkeep.
//! This module exists to keep trap triggers and timers out of movement code.
//! It does not own the experience rewards for kills, which go through combat.

use super::*;
use crate::content::{TRAP_DAMAGE_MAX, TRAP_DAMAGE_MIN, WATER_POOL_DAMAGE, WATER_POOL_DURATION};
use crate::state::TrapKind;

impl Game {
    /// Springs an armed floor trap under the player.
    pub(super) fn trigger_trap(&mut self, trap_id: TrapId) {
        let Some(trap) = self.state.traps.get(trap_id) else {
            return;
        };
        if !trap.is_active() || trap.kind != TrapKind::Static || !self.state.player.is_alive {
            return;
        }

        self.emit(GameEvent::Hit);
        let damage = self.rng.range_inclusive(TRAP_DAMAGE_MIN, TRAP_DAMAGE_MAX);
        let lethal = self.state.player.take_damage(damage);
        self.say(format!("You triggered a trap and took {damage} damage!"));
        if lethal {
            self.say("You have been killed by a trap!");
            self.kill_player();
        }
    }

    /// Permanently disarms the active trap the player stands on. A free action.
    pub fn disable_trap(&mut self) -> TurnReport {
        if !self.ensure_running() {
            return self.finish_free_action();
        }
        let pos = self.state.player.pos;
        match self.state.active_trap_at(pos) {
            Some(trap_id) => {
                self.state.traps[trap_id].disabled = true;
                self.state.refresh_tile(pos);
                self.say("You have disabled the trap.");
            }
            None => self.reject(GameError::NoTrapHere),
        }
        self.finish_free_action()
    }

    pub(super) fn place_water_pool(&mut self, direction: Direction) {
        let target = self.state.player.pos.step(direction);
        if self.state.map.tile_at(target) != TileKind::Floor {
            self.say("You cannot place a water pool there.");
            return;
        }
        self.state.add_trap(
            target,
            TrapKind::WaterPool { turns_left: WATER_POOL_DURATION, damage: WATER_POOL_DAMAGE },
        );
        self.say(format!("You create a water pool trap to the {}!", direction.name()));
    }

    /// End-of-turn environment tick: timed traps count down and expire at zero;
    /// surviving active water pools hurt every enemy standing in them.
    pub(super) fn update_traps(&mut self) {
        let trap_ids: Vec<TrapId> = self
            .state
            .traps
            .iter()
            .filter(|(_, trap)| trap.is_water_pool())
            .map(|(id, _)| id)
            .collect();
        for trap_id in trap_ids {
            let Some(trap) = self.state.traps.get_mut(trap_id) else {
                continue;
            };
            let TrapKind::WaterPool { turns_left, damage } = &mut trap.kind else {
                continue;
            };
            *turns_left = turns_left.saturating_sub(1);
            if *turns_left == 0 {
                let pos = trap.pos;
                self.state.traps.remove(trap_id);
                self.state.refresh_tile(pos);
                continue;
            }
            if trap.disabled {
                continue;
            }

            let (pos, damage) = (trap.pos, *damage);
            self.flood_enemies_at(pos, damage);
        }
    }

    fn flood_enemies_at(&mut self, pos: Pos, damage: i32) {
        let victims: Vec<EnemyId> = self
            .state
            .enemies
            .iter()
            .filter(|(_, enemy)| enemy.pos == pos)
            .map(|(id, _)| id)
            .collect();
        for enemy_id in victims {
            let enemy = &mut self.state.enemies[enemy_id];
            enemy.hp -= damage;
            let defeated = enemy.hp <= 0;
            self.say(format!("An enemy takes {damage} damage from the water pool!"));
            if defeated {
                self.say("An enemy has been defeated by the water pool!");
                self.defeat_enemy(enemy_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn floor_trap_damage_is_in_range() {
        for seed in 0..25 {
            let mut game = arena_game_with_seed(seed);
            let trap = add_floor_trap(&mut game, arena_center());
            game.trigger_trap(trap);
            let lost = 100 - game.state.player.hp;
            assert!((TRAP_DAMAGE_MIN..=TRAP_DAMAGE_MAX).contains(&lost), "lost {lost}");
        }
    }

    #[test]
    fn lethal_trap_kills_once() {
        let mut game = arena_game();
        let trap = add_floor_trap(&mut game, arena_center());
        game.state.player.hp = 5;

        game.trigger_trap(trap);
        game.trigger_trap(trap);
        let report = game.finish_free_action();

        assert_eq!(game.state.player.hp, 0);
        assert_eq!(game.phase(), TurnPhase::PlayerDead);
        assert_eq!(report.events.iter().filter(|e| **e == GameEvent::Death).count(), 1);
        assert!(report.messages.contains(&"You have been killed by a trap!".to_string()));
    }

    #[test]
    fn disabled_traps_are_inert_and_stay_disabled() {
        let mut game = arena_game();
        let trap = add_floor_trap(&mut game, arena_center());

        let report = game.disable_trap();
        assert_eq!(report.messages, vec!["You have disabled the trap.".to_string()]);
        assert_eq!(game.state.map.tile_at(arena_center()), TileKind::Floor);

        game.trigger_trap(trap);
        assert_eq!(game.state.player.hp, 100);

        let report = game.disable_trap();
        assert_eq!(report.errors, vec![GameError::NoTrapHere]);
        assert!(game.state.traps[trap].disabled);
    }

    #[test]
    fn water_pool_expires_after_three_ticks() {
        let mut game = arena_game();
        give_item(&mut game, ItemKind::WaterTrapScroll);

        let report = game.use_item(1, Some(Direction::Right));
        assert_eq!(report.messages, vec!["You create a water pool trap to the right!".to_string()]);
        let pool_pos = arena_center().step(Direction::Right);
        let trap_id = game.state.active_trap_at(pool_pos).expect("pool placed");
        assert_eq!(
            game.state.traps[trap_id].kind,
            TrapKind::WaterPool { turns_left: 3, damage: 30 }
        );

        game.update_traps();
        game.update_traps();
        assert!(game.state.traps.contains_key(trap_id));
        game.update_traps();
        assert!(game.state.traps.is_empty());
    }

    #[test]
    fn scroll_aimed_at_wall_is_still_consumed() {
        let mut game = arena_game();
        game.state.player.pos = Pos { y: 1, x: 1 };
        give_item(&mut game, ItemKind::WaterTrapScroll);

        let report = game.use_item(1, Some(Direction::Up));

        assert!(game.state.player.inventory.is_empty());
        assert!(game.state.traps.is_empty());
        assert_eq!(report.messages, vec!["You cannot place a water pool there.".to_string()]);
    }

    #[test]
    fn water_pool_kill_awards_experience() {
        let mut game = arena_game();
        let pos = arena_center().step(Direction::Down);
        add_water_pool(&mut game, pos);
        add_enemy(&mut game, pos, 50, 5);

        game.update_traps();
        assert_eq!(game.state.enemies.values().next().map(|enemy| enemy.hp), Some(20));
        game.update_traps();
        let report = game.finish_free_action();

        assert!(game.state.enemies.is_empty());
        assert_eq!(game.state.player.xp, 60);
        assert!(report.messages.contains(&"An enemy has been defeated by the water pool!".to_string()));
        assert!(report.messages.contains(&"You gained 60 XP!".to_string()));
    }

    #[test]
    fn water_pool_never_hurts_the_player() {
        let mut game = arena_game();
        let trap = add_water_pool(&mut game, arena_center());
        game.trigger_trap(trap);
        game.update_traps();
        assert_eq!(game.state.player.hp, 100);
    }
}

//! Combat resolution, experience and character progression.
//! This module exists to keep hit, miss and leveling rules out of turn sequencing.
//! It does not own enemy movement or the decision of when an attack happens.

use tracing::debug;

use super::*;
use crate::content::{self, BOSS_INVENTORY_BONUS};
use crate::state::Item;

impl Game {
    pub(super) fn player_attack(&mut self, enemy_id: EnemyId) {
        self.emit(GameEvent::Attack);
        let miss_chance = content::player_miss_chance(self.state.player.luck);
        if self.rng.percent_roll(miss_chance) {
            self.say("You miss!");
            return;
        }

        let attack = self.state.player.attack;
        let Some(enemy) = self.state.enemies.get_mut(enemy_id) else {
            return;
        };
        let damage = content::player_hit_damage(attack, enemy.defense);
        enemy.hp -= damage;
        let target = enemy.the_name();
        let defeated = enemy.hp <= 0;
        let is_boss = enemy.is_boss;

        self.say(format!("You hit {target} for {damage} damage!"));
        if defeated {
            let victim = if is_boss { "the Boss" } else { "an enemy" };
            self.say(format!("You have defeated {victim}!"));
            self.defeat_enemy(enemy_id);
        }
    }

    pub(super) fn enemy_attack(&mut self, enemy_id: EnemyId) {
        let Some(enemy) = self.state.enemies.get(enemy_id) else {
            return;
        };
        let attacker = if enemy.is_boss { "The Boss" } else { "An enemy" };
        let attack = enemy.attack;

        self.emit(GameEvent::Hit);
        let miss_chance = content::enemy_miss_chance(self.state.dungeon_level);
        if self.rng.percent_roll(miss_chance) {
            self.say(format!("{attacker} misses you!"));
            return;
        }

        let damage = content::enemy_hit_damage(attack, self.state.player.defense);
        let lethal = self.state.player.take_damage(damage);
        self.say(format!("{attacker} hits you for {damage} damage!"));
        if lethal {
            self.kill_player();
        }
    }

    /// Single exit for every kill: removes the enemy, awards experience and pays
    /// out the boss bonus regardless of what dealt the final blow.
    pub(super) fn defeat_enemy(&mut self, enemy_id: EnemyId) {
        let Some(enemy) = self.state.enemies.remove(enemy_id) else {
            return;
        };
        self.gain_experience(enemy.xp_value);

        if enemy.is_boss {
            self.state.player.max_inventory_size += BOSS_INVENTORY_BONUS;
            self.say(format!("Your inventory capacity has increased by {BOSS_INVENTORY_BONUS}!"));
            self.state.drop_item_at(enemy.pos, Item::new(ItemKind::BossTrophy));
            debug!(pos = ?enemy.pos, "boss defeated, trophy dropped");
        }
    }

    pub(super) fn gain_experience(&mut self, amount: u32) {
        self.state.player.xp += amount;
        self.say(format!("You gained {amount} XP!"));
        while self.state.player.xp >= self.state.player.xp_to_level {
            self.level_up();
        }
    }

    fn level_up(&mut self) {
        let player = &mut self.state.player;
        player.xp -= player.xp_to_level;
        player.level += 1;
        player.skill_points += 1;
        player.luck += 1;
        player.xp_to_level = content::next_xp_threshold(player.xp_to_level);
        let message = format!(
            "You leveled up to level {}! Luck increased to {}. You have gained 1 skill point.",
            player.level, player.luck
        );

        self.emit(GameEvent::LevelUp);
        self.say(message);
    }

    /// Spends one skill point on `attribute`. A free action.
    pub fn upgrade_attribute(&mut self, attribute: Attribute) -> TurnReport {
        if self.ensure_running() {
            self.spend_skill_point(Ok(attribute));
        }
        self.finish_free_action()
    }

    /// Text-keyed variant of [`Game::upgrade_attribute`]. Skill points are checked
    /// before the name, so an unknown name with no points reports the missing points.
    pub fn upgrade_attribute_named(&mut self, name: &str) -> TurnReport {
        if self.ensure_running() {
            self.spend_skill_point(name.parse());
        }
        self.finish_free_action()
    }

    fn spend_skill_point(&mut self, attribute: Result<Attribute, GameError>) {
        if self.state.player.skill_points == 0 {
            self.reject(GameError::NoSkillPoints);
            return;
        }
        let attribute = match attribute {
            Ok(attribute) => attribute,
            Err(error) => {
                self.reject(error);
                return;
            }
        };

        let upgrade = content::attribute_upgrade(attribute);
        let player = &mut self.state.player;
        player.skill_points -= 1;
        player.max_hp += upgrade.max_hp;
        player.hp += upgrade.max_hp;
        player.attack += upgrade.attack;
        player.defense += upgrade.defense;

        self.emit(GameEvent::Upgrade);
        self.say(upgrade.message);
    }
}

//! Item pickup, passive stat effects, consumables and dropping.
//! This module exists to keep inventory rules separate from turn orchestration.
//! It does not own trap behaviour beyond handing a scroll's target to the trap module.

use super::*;
use crate::content::{self, POTION_HEAL};
use crate::state::Item;

impl Game {
    /// Moves the ground item into the pack when there is room.
    pub(super) fn pick_up(&mut self, item_id: ItemId) {
        if self.state.player.inventory_full() {
            let capacity = self.state.player.max_inventory_size;
            self.reject(GameError::InventoryFull { capacity });
            return;
        }
        let Some(ground) = self.state.items.remove(item_id) else {
            return;
        };
        self.state.refresh_tile(ground.pos);

        let kind = ground.item.kind;
        self.state.player.inventory.push(ground.item);
        if kind.applies_on_pickup() {
            self.apply_item_effect(kind);
        }
        self.say(format!("You picked up a {kind}!"));
        self.emit(GameEvent::Pickup);
    }

    pub(super) fn apply_item_effect(&mut self, kind: ItemKind) {
        let modifier = content::item_modifier(kind);
        let player = &mut self.state.player;
        player.attack += modifier.attack;
        player.defense += modifier.defense;
        player.max_inventory_size =
            player.max_inventory_size.saturating_add_signed(modifier.inventory_capacity as isize);
        if let Some(message) = content::apply_message(kind) {
            self.say(message);
        }
    }

    /// Exact inverse of [`Game::apply_item_effect`], except that capacity never
    /// drops below what the pack already holds.
    pub(super) fn remove_item_effect(&mut self, kind: ItemKind) {
        let modifier = content::item_modifier(kind);
        let player = &mut self.state.player;
        player.attack -= modifier.attack;
        player.defense -= modifier.defense;
        player.max_inventory_size = player
            .max_inventory_size
            .saturating_add_signed(-(modifier.inventory_capacity as isize))
            .max(player.inventory.len());
        if let Some(message) = content::remove_message(kind) {
            self.say(message);
        }
    }

    /// Uses the item in 1-based `slot`. Potions heal; a water trap scroll needs a
    /// direction and is spent even when the target tile cannot hold a pool. A free action.
    pub fn use_item(&mut self, slot: usize, direction: Option<Direction>) -> TurnReport {
        if !self.ensure_running() {
            return self.finish_free_action();
        }
        let Some(index) = self.slot_index(slot) else {
            return self.finish_free_action();
        };

        let kind = self.state.player.inventory[index].kind;
        match kind {
            ItemKind::Potion => {
                self.state.player.inventory.remove(index);
                self.state.player.heal(POTION_HEAL);
                self.emit(GameEvent::Heal);
                self.say(format!("You used a Potion and restored {POTION_HEAL} HP!"));
            }
            ItemKind::WaterTrapScroll => {
                let Some(direction) = direction else {
                    self.reject(GameError::InvalidDirection);
                    return self.finish_free_action();
                };
                self.state.player.inventory.remove(index);
                self.place_water_pool(direction);
            }
            other => self.reject(GameError::ItemNotUsable(other)),
        }
        self.finish_free_action()
    }

    /// Text-keyed variant of [`Game::use_item`]. A malformed direction token counts
    /// as no direction at all.
    pub fn use_item_named(&mut self, slot: usize, direction: Option<&str>) -> TurnReport {
        self.use_item(slot, direction.and_then(|token| token.parse().ok()))
    }

    /// Drops the item in 1-based `slot` onto the player's tile and undoes its effect.
    /// A free action.
    pub fn drop_item(&mut self, slot: usize) -> TurnReport {
        if !self.ensure_running() {
            return self.finish_free_action();
        }
        let Some(index) = self.slot_index(slot) else {
            return self.finish_free_action();
        };

        let item: Item = self.state.player.inventory.remove(index);
        self.say(format!("You dropped a {}.", item.kind));
        let pos = self.state.player.pos;
        self.state.drop_item_at(pos, item);
        if item.kind.applies_on_pickup() {
            self.remove_item_effect(item.kind);
        }
        self.finish_free_action()
    }

    fn slot_index(&mut self, slot: usize) -> Option<usize> {
        let len = self.state.player.inventory.len();
        if slot == 0 || slot > len {
            self.reject(GameError::InvalidSlot { slot, len });
            return None;
        }
        Some(slot - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn pickup_then_drop_restores_stats_exactly() {
        for kind in [ItemKind::Sword, ItemKind::Shield, ItemKind::Amulet, ItemKind::RingOfPower] {
            let mut game = arena_game();
            let before = (game.state.player.attack, game.state.player.defense);
            let item = add_ground_item(&mut game, arena_center(), kind);

            game.pick_up(item);
            assert_ne!((game.state.player.attack, game.state.player.defense), before, "{kind:?}");
            game.drop_item(1);

            assert_eq!((game.state.player.attack, game.state.player.defense), before, "{kind:?}");
            assert!(game.state.player.inventory.is_empty());
            assert!(game.state.item_at(arena_center()).is_some());
        }
    }

    #[test]
    fn sword_pickup_adds_ten_attack_and_reports_it() {
        let mut game = arena_game();
        let item = add_ground_item(&mut game, arena_center(), ItemKind::Sword);
        game.pick_up(item);
        let report = game.finish_free_action();

        assert_eq!(game.state.player.attack, 20);
        assert_eq!(report.messages, vec!["You picked up a Sword!".to_string()]);
        assert!(report.has_event(GameEvent::Pickup));
        assert_eq!(game.state.map.tile_at(arena_center()), TileKind::Floor);
    }

    #[test]
    fn full_pack_leaves_item_on_the_ground() {
        let mut game = arena_game();
        for _ in 0..4 {
            give_item(&mut game, ItemKind::Potion);
        }
        let item = add_ground_item(&mut game, arena_center(), ItemKind::Sword);

        game.pick_up(item);
        let report = game.finish_free_action();

        assert_eq!(game.state.player.inventory.len(), 4);
        assert!(game.state.items.contains_key(item));
        assert_eq!(report.errors, vec![GameError::InventoryFull { capacity: 4 }]);
        assert_eq!(report.messages, vec!["Inventory full! Cannot pick up more items.".to_string()]);
    }

    #[test]
    fn potion_heals_up_to_max_and_is_consumed() {
        let mut game = arena_game();
        give_item(&mut game, ItemKind::Potion);
        game.state.player.hp = 80;

        let report = game.use_item(1, None);

        assert_eq!(game.state.player.hp, 100);
        assert!(game.state.player.inventory.is_empty());
        assert!(report.has_event(GameEvent::Heal));
        assert_eq!(report.messages, vec!["You used a Potion and restored 50 HP!".to_string()]);
        assert_eq!(report.outcome, TurnOutcome::FreeAction);
    }

    #[test]
    fn passive_items_cannot_be_used() {
        let mut game = arena_game();
        give_item(&mut game, ItemKind::Shield);
        let report = game.use_item(1, None);
        assert_eq!(report.errors, vec![GameError::ItemNotUsable(ItemKind::Shield)]);
        assert_eq!(report.messages, vec!["You cannot use Shield right now.".to_string()]);
        assert_eq!(game.state.player.inventory.len(), 1);
    }

    #[test]
    fn bad_slots_are_rejected_without_side_effects() {
        let mut game = arena_game();
        give_item(&mut game, ItemKind::Sword);
        let attack = game.state.player.attack;

        for slot in [0, 2, 9] {
            let report = game.drop_item(slot);
            assert_eq!(report.errors, vec![GameError::InvalidSlot { slot, len: 1 }]);
            let report = game.use_item(slot, Some(Direction::Up));
            assert_eq!(report.errors, vec![GameError::InvalidSlot { slot, len: 1 }]);
        }
        assert_eq!(game.state.player.inventory.len(), 1);
        assert_eq!(game.state.player.attack, attack);
    }

    #[test]
    fn scroll_without_direction_is_kept() {
        let mut game = arena_game();
        give_item(&mut game, ItemKind::WaterTrapScroll);
        let report = game.use_item(1, None);
        assert_eq!(report.errors, vec![GameError::InvalidDirection]);
        assert_eq!(game.state.player.inventory.len(), 1);
        assert!(game.state.traps.is_empty());
    }

    #[test]
    fn scroll_with_malformed_direction_token_is_kept() {
        let mut game = arena_game();
        give_item(&mut game, ItemKind::WaterTrapScroll);

        let report = game.use_item_named(1, Some("north"));
        assert_eq!(report.errors, vec![GameError::InvalidDirection]);
        assert_eq!(game.state.player.inventory.len(), 1);

        let report = game.use_item_named(1, Some("Up"));
        assert!(report.errors.is_empty());
        assert!(game.state.player.inventory.is_empty());
        assert_eq!(game.state.traps.len(), 1);
    }

    #[test]
    fn dropping_bag_never_shrinks_capacity_below_contents() {
        let mut game = arena_game();
        give_item(&mut game, ItemKind::BagOfHolding);
        assert_eq!(game.state.player.max_inventory_size, 6);
        for _ in 0..5 {
            give_item(&mut game, ItemKind::Potion);
        }

        game.drop_item(1);

        assert_eq!(game.state.player.inventory.len(), 5);
        assert_eq!(game.state.player.max_inventory_size, 5);
    }

    #[test]
    fn drop_on_trap_shows_item_marker_first() {
        let mut game = arena_game();
        add_floor_trap(&mut game, arena_center());
        give_item(&mut game, ItemKind::BagOfHolding);

        let report = game.drop_item(1);

        assert_eq!(game.state.map.tile_at(arena_center()), TileKind::SpecialItem);
        assert_eq!(
            report.messages,
            vec![
                "You dropped a Bag of Holding.".to_string(),
                "Your inventory capacity has decreased.".to_string(),
            ]
        );
    }
}

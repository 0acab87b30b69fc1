//! Ownership transfers between the floor and an actor's pack, and equipment toggling.

use super::*;

impl Game {
    pub(super) fn pick_up(&mut self, actor: EntityId) -> Result<(), Impossible> {
        let pos = self.state.actors[actor].pos;
        let item = *self.ground_items_at(pos).first().ok_or(Impossible::NothingToPickUp)?;
        if self.state.actors[actor].inventory.is_full() {
            return Err(Impossible::InventoryFull);
        }

        self.state.items[item].location = ItemLocation::Carried(actor);
        self.state.actors[actor].inventory.items.push(item);
        let text = format!("You picked up the {}!", self.state.items[item].name);
        self.add_message(text, palette::WHITE);
        Ok(())
    }

    pub(super) fn drop_item(&mut self, actor: EntityId, item: ItemId) -> Result<(), Impossible> {
        self.ensure_carried(actor, item)?;

        if self.state.actors[actor].equipment.is_equipped(item) {
            self.unequip(actor, item);
        }
        let pos = self.state.actors[actor].pos;
        self.state.actors[actor].inventory.remove(item);
        self.state.items[item].location = ItemLocation::Ground(pos);
        let text = format!("You dropped the {}.", self.state.items[item].name);
        self.add_message(text, palette::WHITE);
        Ok(())
    }

    pub(super) fn toggle_equip(&mut self, actor: EntityId, item: ItemId) -> Result<(), Impossible> {
        let equippable = self.ensure_carried(actor, item)?.equippable.ok_or(Impossible::NotEquippable)?;

        let occupant = self.state.actors[actor].equipment.slot(equippable.slot);
        if occupant == Some(item) {
            self.unequip(actor, item);
            return Ok(());
        }
        if let Some(previous) = occupant {
            self.unequip(actor, previous);
        }
        *self.state.actors[actor].equipment.slot_mut(equippable.slot) = Some(item);
        let text = format!("You equip the {}.", self.state.items[item].name);
        self.add_message(text, palette::WHITE);
        Ok(())
    }

    fn unequip(&mut self, actor: EntityId, item: ItemId) {
        let Some(slot) = self.state.items.get(item).and_then(|i| i.equippable).map(|e| e.slot) else {
            return;
        };
        let equipment = &mut self.state.actors[actor].equipment;
        if equipment.slot(slot) == Some(item) {
            *equipment.slot_mut(slot) = None;
            let text = format!("You remove the {}.", self.state.items[item].name);
            self.add_message(text, palette::WHITE);
        }
    }

    pub(super) fn ensure_carried(&self, actor: EntityId, item: ItemId) -> Result<&Item, Impossible> {
        let held = self.state.items.get(item).ok_or(Impossible::NotCarried)?;
        if held.location != ItemLocation::Carried(actor)
            || !self.state.actors[actor].inventory.contains(item)
        {
            return Err(Impossible::NotCarried);
        }
        Ok(held)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn pick_up_moves_item_from_floor_into_pack() {
        let mut game = arena_game(&[], &[(ItemKind::HealthPotion, Pos { y: 4, x: 4 })]);
        let player = game.player_id();
        let potion = game.ground_items_at(Pos { y: 4, x: 4 })[0];

        game.perform(player, Action::PickUp).expect("potion underfoot");

        assert_eq!(game.state.items[potion].location, ItemLocation::Carried(player));
        assert_eq!(game.player().inventory.items, vec![potion]);
        assert!(game.ground_items_at(Pos { y: 4, x: 4 }).is_empty());
    }

    #[test]
    fn pick_up_with_nothing_underfoot_fails() {
        let mut game = arena_game(&[], &[(ItemKind::HealthPotion, Pos { y: 5, x: 5 })]);
        let player = game.player_id();
        assert_eq!(game.perform(player, Action::PickUp), Err(Impossible::NothingToPickUp));
        assert!(game.player().inventory.items.is_empty());
    }

    #[test]
    fn pick_up_takes_one_item_per_action() {
        let here = Pos { y: 4, x: 4 };
        let mut game = arena_game(&[], &[(ItemKind::Stick, here), (ItemKind::Knife, here)]);
        let player = game.player_id();

        game.perform(player, Action::PickUp).expect("first item");
        assert_eq!(game.player().inventory.items.len(), 1);
        assert_eq!(game.ground_items_at(here).len(), 1);
    }

    #[test]
    fn drop_unequips_first_and_places_item_underfoot() {
        let mut game = arena_game(&[], &[]);
        let player = game.player_id();
        let knife = give_item(&mut game, ItemKind::Knife);
        game.perform(player, Action::Equip { item: knife }).expect("equip knife");

        game.perform(player, Action::Drop { item: knife }).expect("drop knife");

        assert_eq!(game.player().equipment.weapon, None);
        assert!(game.player().inventory.items.is_empty());
        assert_eq!(game.state.items[knife].location, ItemLocation::Ground(game.player().pos));
        assert_eq!(game.power(player), 5);
    }

    #[test]
    fn dropping_an_item_not_carried_fails() {
        let mut game = arena_game(&[], &[(ItemKind::Stick, Pos { y: 5, x: 5 })]);
        let player = game.player_id();
        let stick = game.ground_items_at(Pos { y: 5, x: 5 })[0];
        assert_eq!(game.perform(player, Action::Drop { item: stick }), Err(Impossible::NotCarried));
    }

    #[test]
    fn equipping_into_occupied_slot_replaces_previous_item() {
        let mut game = arena_game(&[], &[]);
        let player = game.player_id();
        let stick = give_item(&mut game, ItemKind::Stick);
        let knife = give_item(&mut game, ItemKind::Knife);

        game.perform(player, Action::Equip { item: stick }).expect("equip stick");
        game.perform(player, Action::Equip { item: knife }).expect("equip knife");

        assert_eq!(game.player().equipment.weapon, Some(knife));
        assert_eq!(game.power(player), 9);
    }

    #[test]
    fn equipping_an_equipped_item_removes_it() {
        let mut game = arena_game(&[], &[]);
        let player = game.player_id();
        let shield = give_item(&mut game, ItemKind::Shield);

        game.perform(player, Action::Equip { item: shield }).expect("equip");
        game.perform(player, Action::Equip { item: shield }).expect("unequip");

        assert_eq!(game.player().equipment.armor, None);
        assert_eq!(game.defense(player), 2);
    }

    #[test]
    fn potions_cannot_be_equipped() {
        let mut game = arena_game(&[], &[]);
        let player = game.player_id();
        let potion = give_item(&mut game, ItemKind::HealthPotion);
        assert_eq!(game.perform(player, Action::Equip { item: potion }), Err(Impossible::NotEquippable));
    }
}

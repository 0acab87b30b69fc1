//! Single-use item effects. Targeted effects ask for a cell first and activate
//! once the same `UseItem` comes back with one. Any successful activation uses
//! up the item.

use super::*;

impl Game {
    pub(super) fn use_item(
        &mut self,
        actor: EntityId,
        item: ItemId,
        target: Option<Pos>,
    ) -> Result<ActionOutcome, Impossible> {
        let held = self.ensure_carried(actor, item)?;
        let consumable = held.consumable.ok_or(Impossible::NotUsable)?;
        let item_name = held.name.clone();

        match consumable {
            Consumable::Healing { amount } => {
                let fighter = &self.state.actors[actor].fighter;
                if fighter.hp() >= fighter.max_hp {
                    return Err(Impossible::HealthFull);
                }
                self.consume(actor, item);
                let recovered = self.state.actors[actor].fighter.heal(amount);
                self.add_message(
                    format!("You consume the {item_name}, and recover {recovered} HP."),
                    palette::HEALTH_RECOVERED,
                );
            }
            Consumable::Lightning { damage, max_range } => {
                let struck = self.closest_visible_enemy(actor, max_range).ok_or(Impossible::NoEnemyInRange)?;
                self.consume(actor, item);
                self.add_message(
                    format!(
                        "A lightning bolt strikes the {} with a loud thunder, for {damage} damage!",
                        self.state.actors[struck].name
                    ),
                    palette::WHITE,
                );
                self.apply_damage(struck, damage);
            }
            Consumable::Confusion { turns } => {
                let Some(cell) = target else {
                    return Ok(self.request_target(item, TargetKind::Single));
                };
                if !self.state.map.is_visible(cell) {
                    return Err(Impossible::TargetNotVisible);
                }
                let victim = self.living_actor_at(cell).ok_or(Impossible::NoEnemyAtTarget)?;
                if victim == actor {
                    return Err(Impossible::CannotConfuseSelf);
                }
                self.consume(actor, item);
                let victim_actor = &mut self.state.actors[victim];
                if let Some(previous) = victim_actor.ai.take() {
                    victim_actor.ai =
                        Some(Ai::Confused { previous: Box::new(previous), turns_remaining: turns });
                }
                let text = format!(
                    "The eyes of the {} look vacant, as it starts to stumble around!",
                    victim_actor.name
                );
                self.add_message(text, palette::STATUS_EFFECT_APPLIED);
            }
            Consumable::Fireball { damage, radius } => {
                let Some(cell) = target else {
                    return Ok(self.request_target(item, TargetKind::Area { radius }));
                };
                if !self.state.map.is_visible(cell) {
                    return Err(Impossible::TargetNotVisible);
                }
                let caught: Vec<EntityId> = self
                    .state
                    .actors
                    .iter()
                    .filter(|(_, a)| a.is_alive() && a.pos.distance(cell) <= f64::from(radius))
                    .map(|(id, _)| id)
                    .collect();
                if caught.is_empty() {
                    return Err(Impossible::NoTargetsInRadius);
                }
                self.consume(actor, item);
                for victim in caught {
                    let text = format!(
                        "The {} is engulfed in a fiery explosion, taking {damage} damage!",
                        self.state.actors[victim].name
                    );
                    self.add_message(text, palette::WHITE);
                    self.apply_damage(victim, damage);
                }
            }
        }
        Ok(ActionOutcome::Performed)
    }

    fn request_target(&mut self, item: ItemId, kind: TargetKind) -> ActionOutcome {
        self.add_message("Select a target location.", palette::NEEDS_TARGET);
        ActionOutcome::NeedsTarget(PendingTargetSelection { item, kind })
    }

    fn closest_visible_enemy(&self, actor: EntityId, max_range: i32) -> Option<EntityId> {
        let origin = self.state.actors[actor].pos;
        let mut closest = None;
        let mut closest_distance = f64::from(max_range) + 1.0;
        for (id, other) in &self.state.actors {
            if id == actor || !other.is_alive() || !self.state.map.is_visible(other.pos) {
                continue;
            }
            let distance = origin.distance(other.pos);
            if distance < closest_distance {
                closest = Some(id);
                closest_distance = distance;
            }
        }
        closest
    }

    fn consume(&mut self, actor: EntityId, item: ItemId) {
        self.state.actors[actor].inventory.remove(item);
        self.state.items.remove(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn healing_restores_hp_and_is_consumed() {
        let mut game = arena_game(&[], &[]);
        let player = game.player_id();
        let potion = give_item(&mut game, ItemKind::HealthPotion);
        game.state.actors[player].fighter.set_hp(20);

        let outcome = game.perform(player, Action::UseItem { item: potion, target: None });

        assert_eq!(outcome, Ok(ActionOutcome::Performed));
        assert_eq!(game.player().fighter.hp(), 24);
        assert!(game.player().inventory.items.is_empty());
        assert!(!game.state.items.contains_key(potion));
    }

    #[test]
    fn healing_at_full_health_fails_and_keeps_potion() {
        let mut game = arena_game(&[], &[]);
        let player = game.player_id();
        let potion = give_item(&mut game, ItemKind::HealthPotion);

        assert_eq!(
            game.perform(player, Action::UseItem { item: potion, target: None }),
            Err(Impossible::HealthFull)
        );
        assert_eq!(game.player().inventory.items, vec![potion]);
    }

    #[test]
    fn lightning_hits_nearest_visible_enemy_and_is_consumed() {
        let near = Pos { y: 4, x: 6 };
        let far = Pos { y: 4, x: 8 };
        let mut game = arena_game(&[(MonsterKind::Frog, near), (MonsterKind::Frog, far)], &[]);
        let player = game.player_id();
        let scroll = give_item(&mut game, ItemKind::LightningScroll);
        let near_frog = monster_at(&game, near);
        let far_frog = monster_at(&game, far);

        game.perform(player, Action::UseItem { item: scroll, target: None }).expect("frog in range");

        assert!(!game.state.actors[near_frog].is_alive(), "20 damage kills a 16 hp frog");
        assert_eq!(game.state.actors[far_frog].fighter.hp(), 16);
        assert!(!game.state.items.contains_key(scroll));
    }

    #[test]
    fn lightning_without_enemy_in_range_fails() {
        let mut game = arena_game(&[], &[]);
        let player = game.player_id();
        let scroll = give_item(&mut game, ItemKind::LightningScroll);
        assert_eq!(
            game.perform(player, Action::UseItem { item: scroll, target: None }),
            Err(Impossible::NoEnemyInRange)
        );
        assert!(game.state.items.contains_key(scroll));
    }

    #[test]
    fn confusion_asks_for_a_target_then_wraps_the_ai() {
        let rat_pos = Pos { y: 4, x: 7 };
        let mut game = arena_game(&[(MonsterKind::Rat, rat_pos)], &[]);
        let player = game.player_id();
        let scroll = give_item(&mut game, ItemKind::ConfusionScroll);
        let rat = monster_at(&game, rat_pos);

        let pending = match game.perform(player, Action::UseItem { item: scroll, target: None }) {
            Ok(ActionOutcome::NeedsTarget(pending)) => pending,
            other => panic!("expected a target request, got {other:?}"),
        };
        assert_eq!(pending.kind, TargetKind::Single);
        assert!(game.state.items.contains_key(scroll), "asking for a target consumes nothing");

        game.perform(player, pending.resolve(rat_pos)).expect("rat is visible");
        assert!(matches!(
            game.state.actors[rat].ai,
            Some(Ai::Confused { turns_remaining: 10, .. })
        ));
        assert!(!game.state.items.contains_key(scroll));
    }

    #[test]
    fn confusion_rejects_self_empty_and_hidden_targets() {
        let mut game = arena_game(&[], &[]);
        let player = game.player_id();
        let scroll = give_item(&mut game, ItemKind::ConfusionScroll);
        let own = game.player().pos;
        let use_at = |target| Action::UseItem { item: scroll, target: Some(target) };

        assert_eq!(game.perform(player, use_at(own)), Err(Impossible::CannotConfuseSelf));
        assert_eq!(game.perform(player, use_at(Pos { y: 2, x: 2 })), Err(Impossible::NoEnemyAtTarget));
        let hidden = Pos { y: 2, x: 3 };
        game.state.map.set_visible(hidden, false);
        assert_eq!(game.perform(player, use_at(hidden)), Err(Impossible::TargetNotVisible));
        assert!(game.state.items.contains_key(scroll));
    }

    #[test]
    fn fireball_hits_everyone_in_radius_including_the_thrower() {
        let rat_pos = Pos { y: 4, x: 6 };
        let frog_pos = Pos { y: 2, x: 9 };
        let mut game = arena_game(&[(MonsterKind::Rat, rat_pos), (MonsterKind::Frog, frog_pos)], &[]);
        let player = game.player_id();
        let bomb = give_item(&mut game, ItemKind::Bomb);
        let rat = monster_at(&game, rat_pos);
        let frog = monster_at(&game, frog_pos);

        let pending = match game.perform(player, Action::UseItem { item: bomb, target: None }) {
            Ok(ActionOutcome::NeedsTarget(pending)) => pending,
            other => panic!("expected a target request, got {other:?}"),
        };
        assert_eq!(pending.kind, TargetKind::Area { radius: 3 });

        game.perform(player, pending.resolve(Pos { y: 4, x: 5 })).expect("targets in radius");

        assert!(!game.state.actors[rat].is_alive());
        assert_eq!(game.player().fighter.hp(), 30 - 12);
        assert_eq!(game.state.actors[frog].fighter.hp(), 16, "frog is outside the blast");
        assert!(!game.state.items.contains_key(bomb));
    }

    #[test]
    fn fireball_with_nobody_in_radius_fails() {
        let mut game = arena_game(&[], &[]);
        let player = game.player_id();
        let bomb = give_item(&mut game, ItemKind::Bomb);
        assert_eq!(
            game.perform(player, Action::UseItem { item: bomb, target: Some(Pos { y: 8, x: 10 }) }),
            Err(Impossible::NoTargetsInRadius)
        );
    }

    #[test]
    fn equipment_is_not_usable() {
        let mut game = arena_game(&[], &[]);
        let player = game.player_id();
        let stick = give_item(&mut game, ItemKind::Stick);
        assert_eq!(
            game.perform(player, Action::UseItem { item: stick, target: None }),
            Err(Impossible::NotUsable)
        );
    }
}

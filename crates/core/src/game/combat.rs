//! Melee resolution, damage application and the death transition.

use super::*;

impl Game {
    pub(super) fn perform_melee(&mut self, attacker: EntityId, dx: i32, dy: i32) -> Result<(), Impossible> {
        let dest = self.state.actors[attacker].pos.offset(dx, dy);
        let target = self
            .living_actor_at(dest)
            .filter(|target| *target != attacker)
            .ok_or(Impossible::NothingToAttack)?;

        let damage = self.power(attacker) - self.defense(target);
        let description = format!(
            "{} attacks {}",
            capitalize(&self.state.actors[attacker].name),
            self.state.actors[target].name
        );
        let color =
            if attacker == self.state.player_id { palette::PLAYER_ATK } else { palette::ENEMY_ATK };

        if damage > 0 {
            self.add_message(format!("{description} for {damage} hit points."), color);
            self.apply_damage(target, damage);
        } else {
            self.add_message(format!("{description} but does no damage."), color);
        }
        Ok(())
    }

    /// Lowers hp (clamped at zero); the first time it reaches zero the actor dies.
    pub(super) fn apply_damage(&mut self, target: EntityId, amount: i32) {
        let Some(actor) = self.state.actors.get_mut(target) else { return };
        let remaining = actor.fighter.set_hp(actor.fighter.hp() - amount);
        if remaining == 0 && actor.is_alive() {
            self.kill(target);
        }
    }

    fn kill(&mut self, id: EntityId) {
        let is_player = id == self.state.player_id;
        let actor = &mut self.state.actors[id];
        let (text, color) = if is_player {
            ("You died!".to_string(), palette::PLAYER_DIE)
        } else {
            (format!("{} is dead!", actor.name), palette::ENEMY_DIE)
        };
        actor.glyph = content::CORPSE_GLYPH;
        actor.color = palette::CORPSE;
        actor.blocks_movement = false;
        actor.ai = None;
        actor.name = format!("remains of {}", actor.name);
        actor.render_order = RenderOrder::Corpse;
        let xp_given = actor.level.xp_given;
        self.add_message(text, color);

        if is_player {
            self.phase = TurnPhase::GameOver;
            info!(floor = self.state.floor, turn = self.turn, "player died");
        } else {
            self.award_xp(xp_given);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn damage_is_power_minus_defense() {
        let frog_pos = Pos { y: 4, x: 5 };
        let mut game = arena_game(&[(MonsterKind::Frog, frog_pos)], &[]);
        let player = game.player_id();
        let frog = monster_at(&game, frog_pos);

        game.perform(player, Action::Melee { dx: 1, dy: 0 }).expect("frog is adjacent");
        assert_eq!(game.state.actors[frog].fighter.hp(), 16 - (5 - 1));
        assert_eq!(
            game.messages().last().map(|m| m.text.as_str()),
            Some("Player attacks Frog for 4 hit points.")
        );
    }

    #[test]
    fn non_positive_damage_leaves_hp_untouched() {
        let frog_pos = Pos { y: 4, x: 5 };
        let mut game = arena_game(&[(MonsterKind::Frog, frog_pos)], &[]);
        let player = game.player_id();
        let frog = monster_at(&game, frog_pos);
        game.state.actors[frog].fighter.base_defense = 10;

        game.perform(player, Action::Melee { dx: 1, dy: 0 }).expect("attack resolves");
        assert_eq!(game.state.actors[frog].fighter.hp(), 16);
        assert_eq!(
            game.messages().last().map(|m| m.text.as_str()),
            Some("Player attacks Frog but does no damage.")
        );
    }

    #[test]
    fn melee_on_empty_cell_fails() {
        let mut game = arena_game(&[], &[]);
        let player = game.player_id();
        assert_eq!(game.perform(player, Action::Melee { dx: 1, dy: 1 }), Err(Impossible::NothingToAttack));
    }

    #[test]
    fn melee_on_own_cell_fails() {
        let mut game = arena_game(&[], &[]);
        let player = game.player_id();
        assert_eq!(game.perform(player, Action::Melee { dx: 0, dy: 0 }), Err(Impossible::NothingToAttack));
        assert_eq!(game.player().fighter.hp(), 30);
    }

    #[test]
    fn killing_blow_turns_monster_into_corpse_and_awards_xp() {
        let rat_pos = Pos { y: 4, x: 5 };
        let mut game = arena_game(&[(MonsterKind::Rat, rat_pos)], &[]);
        let player = game.player_id();
        let rat = monster_at(&game, rat_pos);

        game.perform(player, Action::Melee { dx: 1, dy: 0 }).expect("first hit");
        game.perform(player, Action::Melee { dx: 1, dy: 0 }).expect("second hit");

        let corpse = &game.state.actors[rat];
        assert_eq!(corpse.fighter.hp(), 0);
        assert!(!corpse.is_alive());
        assert!(!corpse.blocks_movement);
        assert_eq!(corpse.glyph, '%');
        assert_eq!(corpse.render_order, RenderOrder::Corpse);
        assert_eq!(corpse.name, "remains of Rat");
        assert_eq!(game.player().level.current_xp, 35);
    }

    #[test]
    fn player_death_ends_the_game() {
        let mut game = arena_game(&[], &[]);
        let player = game.player_id();
        game.apply_damage(player, 100);

        assert!(game.is_game_over());
        assert_eq!(game.player().fighter.hp(), 0);
        assert_eq!(game.messages().last().map(|m| m.text.as_str()), Some("You died!"));
    }

    #[test]
    fn overkill_on_a_corpse_does_not_die_twice() {
        let rat_pos = Pos { y: 4, x: 5 };
        let mut game = arena_game(&[(MonsterKind::Rat, rat_pos)], &[]);
        let rat = monster_at(&game, rat_pos);
        game.apply_damage(rat, 50);
        let xp = game.player().level.current_xp;
        game.apply_damage(rat, 50);

        assert_eq!(game.player().level.current_xp, xp);
        assert_eq!(game.state.actors[rat].name, "remains of Rat");
    }
}

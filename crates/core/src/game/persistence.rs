//! Whole-session snapshots. A restored game continues exactly like the one that was
//! captured, random draws included.

use super::*;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub seed: u64,
    pub turn: u64,
    pub random_draws: u64,
    pub phase: TurnPhase,
    pub config: GameConfig,
    pub state: GameState,
}

impl Game {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            seed: self.seed,
            turn: self.turn,
            random_draws: self.random_draws,
            phase: self.phase,
            config: self.config.clone(),
            state: self.state.clone(),
        }
    }

    pub fn restore(snapshot: GameSnapshot) -> Result<Self, GameError> {
        Self::restore_with_generator(snapshot, Box::new(RoomsAndCorridors))
    }

    pub fn restore_with_generator(
        snapshot: GameSnapshot,
        generator: Box<dyn DungeonGenerator>,
    ) -> Result<Self, GameError> {
        check_consistency(&snapshot)?;
        Ok(Self {
            seed: snapshot.seed,
            config: snapshot.config,
            state: snapshot.state,
            phase: snapshot.phase,
            turn: snapshot.turn,
            random_draws: snapshot.random_draws,
            generator,
        })
    }
}

/// Rejects snapshots whose parts disagree with each other, so a restored game never
/// indexes past its own arrays.
fn check_consistency(snapshot: &GameSnapshot) -> Result<(), GameError> {
    snapshot.config.validate()?;
    let state = &snapshot.state;
    let map = &state.map;
    if !map.is_well_formed() {
        return Err(GameError::MalformedMap { width: map.width, height: map.height });
    }
    if !state.actors.contains_key(state.player_id) {
        return Err(GameError::UnknownActor(state.player_id));
    }
    for (id, actor) in &state.actors {
        if !map.in_bounds(actor.pos) {
            return Err(GameError::ActorOutOfBounds(id));
        }
        let equipped = actor.equipment.weapon.into_iter().chain(actor.equipment.armor);
        for item in actor.inventory.items.iter().copied().chain(equipped) {
            if !state.items.contains_key(item) {
                return Err(GameError::UnknownItem(item));
            }
        }
    }
    for item in state.items.values() {
        if let ItemLocation::Carried(holder) = item.location
            && !state.actors.contains_key(holder)
        {
            return Err(GameError::UnknownActor(holder));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn restored_game_continues_identically() {
        let mut original = Game::new(GameConfig::default(), 21).expect("valid");
        for _ in 0..5 {
            original.play_turn(Action::Wait).expect("running");
        }
        let snapshot = original.snapshot();
        let json = serde_json::to_string(&snapshot).expect("snapshot serializes");
        let decoded: GameSnapshot = serde_json::from_str(&json).expect("snapshot deserializes");
        let mut restored = Game::restore(decoded).expect("player present");

        assert_eq!(restored.snapshot_hash(), original.snapshot_hash());
        assert_eq!(restored.messages(), original.messages());

        for action in [Action::Wait, Action::Bump { dx: 1, dy: 0 }, Action::Wait] {
            let a = original.play_turn(action);
            let b = restored.play_turn(action);
            assert_eq!(a, b);
            assert_eq!(original.snapshot_hash(), restored.snapshot_hash());
        }
    }

    #[test]
    fn confused_memory_survives_a_round_trip() {
        let rat_pos = Pos { y: 4, x: 7 };
        let mut game = arena_game(&[(MonsterKind::Rat, rat_pos)], &[]);
        let rat = monster_at(&game, rat_pos);
        game.state.actors[rat].ai =
            Some(Ai::Confused { previous: Box::new(Ai::hostile()), turns_remaining: 4 });

        let json = serde_json::to_string(&game.snapshot()).expect("serializes");
        let decoded: GameSnapshot = serde_json::from_str(&json).expect("deserializes");

        assert_eq!(
            decoded.state.actors[rat].ai,
            Some(Ai::Confused { previous: Box::new(Ai::hostile()), turns_remaining: 4 })
        );
    }

    #[test]
    fn snapshot_without_player_is_rejected() {
        let game = arena_game(&[], &[]);
        let mut snapshot = game.snapshot();
        let player = snapshot.state.player_id;
        snapshot.state.actors.remove(player);
        assert_eq!(Game::restore(snapshot).err(), Some(GameError::UnknownActor(player)));
    }

    #[test]
    fn snapshot_with_short_map_arrays_is_rejected() {
        let game = arena_game(&[], &[]);
        let mut snapshot = game.snapshot();
        snapshot.state.map.explored.pop();
        assert_eq!(
            Game::restore(snapshot).err(),
            Some(GameError::MalformedMap { width: 12, height: 10 })
        );
    }

    #[test]
    fn snapshot_with_dangling_inventory_is_rejected() {
        let mut game = arena_game(&[], &[]);
        let potion = give_item(&mut game, ItemKind::HealthPotion);
        let mut snapshot = game.snapshot();
        snapshot.state.items.remove(potion);
        assert_eq!(Game::restore(snapshot).err(), Some(GameError::UnknownItem(potion)));
    }

    #[test]
    fn snapshot_with_invalid_config_is_rejected() {
        let game = arena_game(&[], &[]);
        let mut snapshot = game.snapshot();
        snapshot.config.fov_radius = 0;
        assert_eq!(
            Game::restore(snapshot).err(),
            Some(GameError::InvalidConfig(ConfigError::NonPositiveFovRadius(0)))
        );
    }
}

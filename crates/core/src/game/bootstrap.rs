//! Starting world construction for a new run.

use super::*;

const WELCOME: &str = "Hello and welcome, adventurer, to yet another dungeon!";

impl Game {
    /// A fresh run on floor 1 using the default room-and-corridor generator.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_generator(config, seed, Box::new(RoomsAndCorridors))
    }

    pub fn with_generator(
        config: GameConfig,
        seed: u64,
        generator: Box<dyn DungeonGenerator>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut actors = SlotMap::with_key();
        let player_id = actors.insert(content::player(Pos { y: 0, x: 0 }, config.inventory_capacity));
        actors[player_id].id = player_id;

        let state = GameState {
            floor: 1,
            map: Map::filled(config.map_width, config.map_height, TileKind::Wall),
            actors,
            items: SlotMap::with_key(),
            player_id,
            messages: MessageLog::default(),
        };
        let mut game = Self {
            seed,
            config,
            state,
            phase: TurnPhase::AwaitingPlayer,
            turn: 0,
            random_draws: 0,
            generator,
        };
        game.install_floor();
        game.add_message(WELCOME, palette::WELCOME_TEXT);
        info!(seed, floor = game.state.floor, "new run started");
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_run_starts_on_floor_one_with_a_lit_entry() {
        let game = Game::new(GameConfig::default(), 3).expect("default config is valid");

        assert_eq!(game.floor(), 1);
        assert_eq!(game.turn(), 0);
        assert_eq!(game.phase(), TurnPhase::AwaitingPlayer);
        assert!(game.player().is_alive());
        assert!(game.state.map.is_walkable(game.player().pos));
        assert!(game.state.map.is_visible(game.player().pos));
        assert_eq!(game.messages().last().map(|m| m.text.as_str()), Some(WELCOME));
    }

    #[test]
    fn same_seed_builds_the_same_run() {
        let a = Game::new(GameConfig::default(), 99).expect("valid");
        let b = Game::new(GameConfig::default(), 99).expect("valid");
        assert_eq!(a.snapshot_hash(), b.snapshot_hash());
        assert_eq!(a.state.map, b.state.map);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GameConfig { inventory_capacity: 0, ..GameConfig::default() };
        assert_eq!(Game::new(config, 1).err(), Some(ConfigError::ZeroCapacity));
    }
}

pub mod config;
pub mod content;
pub mod error;
pub mod game;
pub mod mapgen;
pub mod message_log;
pub mod save_file;
pub mod seed;
pub mod state;
pub mod types;

pub use config::GameConfig;
pub use error::{ConfigError, GameError, Impossible};
pub use game::{
    Action, ActionOutcome, Game, GameSnapshot, LevelUpChoice, PendingTargetSelection,
    RenderEntity, TargetKind, TurnPhase, TurnResult,
};
pub use mapgen::{DungeonGenerator, FloorParams, GeneratedFloor, ItemSpawn, MonsterSpawn, RoomsAndCorridors};
pub use message_log::{Message, MessageLog};
pub use save_file::{SaveError, delete_save, load_save, write_save};
pub use state::*;
pub use types::*;

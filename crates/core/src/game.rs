//! Session engine: owns the world state and resolves player and monster turns.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::content::{self, palette};
use crate::error::{ConfigError, GameError, Impossible};
use crate::mapgen::{DungeonGenerator, RoomsAndCorridors};
use crate::message_log::MessageLog;
use crate::seed::{derive_floor_seed, mix_seed_stream};
use crate::state::*;
use crate::types::*;

mod actions;
mod ai;
mod bootstrap;
mod combat;
mod consumables;
mod floor_transition;
mod hash;
mod inventory;
mod leveling;
mod movement;
mod pathfinding;
mod persistence;
mod spatial;
mod turn;
mod visibility;

#[cfg(test)]
mod test_support;

pub use actions::{Action, ActionOutcome, PendingTargetSelection, TargetKind};
pub use leveling::LevelUpChoice;
pub use persistence::GameSnapshot;
pub use spatial::RenderEntity;
pub use turn::{TurnPhase, TurnResult};

pub struct Game {
    seed: u64,
    config: GameConfig,
    state: GameState,
    phase: TurnPhase,
    turn: u64,
    // Count of random draws so far; each draw mixes the run seed with this stream index.
    random_draws: u64,
    generator: Box<dyn DungeonGenerator>,
}

impl Game {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct world access for scenario setup and tooling. Bypasses action validation.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn floor(&self) -> u32 {
        self.state.floor
    }

    pub fn player_id(&self) -> EntityId {
        self.state.player_id
    }

    pub fn player(&self) -> &Actor {
        self.state.player()
    }

    pub fn actor(&self, id: EntityId) -> Result<&Actor, GameError> {
        self.state.actors.get(id).ok_or(GameError::UnknownActor(id))
    }

    pub fn item(&self, id: ItemId) -> Result<&Item, GameError> {
        self.state.items.get(id).ok_or(GameError::UnknownItem(id))
    }

    pub fn messages(&self) -> &MessageLog {
        &self.state.messages
    }

    pub fn add_message(&mut self, text: impl Into<String>, color: Rgb) {
        self.state.messages.add(text, color);
    }

    fn next_random(&mut self) -> u64 {
        self.random_draws += 1;
        mix_seed_stream(self.seed, self.random_draws)
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

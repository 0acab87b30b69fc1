//! The top-level session: owns the game and the active mode, and is the error
//! boundary for event handling.

use anyhow::Result;
use crawl_core::content::palette;
use crawl_core::{Game, GameConfig};
use tracing::{error, info};

use crate::input::RawEvent;
use crate::save_slot::SaveSlot;
use crate::seed::generate_runtime_seed;
use crate::ui_mode::{QuitRequest, Step, UiMode, resting_mode};

pub struct Session {
    game: Game,
    mode: UiMode,
    config: GameConfig,
}

impl Session {
    pub fn new(game: Game, config: GameConfig) -> Self {
        let mode = resting_mode(&game);
        Self { game, mode, config }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn mode(&self) -> &UiMode {
        &self.mode
    }

    /// Handles one event. Errors are logged in full to the operator channel and in
    /// short form to the in-game log; the session keeps running either way.
    pub fn handle_event(&mut self, event: RawEvent) -> Option<QuitRequest> {
        match self.mode.handle(&mut self.game, event) {
            Ok(Step::Continue(mode)) => {
                self.mode = if mode == UiMode::MainGame { resting_mode(&self.game) } else { mode };
                None
            }
            Ok(Step::Quit(request)) => Some(request),
            Ok(Step::NewGame) => {
                if let Err(err) = self.start_over() {
                    self.report(&err);
                }
                None
            }
            Err(err) => {
                self.report(&err);
                self.mode = resting_mode(&self.game);
                None
            }
        }
    }

    fn start_over(&mut self) -> Result<()> {
        let seed = generate_runtime_seed();
        self.game = Game::new(self.config.clone(), seed)?;
        self.mode = UiMode::MainGame;
        info!(seed, "started a new run");
        Ok(())
    }

    fn report(&mut self, err: &anyhow::Error) {
        error!(error = ?err, "event handling failed");
        self.game.add_message(format!("Error: {err}"), palette::ERROR);
    }

    /// Carries out a quit: saves a live run, or deletes the save of a finished one.
    pub fn finish(&self, request: QuitRequest, slot: &SaveSlot) -> Result<()> {
        match request {
            QuitRequest::SaveAndQuit if !self.game.is_game_over() => slot.save(&self.game),
            QuitRequest::SaveAndQuit | QuitRequest::AbandonRun => slot.delete(),
        }
    }
}

//! The single save slot in the platform data directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crawl_core::{Game, SaveError, delete_save, load_save, write_save};
use directories::ProjectDirs;
use tracing::warn;

use crate::APP_NAME;

pub enum LoadOutcome {
    Loaded(Game),
    NoSave,
    /// The file exists but could not be used; the message says why.
    Unreadable(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveSlot {
    path: PathBuf,
}

impl SaveSlot {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("savegame.json");
            path
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> LoadOutcome {
        match load_save(&self.path) {
            Ok(game) => LoadOutcome::Loaded(game),
            Err(SaveError::Missing(_)) => LoadOutcome::NoSave,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring unusable save");
                LoadOutcome::Unreadable(err.to_string())
            }
        }
    }

    pub fn save(&self, game: &Game) -> Result<()> {
        write_save(&self.path, game)
            .with_context(|| format!("saving game to {}", self.path.display()))
    }

    pub fn delete(&self) -> Result<()> {
        delete_save(&self.path).with_context(|| format!("deleting {}", self.path.display()))
    }
}

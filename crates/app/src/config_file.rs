//! TOML configuration file with the game's tunables under a `[game]` table.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crawl_core::GameConfig;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::APP_NAME;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub game: GameConfig,
}

impl ConfigFile {
    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.config_dir().to_path_buf();
            path.push("config.toml");
            path
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let file: Self = toml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        file.game.validate().with_context(|| format!("invalid settings in {}", path.display()))?;
        Ok(file)
    }

    /// An explicit path must exist; the platform default may be absent, meaning defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let Some(path) = Self::get_default_path() else {
            return Ok(Self::default());
        };
        match Self::load(&path) {
            Ok(file) => {
                info!(path = %path.display(), "loaded config file");
                Ok(file)
            }
            Err(err) if is_not_found(&err) => Ok(Self::default()),
            Err(err) => Err(err),
        }
    }
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>().is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
}

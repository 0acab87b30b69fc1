//! Save files: one JSON envelope holding a `GameSnapshot` plus a SHA-256 of its body.
//!
//! The envelope is `{ format_version, checksum_sha256_hex, body }` where `body` is the
//! snapshot serialized as a JSON string. Writes go to a temporary sibling first and are
//! renamed into place, so a crash never leaves a half-written save behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{info, warn};

use crate::game::{Game, GameSnapshot};

pub const SAVE_FORMAT_VERSION: u16 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct SaveEnvelope {
    format_version: u16,
    checksum_sha256_hex: String,
    body: String,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no saved game at {}", .0.display())]
    Missing(PathBuf),
    #[error("saved game is corrupt: {reason}")]
    Corrupt { reason: String },
    #[error("save file I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("could not encode the session: {0}")]
    Encode(#[from] serde_json::Error),
}

fn body_sha256(body: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body.as_bytes());
    let result = hasher.finalize();
    format!("{result:064x}")
}

fn corrupt(reason: impl Into<String>) -> SaveError {
    SaveError::Corrupt { reason: reason.into() }
}

pub fn write_save(path: &Path, game: &Game) -> Result<(), SaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string(&game.snapshot())?;
    let envelope = SaveEnvelope {
        format_version: SAVE_FORMAT_VERSION,
        checksum_sha256_hex: body_sha256(&body),
        body,
    };
    let json = serde_json::to_string(&envelope)?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    info!(path = %path.display(), turn = game.turn(), floor = game.floor(), "game saved");
    Ok(())
}

/// Loads and verifies a save. Nothing is returned unless every check passes.
pub fn load_save(path: &Path) -> Result<Game, SaveError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(SaveError::Missing(path.to_path_buf()));
        }
        Err(e) => return Err(SaveError::Io(e)),
    };

    let result = decode(&content);
    match &result {
        Ok(game) => info!(path = %path.display(), turn = game.turn(), "game loaded"),
        Err(e) => warn!(path = %path.display(), error = %e, "rejected saved game"),
    }
    result
}

fn decode(content: &str) -> Result<Game, SaveError> {
    let envelope: SaveEnvelope =
        serde_json::from_str(content).map_err(|e| corrupt(format!("envelope: {e}")))?;
    if envelope.format_version != SAVE_FORMAT_VERSION {
        return Err(corrupt(format!("unsupported format version {}", envelope.format_version)));
    }
    if body_sha256(&envelope.body) != envelope.checksum_sha256_hex {
        return Err(corrupt("checksum mismatch"));
    }
    let snapshot: GameSnapshot =
        serde_json::from_str(&envelope.body).map_err(|e| corrupt(format!("body: {e}")))?;
    Game::restore(snapshot).map_err(|e| corrupt(e.to_string()))
}

/// Removes a save if present. An absent file is not an error.
pub fn delete_save(path: &Path) -> Result<(), SaveError> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!(path = %path.display(), "saved game deleted");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SaveError::Io(e)),
    }
}

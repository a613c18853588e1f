//! Saving and restoring character state.
//!
//! Saves are `MessagePack` with named fields, wrapped in [`SavedState`] so a
//! format change can be detected on load. [`to_json`] renders the same value
//! for people to read.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use statline_foundation::{Error, ErrorKind, Result};

use crate::state::{AdventureLog, CharacterState};

/// Save format version written by this build.
pub const FORMAT_VERSION: u32 = 1;

/// Everything persisted between runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    /// Save format version.
    pub version: u32,
    /// The character's state.
    pub state: CharacterState,
    /// Adventure gains and losses so far.
    pub log: AdventureLog,
}

impl SavedState {
    /// Wraps state for saving at the current format version.
    #[must_use]
    pub fn new(state: CharacterState, log: AdventureLog) -> Self {
        Self {
            version: FORMAT_VERSION,
            state,
            log,
        }
    }
}

fn serialization(e: impl std::fmt::Display) -> Error {
    Error::new(ErrorKind::SerializationError(e.to_string()))
}

fn io(action: &str, path: &Path, e: &std::io::Error) -> Error {
    Error::new(ErrorKind::IoError(format!(
        "failed to {action} '{}': {e}",
        path.display()
    )))
}

/// Encodes saved state as `MessagePack`.
///
/// # Errors
///
/// Returns `SerializationError` if encoding fails.
pub fn to_bytes(saved: &SavedState) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(saved).map_err(serialization)
}

/// Decodes saved state from `MessagePack`.
///
/// # Errors
///
/// Returns `SerializationError` if decoding fails or the save was written by
/// an incompatible format version.
pub fn from_bytes(bytes: &[u8]) -> Result<SavedState> {
    let saved: SavedState = rmp_serde::from_slice(bytes).map_err(serialization)?;
    if saved.version != FORMAT_VERSION {
        return Err(serialization(format!(
            "save format version {} is not supported (expected {FORMAT_VERSION})",
            saved.version
        )));
    }
    Ok(saved)
}

/// Renders saved state as pretty-printed JSON.
///
/// # Errors
///
/// Returns `SerializationError` if encoding fails.
pub fn to_json(saved: &SavedState) -> Result<String> {
    serde_json::to_string_pretty(saved).map_err(serialization)
}

/// Writes saved state to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns `IoError` if the file cannot be written, or `SerializationError`
/// if encoding fails.
pub fn save_to_file<P: AsRef<Path>>(saved: &SavedState, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(saved)?;
    let file = File::create(path).map_err(|e| io("create file", path, &e))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| io("write file", path, &e))?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved character state");
    Ok(())
}

/// Reads saved state from `path`.
///
/// # Errors
///
/// Returns `IoError` if the file cannot be read, or `SerializationError` if it
/// does not hold a compatible save.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<SavedState> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io("open file", path, &e))?;

    let mut bytes = Vec::new();
    BufReader::new(file)
        .read_to_end(&mut bytes)
        .map_err(|e| io("read file", path, &e))?;

    from_bytes(&bytes)
}

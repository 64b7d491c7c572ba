//! Save store — whole-state saves keyed by save id.
//!
//! One JSON file per save id under the store directory, wrapped in an
//! envelope carrying the engine's canonical hash and version. Loads
//! are integrity-checked: a record whose state no longer matches its
//! recorded hash is rejected rather than silently trusted.
//!
//! The surface is deliberately small: save, load, list, delete.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use nation_engine::domain::CountryState;
use nation_engine::hashing::canonical_hash;
use nation_engine::invariants::try_sanitize_import;
use nation_engine::ENGINE_VERSION;

use crate::snapshot_codec::{decode_snapshot, encode_snapshot};

/// On-disk save format.
#[derive(Serialize, Deserialize)]
pub struct SaveRecord {
    pub save_id: String,
    /// JSON of the CountryState (snapshot codec encoding).
    pub state_json: String,
    /// Canonical hash of the state at save time.
    pub hash: String,
    /// Engine version at save time.
    pub engine_version: u32,
}

/// Directory-backed save database.
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    /// Open (creating if needed) a save store rooted at `dir`.
    pub fn open(dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Persist a state under its own save id, overwriting any
    /// previous save with that id.
    pub fn save_state(&self, state: &CountryState) -> io::Result<PathBuf> {
        validate_save_id(&state.save_id)?;

        let state_json = encode_snapshot(state).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, e.to_string())
        })?;
        let record = SaveRecord {
            save_id: state.save_id.clone(),
            state_json,
            hash: canonical_hash(state),
            engine_version: ENGINE_VERSION,
        };

        let path = self.save_path(&state.save_id);
        let content = serde_json::to_string(&record).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, e.to_string())
        })?;
        fs::write(&path, content.as_bytes())?;
        Ok(path)
    }

    /// Load a state by save id. Returns Ok(None) if no such save
    /// exists; a corrupt or tampered record is an error.
    pub fn load_state(&self, save_id: &str) -> io::Result<Option<CountryState>> {
        validate_save_id(save_id)?;

        let path = self.save_path(save_id);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let record: SaveRecord = serde_json::from_str(&content).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Bad save record: {}", e),
            )
        })?;

        let mut state = decode_snapshot(&record.state_json).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, e.to_string())
        })?;

        // Integrity is checked against the bytes as saved, before the
        // import clamp touches any field.
        let actual = canonical_hash(&state);
        if actual != record.hash {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Save integrity failure for {:?}: stored hash {} != {}",
                    save_id, record.hash, actual
                ),
            ));
        }

        try_sanitize_import(&mut state)
            .map_err(|msg| io::Error::new(io::ErrorKind::InvalidData, msg))?;

        Ok(Some(state))
    }

    /// List all save ids in the store, sorted.
    pub fn list_saves(&self) -> io::Result<Vec<String>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(id) = name_str.strip_suffix(".json") {
                ids.push(id.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Delete a save by id. Returns true if a save was removed.
    pub fn delete_save(&self, save_id: &str) -> io::Result<bool> {
        validate_save_id(save_id)?;

        let path = self.save_path(save_id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        Ok(true)
    }

    fn save_path(&self, save_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", save_id))
    }
}

/// Save ids double as file names: restrict to `[A-Za-z0-9_-]+`.
fn validate_save_id(save_id: &str) -> io::Result<()> {
    let valid = !save_id.is_empty()
        && save_id
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    if valid {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Invalid save id {:?}: must match [A-Za-z0-9_-]+", save_id),
        ))
    }
}

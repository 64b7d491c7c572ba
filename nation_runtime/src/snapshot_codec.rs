//! Snapshot Codec — deterministic CountryState encoder/decoder.
//!
//! Pure codec layer. No side-effects, no timestamps, no envelope.
//!
//! - `encode_snapshot`:  CountryState → JSON string
//! - `decode_snapshot`:  JSON string → CountryState (strict, no defaults)
//! - `restore_snapshot`: decode + import validation and clamping
//! - `export_snapshot_to_file` / `import_snapshot_from_file`: file I/O
//! - `snapshot_hash`:    SHA-256 of the encoding (lowercase hex)
//!
//! This is the flat-file import/export surface: a player can hand a
//! snapshot file to another device and resume there bit-for-bit.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};

use nation_engine::domain::CountryState;
use nation_engine::invariants::try_sanitize_import;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// All possible snapshot codec failures.
#[derive(Debug)]
pub enum SnapshotError {
    /// JSON serialization failed.
    SerializationError(String),
    /// JSON deserialization failed (malformed, missing fields,
    /// unknown fields).
    DeserializationError(String),
    /// Loaded state violates engine invariants.
    InvariantViolation(String),
    /// File I/O error.
    IoError(String),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::SerializationError(msg) => {
                write!(f, "SerializationError: {}", msg)
            }
            SnapshotError::DeserializationError(msg) => {
                write!(f, "DeserializationError: {}", msg)
            }
            SnapshotError::InvariantViolation(msg) => {
                write!(f, "InvariantViolation: {}", msg)
            }
            SnapshotError::IoError(msg) => {
                write!(f, "IoError: {}", msg)
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<io::Error> for SnapshotError {
    fn from(err: io::Error) -> Self {
        SnapshotError::IoError(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Encoder / Decoder
// ---------------------------------------------------------------------------

/// Encode a CountryState to a JSON string.
///
/// serde derives plus BTreeMaps give stable, sorted output: equal
/// states encode byte-identically.
pub fn encode_snapshot(state: &CountryState) -> Result<String, SnapshotError> {
    serde_json::to_string(state)
        .map_err(|e| SnapshotError::SerializationError(e.to_string()))
}

/// Decode a JSON string into a CountryState.
///
/// Strict deserialization: `deny_unknown_fields` on all types rejects
/// unexpected fields, missing required fields cause failure, no silent
/// defaults. No invariant validation — use `restore_snapshot` for
/// untrusted input.
pub fn decode_snapshot(json: &str) -> Result<CountryState, SnapshotError> {
    serde_json::from_str::<CountryState>(json)
        .map_err(|e| SnapshotError::DeserializationError(e.to_string()))
}

/// Decode a JSON string and prepare it for the engine.
///
/// This is the safe entry point for loading state from untrusted
/// sources. Applies the import path: base invariant validation, then
/// clamping of the logit-fed levels strictly inside (0,1). A snapshot
/// whose levels saturated to an endpoint during a legal run reloads
/// cleanly.
pub fn restore_snapshot(json: &str) -> Result<CountryState, SnapshotError> {
    let mut state = decode_snapshot(json)?;
    try_sanitize_import(&mut state).map_err(SnapshotError::InvariantViolation)?;
    Ok(state)
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

/// Export a CountryState to a file as JSON.
///
/// Creates parent directories if needed. Byte-for-byte identical
/// across identical states. No timestamps in the output.
pub fn export_snapshot_to_file(
    state: &CountryState,
    path: &Path,
) -> Result<(), SnapshotError> {
    let json = encode_snapshot(state)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, json.as_bytes())?;
    Ok(())
}

/// Import a CountryState from a JSON file.
///
/// Reads the file, deserializes, and validates. Fails on malformed
/// JSON, missing fields, or invariant violations.
pub fn import_snapshot_from_file(
    path: &Path,
) -> Result<CountryState, SnapshotError> {
    let content = fs::read_to_string(path)?;
    restore_snapshot(&content)
}

// ---------------------------------------------------------------------------
// Hash
// ---------------------------------------------------------------------------

/// SHA-256 of the JSON encoding. Lowercase hex string.
///
/// NOTE: this hashes the *serde-derived* JSON, NOT the canonical hash
/// from the engine's `hashing` module (which binds engine_version and
/// uses hand-ordered fields). This hash is for snapshot integrity —
/// verifying that a file has not been altered in transit.
pub fn snapshot_hash(state: &CountryState) -> Result<String, SnapshotError> {
    let json = encode_snapshot(state)?;
    let digest = Sha256::digest(json.as_bytes());
    Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

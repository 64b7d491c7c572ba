//! Append-only turn log — binary protobuf frames.
//!
//! Storage format: length-prefixed protobuf frames.
//!   [4-byte LE length][protobuf bytes][4-byte LE length][protobuf bytes]...
//!
//! Rules:
//!   - Strict append only — no mutation, no deletion, no reordering
//!   - fsync after every write
//!   - Sequence strictly increasing (validated on append)

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use prost::Message;

use crate::proto_types::ProtoTurnEnvelope;

/// A policy record is a handful of doubles; anything bigger than this
/// is a corrupt frame.
const MAX_FRAME_LEN: usize = 64 * 1024;

/// Append-only turn log backed by a binary file.
pub struct TurnLog {
    path: PathBuf,
    last_sequence: u64,
}

impl TurnLog {
    /// Open or create a turn log at the given path.
    /// Reads existing turns to determine the last sequence number.
    pub fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let last_sequence = if path.exists() {
            let turns = Self::read_all_from_file(path)?;
            turns.last().map(|t| t.sequence).unwrap_or(0)
        } else {
            0
        };

        Ok(Self {
            path: path.to_path_buf(),
            last_sequence,
        })
    }

    /// Append a single settled turn to the log.
    ///
    /// Validates strict sequence ordering, writes a length-prefixed
    /// protobuf frame, and fsyncs.
    pub fn append_turn(&mut self, turn: &ProtoTurnEnvelope) -> io::Result<()> {
        let expected = self.last_sequence + 1;
        if turn.sequence != expected {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Sequence violation in turn log: expected {}, got {}",
                    expected, turn.sequence
                ),
            ));
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let buf = turn.encode_to_vec();
        let len = buf.len() as u32;

        {
            let mut writer = BufWriter::new(&mut file);
            writer.write_all(&len.to_le_bytes())?;
            writer.write_all(&buf)?;
            writer.flush()?;
        }
        file.sync_all()?;

        self.last_sequence = turn.sequence;
        Ok(())
    }

    /// Load all turns from the log in sequence order.
    pub fn load_all_turns(&self) -> io::Result<Vec<ProtoTurnEnvelope>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        Self::read_all_from_file(&self.path)
    }

    /// Get the last sequence number in the log.
    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    /// Read all turns from a file, validating frame integrity.
    fn read_all_from_file(path: &Path) -> io::Result<Vec<ProtoTurnEnvelope>> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut turns = Vec::new();
        let mut len_buf = [0u8; 4];

        loop {
            match reader.read_exact(&mut len_buf) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e),
            }

            let len = u32::from_le_bytes(len_buf) as usize;
            if len == 0 || len > MAX_FRAME_LEN {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Invalid frame length: {}", len),
                ));
            }

            let mut frame = vec![0u8; len];
            reader.read_exact(&mut frame).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Truncated frame: {}", e),
                )
            })?;

            let turn = ProtoTurnEnvelope::decode(frame.as_slice()).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Protobuf decode error: {}", e),
                )
            })?;

            turns.push(turn);
        }

        Ok(turns)
    }
}

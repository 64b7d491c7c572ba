//! Session manager — isolated sessions with settle-before-persist
//! semantics.
//!
//! Each session gets its own directory with a pinned initial state, an
//! append-only turn log, and periodic snapshots. Concurrency: Mutex
//! for write serialization, no global mutable state.
//!
//! Settle-before-persist order:
//!   1. engine.settle_quarter(policy) — may panic on invariant violation
//!   2. turn_log.append_turn()        — only if step 1 succeeded
//!   3. snapshot if interval reached

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use nation_engine::domain::{CountryState, PolicyInputs, QuarterReport};
use nation_engine::engine::CountryEngine;
use nation_engine::hashing::canonical_hash;
use nation_engine::state::create_initial_state;

use crate::proto_bridge::{proto_to_turn, turn_to_proto, TurnRecord};
use crate::replay;
use crate::snapshot_codec;
use crate::turn_log::TurnLog;

/// An isolated simulation session with its own turn log and state.
pub struct Session {
    save_id: String,
    base_dir: PathBuf,
    engine: CountryEngine,
    turn_log: TurnLog,
    snapshot_interval: u64,
    current_sequence: u64,
}

impl Session {
    /// Create or resume a session in the given base directory.
    ///
    /// Directory structure:
    ///   <base_dir>/<save_id>/initial.json
    ///   <base_dir>/<save_id>/turns.log
    ///   <base_dir>/<save_id>/snapshots/
    ///
    /// On first open the default scenario state is created under this
    /// save id and pinned to initial.json. On reopen the pinned state
    /// is restored and all logged turns are replayed against it, so
    /// the resumed session matches the interrupted one bit-for-bit.
    pub fn new(
        base_dir: &Path,
        save_id: &str,
        snapshot_interval: u64,
    ) -> std::io::Result<Self> {
        let session_dir = base_dir.join(save_id);
        let turns_path = session_dir.join("turns.log");
        let initial_path = session_dir.join("initial.json");

        let turn_log = TurnLog::open(&turns_path)?;
        let last_seq = turn_log.last_sequence();

        let mut engine = CountryEngine::new();
        if initial_path.exists() {
            let initial = snapshot_codec::import_snapshot_from_file(&initial_path)
                .map_err(|e| {
                    std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
                })?;
            engine.load_state(initial);
        } else {
            let initial = create_initial_state(Some(save_id), None, None);
            snapshot_codec::export_snapshot_to_file(&initial, &initial_path)
                .map_err(|e| {
                    std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
                })?;
            engine.load_state(initial);
        }

        // Replay existing turns if any
        if last_seq > 0 {
            let proto_turns = turn_log.load_all_turns()?;
            for pt in &proto_turns {
                let turn = proto_to_turn(pt)?;
                engine.settle_quarter(&turn.policy);
            }
        }

        Ok(Self {
            save_id: save_id.to_string(),
            base_dir: session_dir,
            engine,
            turn_log,
            snapshot_interval,
            current_sequence: last_seq,
        })
    }

    /// Settle one quarter: validate via engine, then persist.
    ///
    /// Returns (state_clone, quarter_report).
    /// Panics if the engine rejects the produced state.
    pub fn settle_quarter(
        &mut self,
        policy: &PolicyInputs,
    ) -> (CountryState, QuarterReport) {
        let sequence = self.current_sequence + 1;
        let (year, quarter) = {
            let s = self.engine.state();
            (s.year, s.quarter)
        };

        // Step 1: Settle in the engine (may panic)
        let (state, report) = self.engine.settle_quarter(policy);
        let state_clone = state.clone();

        // Step 2: Persist to turn log (only if step 1 succeeded)
        let record = TurnRecord {
            sequence,
            year,
            quarter,
            policy: policy.clone(),
        };
        self.turn_log
            .append_turn(&turn_to_proto(&record))
            .expect("Turn log write failed");
        self.current_sequence = sequence;

        // Step 3: Auto-snapshot at interval
        if self.snapshot_interval > 0 && sequence % self.snapshot_interval == 0 {
            let snap_path = self
                .base_dir
                .join("snapshots")
                .join(format!("state_{:08}.json", sequence));
            snapshot_codec::export_snapshot_to_file(&state_clone, &snap_path)
                .expect("Snapshot save failed");
        }

        (state_clone, report)
    }

    /// Recommended policy for the coming quarter.
    pub fn suggest(&self) -> PolicyInputs {
        self.engine.suggest()
    }

    /// Full replay from the pinned initial state and turn log.
    /// Resets the engine to the replayed state.
    pub fn replay_full(&mut self) -> std::io::Result<(CountryState, String)> {
        let initial_path = self.base_dir.join("initial.json");
        let initial = snapshot_codec::import_snapshot_from_file(&initial_path)
            .map_err(|e| {
                std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
            })?;

        let proto_turns = self.turn_log.load_all_turns()?;
        let turns: Vec<TurnRecord> = proto_turns
            .iter()
            .map(proto_to_turn)
            .collect::<std::io::Result<_>>()?;

        let (state, hash) = replay::rebuild_state(&initial, &turns);

        // Reset engine to match replayed state
        let mut engine = CountryEngine::new();
        engine.load_state(state.clone());
        self.engine = engine;

        Ok((state, hash))
    }

    /// Get current state from the engine.
    pub fn state(&self) -> &CountryState {
        self.engine.state()
    }

    /// Get current canonical hash.
    pub fn current_hash(&self) -> String {
        canonical_hash(self.engine.state())
    }

    /// Get current sequence number.
    pub fn current_sequence(&self) -> u64 {
        self.current_sequence
    }

    /// Get session save id.
    pub fn save_id(&self) -> &str {
        &self.save_id
    }
}

/// Thread-safe session handle using Mutex.
pub struct SharedSession {
    inner: Mutex<Session>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }

    /// Settle a quarter under lock.
    pub fn settle_quarter(
        &self,
        policy: &PolicyInputs,
    ) -> (CountryState, QuarterReport) {
        let mut session = self.inner.lock().expect("Session lock poisoned");
        session.settle_quarter(policy)
    }

    /// Get a policy suggestion under lock.
    pub fn suggest(&self) -> PolicyInputs {
        let session = self.inner.lock().expect("Session lock poisoned");
        session.suggest()
    }

    /// Get current hash under lock.
    pub fn current_hash(&self) -> String {
        let session = self.inner.lock().expect("Session lock poisoned");
        session.current_hash()
    }

    /// Get current sequence under lock.
    pub fn current_sequence(&self) -> u64 {
        let session = self.inner.lock().expect("Session lock poisoned");
        session.current_sequence()
    }
}

#![forbid(unsafe_code)]

//! NationSim — Rust Runtime
//!
//! Wraps the frozen engine v1 with persistence, replay, snapshot
//! import/export, session management, and drift detection.
//!
//! No domain logic lives here — all transitions and invariants are
//! delegated to the engine.

pub mod proto_types;
pub mod proto_bridge;
pub mod turn_log;
pub mod replay;
pub mod save_store;
pub mod snapshot_codec;
pub mod session;
pub mod drift;

#![forbid(unsafe_code)]

/// Engine v1 — Frozen. Behavioral changes require engine_v2.
///
/// Saved games and replay logs depend on this version producing the
/// exact same numbers forever.
pub const ENGINE_VERSION: u32 = 1;

pub mod rng;
pub mod stats;
pub mod domain;
pub mod state;
pub mod transitions;
pub mod suggest;
pub mod invariants;
pub mod hashing;
pub mod engine;

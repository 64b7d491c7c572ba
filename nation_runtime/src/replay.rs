//! Replay orchestrator — rebuild state from a turn log.
//!
//! Delegates all domain logic to the frozen engine v1.
//! No shortcuts, no cached state logic.

use nation_engine::domain::CountryState;
use nation_engine::engine::CountryEngine;
use nation_engine::hashing::canonical_hash;

use crate::proto_bridge::TurnRecord;

/// Rebuild a country state from an initial state and turn sequence.
///
/// 1. Load the initial state into a fresh engine
/// 2. Settle each recorded turn in order
/// 3. Return (final_state, canonical_hash)
///
/// Pure in the turn sequence — deterministic by the engine's
/// guarantee.
pub fn rebuild_state(
    initial: &CountryState,
    turns: &[TurnRecord],
) -> (CountryState, String) {
    let mut engine = CountryEngine::new();
    engine.load_state(initial.clone());

    for turn in turns {
        engine.settle_quarter(&turn.policy);
    }

    let state = engine.state().clone();
    let hash = canonical_hash(&state);
    (state, hash)
}

/// Rebuild state and return only the canonical hash.
pub fn rebuild_hash(initial: &CountryState, turns: &[TurnRecord]) -> String {
    let (_, hash) = rebuild_state(initial, turns);
    hash
}

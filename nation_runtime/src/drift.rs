//! Drift detection — determinism verification and state comparison.
//!
//! Replays are expected to be bit-for-bit: any hash mismatch between
//! two replays of the same log is a hard failure, not a warning.

use std::collections::BTreeSet;

use nation_engine::domain::CountryState;

use crate::proto_bridge::TurnRecord;
use crate::replay;

/// Verify determinism by replaying the same turns twice from the same
/// initial state and asserting identical hashes. Panics on failure.
pub fn verify_determinism(initial: &CountryState, turns: &[TurnRecord]) {
    let hash1 = replay::rebuild_hash(initial, turns);
    let hash2 = replay::rebuild_hash(initial, turns);

    if hash1 != hash2 {
        panic!(
            "DETERMINISM FAILURE: two replays produced different hashes.\n\
             Run 1: {}\n\
             Run 2: {}",
            hash1, hash2
        );
    }
}

/// Structured state comparison.
///
/// Returns a DriftReport with macro deltas and unit group lifecycle
/// changes. Deltas are b - a throughout.
pub fn compare_states(state_a: &CountryState, state_b: &CountryState) -> DriftReport {
    let ids_a: BTreeSet<&str> = state_a
        .military
        .units
        .keys()
        .map(|s| s.as_str())
        .collect();
    let ids_b: BTreeSet<&str> = state_b
        .military
        .units
        .keys()
        .map(|s| s.as_str())
        .collect();

    let added: Vec<String> = ids_b
        .difference(&ids_a)
        .map(|s| s.to_string())
        .collect();
    let removed: Vec<String> = ids_a
        .difference(&ids_b)
        .map(|s| s.to_string())
        .collect();

    DriftReport {
        gdp_a: state_a.economy.gdp,
        gdp_b: state_b.economy.gdp,
        gdp_delta: state_b.economy.gdp - state_a.economy.gdp,
        cpi_a: state_a.prices.cpi,
        cpi_b: state_b.prices.cpi,
        cpi_delta: state_b.prices.cpi - state_a.prices.cpi,
        inflation_delta: state_b.prices.inflation - state_a.prices.inflation,
        unemployment_delta: state_b.labor.unemployment - state_a.labor.unemployment,
        debt_stock_delta: state_b.finance.debt.stock - state_a.finance.debt.stock,
        debt_ratio_delta: state_b.debt_ratio() - state_a.debt_ratio(),
        stability_delta: state_b.society.stability - state_a.society.stability,
        military_score_delta: state_b.military_score() - state_a.military_score(),
        added_unit_groups: added,
        removed_unit_groups: removed,
    }
}

/// Structured drift report between two country states.
#[derive(Debug, Clone)]
pub struct DriftReport {
    pub gdp_a: f64,
    pub gdp_b: f64,
    pub gdp_delta: f64,
    pub cpi_a: f64,
    pub cpi_b: f64,
    pub cpi_delta: f64,
    pub inflation_delta: f64,
    pub unemployment_delta: f64,
    pub debt_stock_delta: f64,
    pub debt_ratio_delta: f64,
    pub stability_delta: f64,
    pub military_score_delta: f64,
    pub added_unit_groups: Vec<String>,
    pub removed_unit_groups: Vec<String>,
}

impl DriftReport {
    /// True when the two states are macro-identical and share the same
    /// unit groups.
    pub fn is_clean(&self) -> bool {
        self.gdp_delta == 0.0
            && self.cpi_delta == 0.0
            && self.inflation_delta == 0.0
            && self.unemployment_delta == 0.0
            && self.debt_stock_delta == 0.0
            && self.stability_delta == 0.0
            && self.military_score_delta == 0.0
            && self.added_unit_groups.is_empty()
            && self.removed_unit_groups.is_empty()
    }
}

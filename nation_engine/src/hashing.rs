/// NationSim v1 — Canonical Hashing
///
/// Deterministic canonical serialization + SHA-256 hashing.
/// Produces byte-identical output across platforms for a given state.
///
/// Rules:
///   - engine_version is the first field — part of the state identity
///   - maps (tax, spend, units) emitted in sorted key order
///   - floats through serde_json's shortest round-trip formatting
///   - UTF-8 JSON, no whitespace, no platform newline
///
/// Precondition: the state has passed invariant validation — a
/// non-finite value here is a programming error and panics.

use sha2::{Digest, Sha256};
use serde_json::{Map, Number, Value};

use crate::domain::CountryState;
use crate::ENGINE_VERSION;

/// Canonical serialization of a CountryState to UTF-8 JSON bytes.
pub fn canonical_serialize(state: &CountryState) -> Vec<u8> {
    let obj = build_canonical_value(state);
    serde_json::to_string(&obj)
        .expect("canonical_serialize: JSON serialization failed")
        .into_bytes()
}

/// SHA-256 of the canonical serialization. Lowercase hex string.
pub fn canonical_hash(state: &CountryState) -> String {
    let bytes = canonical_serialize(state);
    let digest = Sha256::digest(&bytes);
    digest
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<String>()
}

fn num(value: f64) -> Value {
    Number::from_f64(value)
        .map(Value::Number)
        .expect("canonical_serialize: non-finite value in state")
}

/// Build the canonical serde_json::Value in strict field order.
///
/// serde_json::Map preserves insertion order (preserve_order feature),
/// and the state's BTreeMaps iterate in sorted key order.
fn build_canonical_value(state: &CountryState) -> Value {
    let mut bottlenecks = Map::new();
    bottlenecks.insert("energy".to_string(), num(state.economy.bottlenecks.energy));
    bottlenecks.insert(
        "logistics".to_string(),
        num(state.economy.bottlenecks.logistics),
    );
    bottlenecks.insert("skills".to_string(), num(state.economy.bottlenecks.skills));

    let mut economy = Map::new();
    economy.insert("gdp".to_string(), num(state.economy.gdp));
    economy.insert("bottlenecks".to_string(), Value::Object(bottlenecks));

    let mut prices = Map::new();
    prices.insert("cpi".to_string(), num(state.prices.cpi));
    prices.insert("inflation".to_string(), num(state.prices.inflation));

    let mut labor = Map::new();
    labor.insert("unemployment".to_string(), num(state.labor.unemployment));

    let mut tax = Map::new();
    for (name, rate) in &state.finance.tax {
        tax.insert(name.clone(), num(*rate));
    }
    let mut spend = Map::new();
    for (name, amount) in &state.finance.spend {
        spend.insert(name.clone(), num(*amount));
    }
    let mut debt = Map::new();
    debt.insert("stock".to_string(), num(state.finance.debt.stock));
    debt.insert("rate".to_string(), num(state.finance.debt.rate));
    debt.insert("target".to_string(), num(state.finance.debt.target));

    let mut finance = Map::new();
    finance.insert("tax".to_string(), Value::Object(tax));
    finance.insert("spend".to_string(), Value::Object(spend));
    finance.insert("debt".to_string(), Value::Object(debt));

    let mut units = Map::new();
    for (name, unit) in &state.military.units {
        let mut u = Map::new();
        u.insert("personnel".to_string(), Value::Number(unit.personnel.into()));
        u.insert("train".to_string(), num(unit.train));
        u.insert("org".to_string(), num(unit.org));
        u.insert("serviceable".to_string(), num(unit.serviceable));
        units.insert(name.clone(), Value::Object(u));
    }
    let mut military = Map::new();
    military.insert("units".to_string(), Value::Object(units));

    let mut society = Map::new();
    society.insert("stability".to_string(), num(state.society.stability));

    // -- top-level (strict field order) --
    // engine_version MUST be first — it is part of the state identity.
    let mut root = Map::new();
    root.insert(
        "engine_version".to_string(),
        Value::Number((ENGINE_VERSION as i64).into()),
    );
    root.insert("save_id".to_string(), Value::String(state.save_id.clone()));
    root.insert(
        "active_country".to_string(),
        Value::String(state.active_country.clone()),
    );
    root.insert("year".to_string(), Value::Number((state.year as i64).into()));
    root.insert(
        "quarter".to_string(),
        Value::Number((state.quarter as i64).into()),
    );
    root.insert("eps_prev".to_string(), num(state.eps_prev));
    root.insert("economy".to_string(), Value::Object(economy));
    root.insert("prices".to_string(), Value::Object(prices));
    root.insert("labor".to_string(), Value::Object(labor));
    root.insert("finance".to_string(), Value::Object(finance));
    root.insert("military".to_string(), Value::Object(military));
    root.insert("society".to_string(), Value::Object(society));

    Value::Object(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_initial_state;

    #[test]
    fn test_hash_is_stable_for_equal_states() {
        let a = create_initial_state(None, None, None);
        let b = create_initial_state(None, None, None);
        assert_eq!(canonical_hash(&a), canonical_hash(&b));
        assert_eq!(canonical_hash(&a).len(), 64);
    }

    #[test]
    fn test_hash_changes_with_any_field() {
        let base = create_initial_state(None, None, None);
        let mut changed = base.clone();
        changed.eps_prev = 0.001;
        assert_ne!(canonical_hash(&base), canonical_hash(&changed));

        let mut changed = base.clone();
        changed.finance.tax.insert("cons".to_string(), 0.051);
        assert_ne!(canonical_hash(&base), canonical_hash(&changed));
    }

    #[test]
    fn test_version_is_bound_into_serialization() {
        let state = create_initial_state(None, None, None);
        let json = String::from_utf8(canonical_serialize(&state)).unwrap();
        assert!(json.starts_with("{\"engine_version\":1,"));
    }
}

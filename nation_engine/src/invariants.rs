/// NationSim v1 — Invariant Checks
///
/// Hard-fail validation of a complete country state. The panicking
/// form guards the engine loop; the fallible form is the restore path
/// for untrusted imports.
///
/// Transition math assumes a valid state — these checks are the
/// caller's obligation at the boundary, not part of the hot path.

use crate::domain::CountryState;

/// Clamp bound for the logit-fed levels on the import path.
pub const LINK_EPS: f64 = 1e-9;

/// Run all invariant checks. Panics on the first failure.
pub fn validate_invariants(state: &CountryState) {
    if let Err(msg) = try_validate_invariants(state) {
        panic!("Invariant violation: {}", msg);
    }
}

/// Panicking form of `try_sanitize_import`.
pub fn sanitize_import(state: &mut CountryState) {
    if let Err(msg) = try_sanitize_import(state) {
        panic!("Invariant violation: {}", msg);
    }
}

/// Non-panicking variant of `validate_invariants`.
/// Returns `Err(message)` on the first failure, `Ok(())` if all pass.
pub fn try_validate_invariants(state: &CountryState) -> Result<(), String> {
    check_finite_fields(state)?;
    check_quarter_range(state)?;
    check_positive_levels(state)?;
    check_ratio_bounds(state)?;
    check_finance_bounds(state)?;
    Ok(())
}

/// Preparation for states arriving from outside — imports and resumes.
/// Validates the base invariants, then clamps training and
/// serviceability strictly inside (0,1): logit is applied to them
/// every quarter, and an endpoint would turn the update degenerate.
/// The transition itself may legally saturate a level to exactly 1.0
/// in f64 after extreme sustained spending, so a saved state can carry
/// an endpoint — reloading nudges it back into the open interval
/// instead of refusing the state.
pub fn try_sanitize_import(state: &mut CountryState) -> Result<(), String> {
    try_validate_invariants(state)?;
    for unit in state.military.units.values_mut() {
        unit.train = unit.train.clamp(LINK_EPS, 1.0 - LINK_EPS);
        unit.serviceable = unit.serviceable.clamp(LINK_EPS, 1.0 - LINK_EPS);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Individual checks (private)
// ---------------------------------------------------------------------------

/// Every numeric field must be finite — NaN/∞ would propagate through
/// the transition math silently.
fn check_finite_fields(state: &CountryState) -> Result<(), String> {
    fn finite(name: &str, value: f64) -> Result<(), String> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(format!(
                "[INVARIANT:finite_fields] {} = {} is not finite",
                name, value
            ))
        }
    }

    finite("eps_prev", state.eps_prev)?;
    finite("economy.gdp", state.economy.gdp)?;
    finite("economy.bottlenecks.energy", state.economy.bottlenecks.energy)?;
    finite("economy.bottlenecks.logistics", state.economy.bottlenecks.logistics)?;
    finite("economy.bottlenecks.skills", state.economy.bottlenecks.skills)?;
    finite("prices.cpi", state.prices.cpi)?;
    finite("prices.inflation", state.prices.inflation)?;
    finite("labor.unemployment", state.labor.unemployment)?;
    finite("finance.debt.stock", state.finance.debt.stock)?;
    finite("finance.debt.rate", state.finance.debt.rate)?;
    finite("finance.debt.target", state.finance.debt.target)?;
    finite("society.stability", state.society.stability)?;

    for (name, rate) in &state.finance.tax {
        finite(&format!("finance.tax.{}", name), *rate)?;
    }
    for (name, amount) in &state.finance.spend {
        finite(&format!("finance.spend.{}", name), *amount)?;
    }
    for (name, unit) in &state.military.units {
        finite(&format!("military.units.{}.train", name), unit.train)?;
        finite(&format!("military.units.{}.org", name), unit.org)?;
        finite(&format!("military.units.{}.serviceable", name), unit.serviceable)?;
    }
    Ok(())
}

/// Quarter is always in {1,2,3,4}.
fn check_quarter_range(state: &CountryState) -> Result<(), String> {
    if !(1..=4).contains(&state.quarter) {
        return Err(format!(
            "[INVARIANT:quarter_range] quarter = {} is outside 1..=4",
            state.quarter
        ));
    }
    Ok(())
}

/// Output level and price index stay strictly positive.
fn check_positive_levels(state: &CountryState) -> Result<(), String> {
    if state.economy.gdp <= 0.0 {
        return Err(format!(
            "[INVARIANT:positive_levels] economy.gdp = {} must be > 0",
            state.economy.gdp
        ));
    }
    if state.prices.cpi <= 0.0 {
        return Err(format!(
            "[INVARIANT:positive_levels] prices.cpi = {} must be > 0",
            state.prices.cpi
        ));
    }
    Ok(())
}

/// All ratio-typed fields lie in [0,1].
fn check_ratio_bounds(state: &CountryState) -> Result<(), String> {
    let b = &state.economy.bottlenecks;
    let mut ratios: Vec<(String, f64)> = vec![
        ("economy.bottlenecks.energy".to_string(), b.energy),
        ("economy.bottlenecks.logistics".to_string(), b.logistics),
        ("economy.bottlenecks.skills".to_string(), b.skills),
        ("labor.unemployment".to_string(), state.labor.unemployment),
        ("society.stability".to_string(), state.society.stability),
        ("finance.debt.target".to_string(), state.finance.debt.target),
    ];
    for (name, rate) in &state.finance.tax {
        ratios.push((format!("finance.tax.{}", name), *rate));
    }
    for (name, unit) in &state.military.units {
        ratios.push((format!("military.units.{}.train", name), unit.train));
        ratios.push((format!("military.units.{}.org", name), unit.org));
        ratios.push((format!("military.units.{}.serviceable", name), unit.serviceable));
    }
    for (name, value) in ratios {
        if !(0.0..=1.0).contains(&value) {
            return Err(format!(
                "[INVARIANT:ratio_bounds] {} = {} is outside [0,1]",
                name, value
            ));
        }
    }
    Ok(())
}

/// Debt stock non-negative, effective rate strictly positive,
/// spending components non-negative.
fn check_finance_bounds(state: &CountryState) -> Result<(), String> {
    if state.finance.debt.stock < 0.0 {
        return Err(format!(
            "[INVARIANT:finance_bounds] finance.debt.stock = {} must be >= 0",
            state.finance.debt.stock
        ));
    }
    if state.finance.debt.rate <= 0.0 {
        return Err(format!(
            "[INVARIANT:finance_bounds] finance.debt.rate = {} must be > 0",
            state.finance.debt.rate
        ));
    }
    for (name, amount) in &state.finance.spend {
        if *amount < 0.0 {
            return Err(format!(
                "[INVARIANT:finance_bounds] finance.spend.{} = {} must be >= 0",
                name, amount
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_initial_state;

    #[test]
    fn test_default_scenario_is_valid() {
        assert!(try_validate_invariants(&create_initial_state(None, None, None)).is_ok());
    }

    #[test]
    fn test_nan_gdp_is_rejected() {
        let mut state = create_initial_state(None, None, None);
        state.economy.gdp = f64::NAN;
        let err = try_validate_invariants(&state).unwrap_err();
        assert!(err.contains("finite_fields"), "{}", err);
    }

    #[test]
    fn test_quarter_out_of_range_is_rejected() {
        let mut state = create_initial_state(None, None, None);
        state.quarter = 5;
        let err = try_validate_invariants(&state).unwrap_err();
        assert!(err.contains("quarter_range"), "{}", err);
    }

    #[test]
    fn test_tax_rate_above_one_is_rejected() {
        let mut state = create_initial_state(None, None, None);
        state.finance.tax.insert("cons".to_string(), 1.5);
        let err = try_validate_invariants(&state).unwrap_err();
        assert!(err.contains("ratio_bounds"), "{}", err);
    }

    #[test]
    fn test_debt_target_outside_unit_interval_is_rejected() {
        let mut state = create_initial_state(None, None, None);
        state.finance.debt.target = 5.0;
        let err = try_validate_invariants(&state).unwrap_err();
        assert!(err.contains("ratio_bounds"), "{}", err);
    }

    #[test]
    fn test_import_clamps_saturated_levels_into_open_interval() {
        let mut state = create_initial_state(None, None, None);
        {
            let army = state.military.units.get_mut("army").unwrap();
            army.train = 1.0;
            army.serviceable = 0.0;
        }
        // Base invariants accept the closed interval...
        assert!(try_validate_invariants(&state).is_ok());
        // ...and the import path pulls the endpoints inward.
        try_sanitize_import(&mut state).unwrap();
        let army = &state.military.units["army"];
        assert_eq!(army.train, 1.0 - LINK_EPS);
        assert_eq!(army.serviceable, LINK_EPS);
    }

    #[test]
    fn test_import_leaves_interior_levels_untouched() {
        let mut state = create_initial_state(None, None, None);
        let before = state.clone();
        try_sanitize_import(&mut state).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_import_still_rejects_out_of_range_levels() {
        let mut state = create_initial_state(None, None, None);
        state.military.units.get_mut("army").unwrap().train = 5.0;
        let err = try_sanitize_import(&mut state).unwrap_err();
        assert!(err.contains("ratio_bounds"), "{}", err);
    }

    #[test]
    #[should_panic(expected = "Invariant violation")]
    fn test_panicking_form_panics() {
        let mut state = create_initial_state(None, None, None);
        state.prices.cpi = -1.0;
        validate_invariants(&state);
    }
}

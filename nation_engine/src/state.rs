/// NationSim v1 — Scenario Construction
///
/// The default 1836 starting country. Figures are the scenario's
/// baseline: output 1200, price index 100, one standing army group.

use std::collections::BTreeMap;

use crate::domain::{
    Bottlenecks, CountryState, Debt, Economy, Finance, Labor, Military,
    PolicyInputs, Prices, Society, UnitGroup,
};

/// Create the default scenario state for a fresh campaign.
pub fn create_initial_state(
    save_id: Option<&str>,
    country: Option<&str>,
    year: Option<i32>,
) -> CountryState {
    let mut tax = BTreeMap::new();
    tax.insert("cons".to_string(), 0.05);
    tax.insert("income".to_string(), 0.05);
    tax.insert("profit".to_string(), 0.06);
    tax.insert("trade".to_string(), 0.03);

    let mut spend = BTreeMap::new();
    spend.insert("edu".to_string(), 20.0);
    spend.insert("health".to_string(), 18.0);
    spend.insert("infra".to_string(), 25.0);
    spend.insert("welfare".to_string(), 15.0);
    spend.insert("def".to_string(), 30.0);
    spend.insert("rnd".to_string(), 5.0);
    spend.insert("admin".to_string(), 6.0);

    let mut units = BTreeMap::new();
    units.insert(
        "army".to_string(),
        UnitGroup {
            personnel: 350_000,
            train: 0.45,
            org: 0.5,
            serviceable: 0.7,
        },
    );

    CountryState {
        save_id: save_id.unwrap_or("KV-1836").to_string(),
        active_country: country.unwrap_or("AUT").to_string(),
        year: year.unwrap_or(1836),
        quarter: 1,
        eps_prev: 0.0,
        economy: Economy {
            gdp: 1200.0,
            bottlenecks: Bottlenecks {
                energy: 0.95,
                logistics: 0.92,
                skills: 0.90,
            },
        },
        prices: Prices {
            cpi: 100.0,
            inflation: 0.01,
        },
        labor: Labor { unemployment: 0.08 },
        finance: Finance {
            tax,
            spend,
            debt: Debt {
                stock: 600.0,
                rate: 0.05,
                target: 0.9,
            },
        },
        military: Military { units },
        society: Society { stability: 0.7 },
    }
}

/// Default policy record — identical to `PolicyInputs::default()`,
/// exposed for symmetry with `create_initial_state`.
pub fn default_policy() -> PolicyInputs {
    PolicyInputs::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariants::validate_invariants;

    #[test]
    fn test_default_scenario_passes_invariants() {
        let state = create_initial_state(None, None, None);
        validate_invariants(&state);
        assert_eq!(state.save_id, "KV-1836");
        assert_eq!(state.active_country, "AUT");
        assert_eq!(state.seed_key(), "KV-1836|1836|1|AUT");
    }

    #[test]
    fn test_overrides_apply() {
        let state = create_initial_state(Some("RUN-2"), Some("PRU"), Some(1840));
        assert_eq!(state.seed_key(), "RUN-2|1840|1|PRU");
    }
}

/// NationSim v1 — Quarterly Transition Function
///
/// ALL state-mutation logic lives here. The function is pure: it
/// deep-clones the previous state and never touches its argument.
///
/// Randomness budget: exactly 4 standard-normal samples per call,
/// consumed strictly in the order disturbance, inflation,
/// unemployment, debt rate. Reordering would change every downstream
/// outcome for a given seed.

use crate::domain::{CountryState, PolicyInputs, QuarterReport};
use crate::rng::SeededRng;
use crate::stats::{clamp01, logit, normal01, sigmoid};

/// Potential output growth per quarter before bottlenecks and policy.
const POTENTIAL_GROWTH: f64 = 0.0075;

/// Advance one quarter. Returns the new state only.
pub fn advance_quarter(state: &CountryState, policy: &PolicyInputs) -> CountryState {
    let (next, _) = advance_quarter_detailed(state, policy);
    next
}

/// Advance one quarter and report the settled figures.
pub fn advance_quarter_detailed(
    state: &CountryState,
    policy: &PolicyInputs,
) -> (CountryState, QuarterReport) {
    let mut s = state.clone();
    let mut rng = SeededRng::from_key(&state.seed_key());

    // AR(1) disturbance; the carry gives the noise process memory
    // across quarters and across save/load.
    let eps = 0.4 * state.eps_prev + 0.02 * normal01(&mut rng);
    s.eps_prev = eps;

    // Output: potential growth scaled by the binding bottleneck, plus
    // the marginal effect of investment and research above baseline.
    let bottleneck = state.economy.bottlenecks.binding();
    let growth = POTENTIAL_GROWTH * bottleneck
        + 0.3 * (policy.invest_share - 0.18)
        + 0.1 * (policy.rnd_share - 0.01)
        + eps;
    s.economy.gdp = (state.economy.gdp * (1.0 + growth)).max(1.0);

    // Prices: persistent inflation pulled by the output gap, pushed by
    // capacity constraints.
    s.prices.inflation = 0.6 * state.prices.inflation
        + 0.4 * (growth - POTENTIAL_GROWTH)
        + 0.02 * (1.0 - bottleneck)
        + 0.01 * normal01(&mut rng);
    s.prices.cpi *= 1.0 + s.prices.inflation;

    // Labor: Okun-style response to the output gap.
    s.labor.unemployment = clamp01(
        state.labor.unemployment - 0.5 * (growth - POTENTIAL_GROWTH)
            + 0.01 * normal01(&mut rng),
    );

    // Tax rates: uniform percentage-point adjustment, floored at zero.
    for rate in s.finance.tax.values_mut() {
        *rate = (*rate + policy.tax_delta / 100.0).max(0.0);
    }

    // Fiscal balance and debt dynamics. Debt above 90% of output pays
    // a risk premium on the effective rate.
    let tax_take = (0.22 + 0.4 * s.prices.inflation) * s.economy.gdp;
    let spend: f64 = s.finance.spend.values().sum();
    let deficit = spend - tax_take;
    let old_stock = state.finance.debt.stock;
    s.finance.debt.stock =
        (old_stock + deficit + state.finance.debt.rate * old_stock).max(0.0);
    s.finance.debt.rate = (0.04
        + (old_stock / s.economy.gdp - 0.9).max(0.0) * 0.008
        + 0.002 * normal01(&mut rng))
    .max(0.01);

    // Military: logit-space updates with diminishing returns from
    // spending and a constant attrition term.
    let train_boost = 0.15 * (1.0 + policy.train_per_person.max(0.0) / 100.0).ln();
    let maintain_boost =
        0.02 * (1.0 + policy.maintain_per_eq.max(0.0) / 100.0).ln();
    for unit in s.military.units.values_mut() {
        unit.train = sigmoid(logit(unit.train) + train_boost - 0.02);
        unit.serviceable = sigmoid(logit(unit.serviceable) + maintain_boost - 0.01);
    }

    // Society: smoothed toward a target driven by inflation and
    // unemployment, never jumped.
    let stability_target = clamp01(
        1.0 - 1.2 * s.prices.inflation.max(0.0) - 0.8 * s.labor.unemployment,
    );
    s.society.stability = 0.6 * state.society.stability + 0.4 * stability_target;

    let report = QuarterReport {
        year: state.year,
        quarter: state.quarter,
        eps,
        growth,
        inflation: s.prices.inflation,
        unemployment: s.labor.unemployment,
        tax_take,
        spend,
        deficit,
        debt_ratio: s.debt_ratio(),
        military_score: s.military_score(),
        stability: s.society.stability,
    };

    // Advance the calendar last.
    s.quarter += 1;
    if s.quarter > 4 {
        s.quarter = 1;
        s.year += 1;
    }

    (s, report)
}

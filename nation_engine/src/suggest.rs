/// NationSim v1 — Policy Suggestion Heuristic
///
/// Pure function of the current state. No randomness, no carry
/// dependency: calling it twice on the same state yields an identical
/// record. Used to pre-populate the editable inputs each quarter.

use crate::domain::{CountryState, PolicyInputs};

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Recommend policy inputs for the coming quarter.
///
/// Note the units: the heuristic speaks the front end's language —
/// invest/research shares in percent — while the transition reads
/// fractional shares. The surrounding application owns the conversion
/// when it feeds edited inputs back in.
pub fn suggest_policy(state: &CountryState) -> PolicyInputs {
    let bottleneck = state.economy.bottlenecks.binding();

    // Lean investment against the binding constraint.
    let invest = round1(18.0 + (1.0 - bottleneck) * 8.0);
    let rnd = if bottleneck < 0.9 { 1.2 } else { 1.0 };

    // With multiple unit groups the reference level is the
    // personnel-weighted mean.
    let train_level = state.military.weighted_train();
    let serviceable = state.military.weighted_serviceable();
    let train = (20.0 + (0.6 - train_level).max(0.0) * 60.0).round();
    let maintain = (15.0 + (0.7 - serviceable).max(0.0) * 40.0).round();

    // Nudge taxes toward the debt target, with a dead zone below it.
    let debt_ratio = state.debt_ratio();
    let target = state.finance.debt.target;
    let tax_delta = if debt_ratio > target {
        0.2
    } else if debt_ratio < target - 0.1 {
        -0.2
    } else {
        0.0
    };

    PolicyInputs {
        invest_share: invest,
        rnd_share: round1(rnd),
        train_per_person: train,
        maintain_per_eq: maintain,
        tax_delta: round1(tax_delta),
    }
}

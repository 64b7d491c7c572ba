/// NationSim v1 — Core Domain Types
///
/// Pure data. No transition logic. All ratio-typed fields live in
/// [0,1]; output level and price index are strictly positive.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

// ── Economy ────────────────────────────────────────────────────────

/// Capacity constraints on potential growth. 1 = unconstrained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bottlenecks {
    pub energy: f64,
    pub logistics: f64,
    pub skills: f64,
}

impl Bottlenecks {
    /// The binding constraint — the minimum of the three coefficients.
    pub fn binding(&self) -> f64 {
        self.energy.min(self.logistics).min(self.skills)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Economy {
    /// Gross output level, strictly positive.
    pub gdp: f64,
    pub bottlenecks: Bottlenecks,
}

// ── Prices / Labor ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Prices {
    /// Price index, base-normalized at 100.
    pub cpi: f64,
    /// Per-quarter inflation rate, signed.
    pub inflation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Labor {
    pub unemployment: f64,
}

// ── Finance ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Debt {
    /// Outstanding stock, non-negative.
    pub stock: f64,
    /// Effective interest rate, strictly positive.
    pub rate: f64,
    /// Target debt-to-output ratio.
    pub target: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Finance {
    /// Named tax-rate components, each in [0,1].
    pub tax: BTreeMap<String, f64>,
    /// Named spending components, each non-negative.
    pub spend: BTreeMap<String, f64>,
    pub debt: Debt,
}

// ── Military ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitGroup {
    pub personnel: i64,
    /// Training level in [0,1] — updated in logit space, clamped
    /// strictly inside (0,1) on import.
    pub train: f64,
    /// Organization level in [0,1].
    pub org: f64,
    /// Equipment readiness in [0,1] — updated in logit space, clamped
    /// strictly inside (0,1) on import.
    pub serviceable: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Military {
    pub units: BTreeMap<String, UnitGroup>,
}

impl Military {
    /// Personnel-weighted mean training level across unit groups.
    /// Falls back to an unweighted mean when total personnel is zero,
    /// and to 0 when there are no units at all.
    pub fn weighted_train(&self) -> f64 {
        weighted_mean(self.units.values().map(|u| (u.personnel, u.train)))
    }

    /// Personnel-weighted mean serviceability across unit groups.
    pub fn weighted_serviceable(&self) -> f64 {
        weighted_mean(self.units.values().map(|u| (u.personnel, u.serviceable)))
    }
}

fn weighted_mean(values: impl Iterator<Item = (i64, f64)>) -> f64 {
    let mut weight_sum = 0.0;
    let mut weighted = 0.0;
    let mut plain = 0.0;
    let mut count = 0usize;
    for (personnel, level) in values {
        let w = personnel.max(0) as f64;
        weight_sum += w;
        weighted += w * level;
        plain += level;
        count += 1;
    }
    if count == 0 {
        0.0
    } else if weight_sum > 0.0 {
        weighted / weight_sum
    } else {
        plain / count as f64
    }
}

// ── Society ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Society {
    pub stability: f64,
}

// ── Country State ──────────────────────────────────────────────────

/// Complete per-country simulation state. Created once (scenario
/// default or import) and thereafter only ever replaced whole by the
/// transition function's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountryState {
    pub save_id: String,
    pub active_country: String,
    pub year: i32,
    /// Always in {1,2,3,4}.
    pub quarter: u8,
    /// Previous quarter's disturbance — the autoregressive carry.
    /// Internal simulation state, not a policy input. Must round-trip
    /// through serialization to preserve continuity across save/load.
    pub eps_prev: f64,
    pub economy: Economy,
    pub prices: Prices,
    pub labor: Labor,
    pub finance: Finance,
    pub military: Military,
    pub society: Society,
}

impl CountryState {
    /// Per-call seed for the quarter's random source. Deterministic in
    /// (save id, year, quarter, active country) — no hidden generator
    /// state anywhere.
    pub fn seed_key(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.save_id, self.year, self.quarter, self.active_country
        )
    }

    /// Debt stock over output, with output floored at 1.
    pub fn debt_ratio(&self) -> f64 {
        self.finance.debt.stock / self.economy.gdp.max(1.0)
    }

    /// Headline military readiness score on a 0–100 scale.
    pub fn military_score(&self) -> f64 {
        let train = self.military.weighted_train();
        let serviceable = self.military.weighted_serviceable();
        (train * 0.5 + serviceable * 0.5) * 100.0
    }
}

// ── Policy Inputs ──────────────────────────────────────────────────

/// The five per-quarter policy levers. Defaults are resolved here, at
/// the boundary — the transition math never sees missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyInputs {
    /// Investment share of output, fractional.
    pub invest_share: f64,
    /// Research share of output, fractional.
    pub rnd_share: f64,
    /// Training spend per person.
    pub train_per_person: f64,
    /// Maintenance spend per equipment unit.
    pub maintain_per_eq: f64,
    /// Uniform tax-rate adjustment, percentage points.
    pub tax_delta: f64,
}

impl Default for PolicyInputs {
    fn default() -> Self {
        Self {
            invest_share: 0.18,
            rnd_share: 0.01,
            train_per_person: 20.0,
            maintain_per_eq: 15.0,
            tax_delta: 0.0,
        }
    }
}

// ── Quarter Report ─────────────────────────────────────────────────

/// Structured, immutable outcome of one quarterly transition —
/// the figures a front end displays for the settled quarter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterReport {
    /// Year and quarter that were settled (pre-advance calendar).
    pub year: i32,
    pub quarter: u8,
    /// This quarter's disturbance, now the carry.
    pub eps: f64,
    pub growth: f64,
    pub inflation: f64,
    pub unemployment: f64,
    pub tax_take: f64,
    pub spend: f64,
    pub deficit: f64,
    pub debt_ratio: f64,
    pub military_score: f64,
    pub stability: f64,
}

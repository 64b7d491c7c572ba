/// NationSim v1 — Engine
///
/// Top-level orchestrator. Delegates all mutation to transitions and
/// validates every produced state via invariants. Holds nothing but
/// the current state — all randomness is derived per call from the
/// state's own seed fields.

use crate::domain::{CountryState, PolicyInputs, QuarterReport};
use crate::invariants::{sanitize_import, validate_invariants};
use crate::state::create_initial_state;
use crate::suggest::suggest_policy;
use crate::transitions::advance_quarter_detailed;

/// Stateful engine wrapping the pure functional transition layer.
pub struct CountryEngine {
    state: Option<CountryState>,
    quarters_settled: u64,
}

impl CountryEngine {
    /// Create a new, uninitialized engine.
    pub fn new() -> Self {
        Self {
            state: None,
            quarters_settled: 0,
        }
    }

    /// Access the current state (panics if not initialized).
    pub fn state(&self) -> &CountryState {
        self.state
            .as_ref()
            .expect("Engine not initialised — call initialize_state() first")
    }

    /// Create the default scenario state and store it.
    pub fn initialize_state(&mut self) -> &CountryState {
        self.state = Some(create_initial_state(None, None, None));
        self.quarters_settled = 0;
        self.state.as_ref().unwrap()
    }

    /// Adopt an externally constructed state (import, resume).
    /// Validates and clamps via the import path — panics on violation.
    pub fn load_state(&mut self, mut state: CountryState) -> &CountryState {
        sanitize_import(&mut state);
        self.state = Some(state);
        self.quarters_settled = 0;
        self.state.as_ref().unwrap()
    }

    /// Settle one quarter:
    ///   1. Run the pure transition on the current state
    ///   2. Validate invariants on the produced state
    ///   3. Store and return it with the settled figures
    pub fn settle_quarter(
        &mut self,
        policy: &PolicyInputs,
    ) -> (&CountryState, QuarterReport) {
        let current = self
            .state
            .as_ref()
            .expect("Engine not initialised — call initialize_state() first");

        let (next, report) = advance_quarter_detailed(current, policy);
        validate_invariants(&next);
        self.state = Some(next);
        self.quarters_settled += 1;

        (self.state.as_ref().unwrap(), report)
    }

    /// Settle an ordered sequence of quarters deterministically.
    pub fn settle_sequence(&mut self, policies: &[PolicyInputs]) -> &CountryState {
        for policy in policies {
            self.settle_quarter(policy);
        }
        self.state()
    }

    /// Rebuild from an initial state and per-quarter policy log.
    pub fn replay(
        &mut self,
        initial: CountryState,
        policies: &[PolicyInputs],
    ) -> &CountryState {
        self.load_state(initial);
        for policy in policies {
            self.settle_quarter(policy);
        }
        self.state()
    }

    /// Recommended policy inputs for the coming quarter.
    pub fn suggest(&self) -> PolicyInputs {
        suggest_policy(self.state())
    }

    /// Number of quarters settled since the last (re)initialization.
    pub fn quarters_settled(&self) -> u64 {
        self.quarters_settled
    }
}

impl Default for CountryEngine {
    fn default() -> Self {
        Self::new()
    }
}

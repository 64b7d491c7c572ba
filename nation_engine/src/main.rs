/// NationSim v1 — Scenario Runner / Self-Check Harness
///
/// Runs the default scenario for N quarters, prints the settled
/// figures, then re-runs the identical schedule and compares canonical
/// hashes. Exits nonzero on a determinism failure.
///
/// Usage: nation_engine [quarters] [--suggest]
///   quarters   number of quarters to settle (default 12)
///   --suggest  use the heuristic's inputs each quarter instead of
///              the plain defaults

use nation_engine::domain::PolicyInputs;
use nation_engine::engine::CountryEngine;
use nation_engine::hashing::canonical_hash;
use nation_engine::suggest::suggest_policy;

fn run(quarters: u32, use_suggestions: bool, print: bool) -> String {
    let mut engine = CountryEngine::new();
    engine.initialize_state();

    for _ in 0..quarters {
        let policy = if use_suggestions {
            let mut p = suggest_policy(engine.state());
            // The heuristic speaks percent for the share levers.
            p.invest_share /= 100.0;
            p.rnd_share /= 100.0;
            p
        } else {
            PolicyInputs::default()
        };

        let (state, report) = engine.settle_quarter(&policy);
        if print {
            println!(
                "{} Q{}  gdp={:>8.2}  infl={:>6.2}%  unemp={:>5.1}%  \
                 deficit={:>7.2}  debt={:>5.1}%  mil={:>5.1}  stab={:>5.1}%",
                report.year,
                report.quarter,
                state.economy.gdp,
                report.inflation * 100.0,
                report.unemployment * 100.0,
                report.deficit,
                report.debt_ratio * 100.0,
                report.military_score,
                report.stability * 100.0,
            );
        }
    }

    canonical_hash(engine.state())
}

fn main() {
    let mut quarters: u32 = 12;
    let mut use_suggestions = false;
    for arg in std::env::args().skip(1) {
        if arg == "--suggest" {
            use_suggestions = true;
        } else if let Ok(n) = arg.parse::<u32>() {
            quarters = n;
        } else {
            eprintln!("Unknown argument: {}", arg);
            std::process::exit(2);
        }
    }

    let h1 = run(quarters, use_suggestions, true);
    let h2 = run(quarters, use_suggestions, false);

    println!("\nFinal canonical hash: {}", h1);
    if h1 == h2 {
        println!("[OK] Re-run produced an identical hash.");
    } else {
        println!("[FAIL] DETERMINISM FAILURE:");
        println!("  Run 1: {}", h1);
        println!("  Run 2: {}", h2);
        std::process::exit(1);
    }
}

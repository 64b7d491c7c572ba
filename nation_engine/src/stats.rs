/// NationSim v1 — Statistical Transforms
///
/// Standard-normal sampling on top of the seeded uniform stream, plus
/// the link functions used to keep ratio-typed fields inside [0,1].

use crate::rng::SeededRng;

/// One standard-normal draw via Box–Muller.
///
/// Consumes exactly two uniform draws per call (a draw of exactly 0 is
/// rejected and redrawn — it is invalid for the logarithm). Returns a
/// single value rather than the natural pair; one draw per call keeps
/// the per-quarter randomness budget easy to account for.
pub fn normal01(rng: &mut SeededRng) -> f64 {
    let mut u = 0.0;
    while u == 0.0 {
        u = rng.next_f64();
    }
    let mut v = 0.0;
    while v == 0.0 {
        v = rng.next_f64();
    }
    (-2.0 * u.ln()).sqrt() * (2.0 * std::f64::consts::PI * v).cos()
}

/// Restrict x to [0,1]. Total function.
pub fn clamp01(x: f64) -> f64 {
    x.max(0.0).min(1.0)
}

/// ln(p / (1 - p)). Defined only for p strictly inside (0,1);
/// callers guarantee interior inputs by construction.
pub fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

/// 1 / (1 + e^-z). Output stays strictly inside (0,1) for finite z.
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp01_bounds() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(0.0), 0.0);
        assert_eq!(clamp01(0.37), 0.37);
        assert_eq!(clamp01(1.0), 1.0);
        assert_eq!(clamp01(17.0), 1.0);
    }

    #[test]
    fn test_sigmoid_midpoint_and_open_interval() {
        assert_eq!(sigmoid(0.0), 0.5);
        for z in [-40.0, -5.0, 5.0, 40.0] {
            let p = sigmoid(z);
            assert!(p > 0.0 && p < 1.0, "sigmoid({}) = {} left (0,1)", z, p);
        }
    }

    #[test]
    fn test_logit_inverts_sigmoid() {
        for p in [0.001, 0.1, 0.45, 0.5, 0.7, 0.999] {
            let roundtrip = sigmoid(logit(p));
            assert!((roundtrip - p).abs() < 1e-12, "{} -> {}", p, roundtrip);
        }
    }

    #[test]
    fn test_normal01_deterministic_for_fixed_key() {
        let mut a = SeededRng::from_key("normal-fixture");
        let mut b = SeededRng::from_key("normal-fixture");
        for _ in 0..256 {
            assert_eq!(normal01(&mut a), normal01(&mut b));
        }
    }

    #[test]
    fn test_normal01_consumes_two_uniform_draws() {
        let mut sampled = SeededRng::from_key("budget");
        normal01(&mut sampled);

        // Advancing a twin generator by two raw draws must land on the
        // same internal state (no rejections occur for this key).
        let mut twin = SeededRng::from_key("budget");
        twin.next_f64();
        twin.next_f64();
        assert_eq!(sampled, twin);
    }

    #[test]
    fn test_normal01_sample_moments_are_plausible() {
        let mut rng = SeededRng::from_key("moments");
        let n = 20_000;
        let draws: Vec<f64> = (0..n).map(|_| normal01(&mut rng)).collect();
        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>()
            / n as f64;
        assert!(mean.abs() < 0.05, "sample mean {} too far from 0", mean);
        assert!((var - 1.0).abs() < 0.1, "sample variance {} too far from 1", var);
    }
}

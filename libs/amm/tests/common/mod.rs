//! Shared fixtures and a floating-point reference model
//!
//! The reference model solves the two-token StableSwap equations in f64:
//! the invariant through the closed-form root of its cubic, one balance
//! through the quadratic. It is precise to roughly 1e-12 relative, which is
//! enough to check the integer solvers to 0.01%.

#![allow(dead_code)]

use dualcurve_amm::{AmplificationPair, DualCurveMath};
use dualcurve_types::{Amplification, FixedPoint};

pub fn fp(s: &str) -> FixedPoint {
    FixedPoint::from_decimal_str(s).unwrap()
}

pub fn amps(a1: u64, a2: u64) -> AmplificationPair {
    AmplificationPair::new(
        Amplification::from_human(a1).unwrap(),
        Amplification::from_human(a2).unwrap(),
    )
}

pub fn math() -> DualCurveMath {
    DualCurveMath::default()
}

/// Invariant of [x, y] for amplification `amp`
///
/// D³ + p·D + q = 0 with p = 4xy(Ann − 1) and q = −4xy·Ann·(x + y).
pub fn reference_invariant(x: f64, y: f64, amp: f64) -> f64 {
    if x + y == 0.0 {
        return 0.0;
    }
    let ann = amp * 2.0;
    let product = 4.0 * x * y;
    let p = product * (ann - 1.0);
    let q = -product * ann * (x + y);
    let c = (-q / 2.0 + (q * q / 4.0 + p * p * p / 27.0).sqrt()).cbrt();
    c - p / (3.0 * c)
}

/// Balance paired with `other` on the curve (amp, d)
pub fn reference_balance(other: f64, d: f64, amp: f64) -> f64 {
    let ann = amp * 2.0;
    let b = other + d / ann - d;
    let c = -d * d * d / (4.0 * ann * other);
    (-b + (b * b - 4.0 * c).sqrt()) / 2.0
}

/// Symmetric balance on the curve with invariant d
pub fn reference_anchor(d: f64) -> f64 {
    d / 2.0
}

/// Two-phase swap quote: solve on the active curve, re-solve past the kink
pub fn reference_out_given_in(
    balances: [f64; 2],
    amps: (f64, f64),
    index_in: usize,
    amount_in: f64,
) -> f64 {
    let index_out = 1 - index_in;
    let active = |b: [f64; 2]| if b[0] < b[1] { amps.0 } else { amps.1 };

    let amp = active(balances);
    let d = reference_invariant(balances[0], balances[1], amp);

    let mut moved = balances;
    moved[index_in] += amount_in;
    let mut new_out = reference_balance(moved[index_in], d, amp);

    moved[index_out] = new_out;
    let landed = active(moved);
    if landed != amp {
        let z = reference_anchor(d);
        let translated = reference_invariant(z, z, landed);
        new_out = reference_balance(moved[index_in], translated, landed);
    }
    balances[index_out] - new_out
}

pub fn relative_error(actual: f64, expected: f64) -> f64 {
    ((actual - expected) / expected).abs()
}

pub fn assert_relative(actual: f64, expected: f64, tolerance: f64) {
    let error = relative_error(actual, expected);
    assert!(
        error <= tolerance,
        "actual {} expected {} relative error {} exceeds {}",
        actual,
        expected,
        error,
        tolerance
    );
}

//! Curve selection for the two amplification regimes
//!
//! The kink is the line balance0 == balance1. Curve 1 is active strictly
//! below it, curve 2 on and above it.

use dualcurve_types::{Amplification, FixedPoint};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Active amplification regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Curve {
    /// balance0 < balance1
    Curve1,
    /// balance0 >= balance1
    Curve2,
}

impl Curve {
    pub fn other(self) -> Self {
        match self {
            Curve::Curve1 => Curve::Curve2,
            Curve::Curve2 => Curve::Curve1,
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Curve::Curve1 => write!(f, "curve 1"),
            Curve::Curve2 => write!(f, "curve 2"),
        }
    }
}

/// Select the curve governing a balance pair
pub fn select_curve(balances: [FixedPoint; 2]) -> Curve {
    if balances[0] < balances[1] {
        Curve::Curve1
    } else {
        Curve::Curve2
    }
}

/// Amplification parameters of both curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmplificationPair {
    pub curve_1: Amplification,
    pub curve_2: Amplification,
}

impl AmplificationPair {
    pub fn new(curve_1: Amplification, curve_2: Amplification) -> Self {
        Self { curve_1, curve_2 }
    }

    /// Same amplification on both sides of the kink
    pub fn uniform(amp: Amplification) -> Self {
        Self::new(amp, amp)
    }

    pub fn for_curve(&self, curve: Curve) -> Amplification {
        match curve {
            Curve::Curve1 => self.curve_1,
            Curve::Curve2 => self.curve_2,
        }
    }
}

/// The pool invariant expressed under each curve
///
/// When the pool sits on curve 1, `curve_2` is the curve 1 invariant
/// translated through the anchor, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvariantPair {
    pub curve_1: FixedPoint,
    pub curve_2: FixedPoint,
}

impl InvariantPair {
    pub fn new(curve_1: FixedPoint, curve_2: FixedPoint) -> Self {
        Self { curve_1, curve_2 }
    }

    pub fn for_curve(&self, curve: Curve) -> FixedPoint {
        match curve {
            Curve::Curve1 => self.curve_1,
            Curve::Curve2 => self.curve_2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_curve() {
        let ten = FixedPoint::from_integer(10);
        let twelve = FixedPoint::from_integer(12);
        assert_eq!(select_curve([ten, twelve]), Curve::Curve1);
        assert_eq!(select_curve([twelve, ten]), Curve::Curve2);
        assert_eq!(select_curve([ten, ten]), Curve::Curve2);
        assert_eq!(select_curve([FixedPoint::ZERO, FixedPoint::ZERO]), Curve::Curve2);
    }

    #[test]
    fn test_boundary_is_one_unit_wide() {
        let ten = FixedPoint::from_integer(10);
        let just_below = ten.saturating_sub(FixedPoint::EPSILON);
        assert_eq!(select_curve([just_below, ten]), Curve::Curve1);
    }

    #[test]
    fn test_pairs_follow_curve() {
        let amps = AmplificationPair::new(
            Amplification::from_human(450).unwrap(),
            Amplification::from_human(50).unwrap(),
        );
        assert_eq!(amps.for_curve(Curve::Curve1).raw(), 450_000);
        assert_eq!(amps.for_curve(Curve::Curve2).raw(), 50_000);
        assert_eq!(Curve::Curve1.other(), Curve::Curve2);

        let invariants = InvariantPair::new(FixedPoint::ONE, FixedPoint::TWO);
        assert_eq!(invariants.for_curve(Curve::Curve2), FixedPoint::TWO);
    }
}

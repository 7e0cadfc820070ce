//! Curve-aware balance resolution
//!
//! Swaps and single-token liquidity operations all solve for one balance
//! starting from the curve the pool is on. When the solved balance lands on
//! the other side of the kink, the invariant is translated through the
//! anchor and the balance is solved again under the other amplification.

use crate::curve::{select_curve, AmplificationPair, Curve};
use crate::errors::MathError;
use crate::solver::DualCurveMath;
use dualcurve_types::FixedPoint;
use tracing::debug;

/// A solved balance and the regime it was solved under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedBalance {
    pub balance: FixedPoint,

    /// Curve whose amplification produced `balance`
    pub curve: Curve,

    /// Invariant under `curve`
    pub invariant: FixedPoint,

    /// Whether the solve crossed the kink
    pub crossed: bool,
}

impl DualCurveMath {
    /// Solve `balances[token_index]` for `invariant`, which is valid under `start`
    pub fn resolve_balance(
        &self,
        balances: [FixedPoint; 2],
        amps: AmplificationPair,
        start: Curve,
        invariant: FixedPoint,
        token_index: usize,
    ) -> Result<ResolvedBalance, MathError> {
        let start_amp = amps.for_curve(start);
        let candidate = self.solve_balance(balances, start_amp, invariant, token_index)?;

        let mut landed = balances;
        landed[token_index] = candidate;
        if select_curve(landed) == start {
            return Ok(ResolvedBalance {
                balance: candidate,
                curve: start,
                invariant,
                crossed: false,
            });
        }

        let target = start.other();
        let target_amp = amps.for_curve(target);
        let translated = self.translate_invariant(start_amp, target_amp, invariant)?;
        let balance = self.solve_balance(balances, target_amp, translated, token_index)?;

        debug!(
            from = %start,
            to = %target,
            token_index,
            candidate = %candidate,
            %balance,
            "balance solve crossed the kink"
        );

        Ok(ResolvedBalance {
            balance,
            curve: target,
            invariant: translated,
            crossed: true,
        })
    }
}

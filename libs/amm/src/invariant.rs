//! StableSwap invariant solver
//!
//! Newton iteration on
//!
//! ```text
//! Ann·S + D = Ann·D + D^(n+1) / (n^n·∏b),   Ann = amp·n
//! ```
//!
//! with the update step
//!
//! ```text
//! D' = (n·D² + Ann·S·P_D) / ((n+1)·D + (Ann − 1)·P_D),   P_D = n^n·∏b / D^(n−1)
//! ```
//!
//! The amplification is carried at AMP_PRECISION, so numerator and
//! denominator are both multiplied by AMP_PRECISION before the integer
//! division. All intermediates are 512-bit.

use crate::curve::{select_curve, AmplificationPair, Curve};
use crate::errors::{DomainError, MathError, SolverKind};
use crate::solver::{Convergence, DualCurveMath};
use crate::wide::WideMath;
use dualcurve_types::scales::{AMP_PRECISION, N_TOKENS};
use dualcurve_types::{Amplification, FixedPoint, U512};
use tracing::{trace, warn};

impl DualCurveMath {
    /// Compute the invariant D of `balances` under `amp`
    ///
    /// Returns zero for an empty pool. A pool with exactly one empty side
    /// is outside the curve's domain.
    pub fn compute_invariant(
        &self,
        balances: [FixedPoint; 2],
        amp: Amplification,
    ) -> Result<FixedPoint, MathError> {
        self.compute_invariant_detailed(balances, amp)
            .map(|convergence| convergence.value)
    }

    /// [`DualCurveMath::compute_invariant`] reporting the iteration count
    pub fn compute_invariant_detailed(
        &self,
        balances: [FixedPoint; 2],
        amp: Amplification,
    ) -> Result<Convergence, MathError> {
        let sum = balances[0].try_add(balances[1])?;
        if sum.is_zero() {
            return Ok(Convergence {
                value: FixedPoint::ZERO,
                iterations: 0,
            });
        }
        if let Some(index) = balances.iter().position(|b| b.is_zero()) {
            return Err(DomainError::ZeroBalance { index }.into());
        }

        let n = U512::from(N_TOKENS);
        let precision = U512::from(AMP_PRECISION);
        let extra = U512::from(FixedPoint::SCALE);
        let amp_times_n = U512::from(amp.raw()).wmul(n)?;
        let s = sum.to_wide();
        let tolerance = U512::from(self.settings().convergence_tolerance);
        let max_iterations = self.settings().max_iterations;

        // D² and P_D carry an extra 10^18 so truncating P_D cannot move D' by
        // more than a unit
        let product = balances[0]
            .to_wide()
            .wmul(n)?
            .wmul(balances[1].to_wide())?
            .wmul(n)?
            .wmul(extra)?;

        let mut previous = None;
        let mut invariant = s;
        for iteration in 1..=max_iterations {
            let p_d = product.wdiv(invariant)?;

            let numerator = precision
                .wmul(n)?
                .wmul(invariant)?
                .wmul(invariant)?
                .wmul(extra)?
                .wadd(amp_times_n.wmul(s)?.wmul(p_d)?)?;
            let denominator = precision
                .wmul(n.wadd(U512::one())?)?
                .wmul(invariant)?
                .wmul(extra)?
                .wadd(amp_times_n.wsub(precision)?.wmul(p_d)?)?;

            let next = numerator.wdiv(denominator)?;
            let delta = next.wdiff(invariant);

            if delta <= tolerance {
                trace!(iterations = iteration, "invariant converged");
                return Ok(Convergence {
                    value: FixedPoint::from_wide(next, "compute_invariant")?,
                    iterations: iteration,
                });
            }

            // rounding can leave Newton alternating between two estimates
            if previous.is_some_and(|earlier: U512| next.wdiff(earlier) <= tolerance) {
                let value = next.min(invariant);
                trace!(iterations = iteration, "invariant settled on a two-cycle");
                return Ok(Convergence {
                    value: FixedPoint::from_wide(value, "compute_invariant")?,
                    iterations: iteration,
                });
            }

            previous = Some(invariant);
            invariant = next;
        }

        let last_estimate = FixedPoint::from_wide(invariant, "compute_invariant")?;
        warn!(
            solver = %SolverKind::Invariant,
            iterations = max_iterations,
            %last_estimate,
            balance_0 = %balances[0],
            balance_1 = %balances[1],
            amp = %amp,
            "Invariant did not converge"
        );
        Err(MathError::ConvergenceFault {
            solver: SolverKind::Invariant,
            iterations: max_iterations,
            last_estimate,
        })
    }

    /// Invariant of `balances` expressed under the `target` curve
    ///
    /// Computed under the curve the balances sit on; when that differs from
    /// `target`, the result is carried across the kink through the anchor.
    pub fn invariant_for_curve(
        &self,
        balances: [FixedPoint; 2],
        amps: AmplificationPair,
        target: Curve,
    ) -> Result<FixedPoint, MathError> {
        let current = select_curve(balances);
        let invariant = self.compute_invariant(balances, amps.for_curve(current))?;
        if current == target {
            return Ok(invariant);
        }
        self.translate_invariant(amps.for_curve(current), amps.for_curve(target), invariant)
    }
}

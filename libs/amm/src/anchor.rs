//! Anchor solver for moving an invariant across the kink
//!
//! The anchor Z is the balance at which [Z, Z] satisfies the invariant for a
//! given amplification. It is the fixed point of
//!
//! ```text
//! Z' = (b + c/Z²) / 2,   b = D − D/(4·amp),   c = D³/(16·amp)
//! ```
//!
//! which is D/2 for every amplification. Both curves meet at the symmetric
//! point, so an invariant valid under one amplification is carried to the
//! other by evaluating the other curve at [Z, Z].

use crate::errors::{MathError, SolverKind};
use crate::solver::{Convergence, DualCurveMath};
use crate::wide::WideMath;
use dualcurve_types::scales::AMP_PRECISION;
use dualcurve_types::{Amplification, FixedPoint, U512};
use tracing::{debug, trace, warn};

impl DualCurveMath {
    /// Symmetric balance Z with [Z, Z] on the curve (amp, invariant)
    pub fn compute_anchor(
        &self,
        amp: Amplification,
        invariant: FixedPoint,
    ) -> Result<FixedPoint, MathError> {
        self.compute_anchor_detailed(amp, invariant)
            .map(|convergence| convergence.value)
    }

    /// [`DualCurveMath::compute_anchor`] reporting the iteration count
    pub fn compute_anchor_detailed(
        &self,
        amp: Amplification,
        invariant: FixedPoint,
    ) -> Result<Convergence, MathError> {
        if invariant.is_zero() {
            return Ok(Convergence {
                value: FixedPoint::ZERO,
                iterations: 0,
            });
        }

        let precision = U512::from(AMP_PRECISION);
        let amp = U512::from(amp.raw());
        let two = U512::from(2u8);
        let d = invariant.to_wide();
        let d_squared = d.wmul(d)?;

        let b = d.wsub(d.wmul(precision)?.wdiv(amp.wmul(U512::from(4u8))?)?)?;
        let c = d_squared
            .wmul(d)?
            .wmul(precision)?
            .wdiv(amp.wmul(U512::from(16u8))?)?;

        let tolerance = U512::from(self.settings().convergence_tolerance);
        let max_iterations = self.settings().max_iterations;

        let mut anchor = b.wadd(c.wdiv(d_squared)?)?.wdiv(two)?;
        for iteration in 1..=max_iterations {
            if anchor.is_zero() {
                // invariant below a few units: the anchor rounds to nothing
                return Ok(Convergence {
                    value: FixedPoint::ZERO,
                    iterations: iteration,
                });
            }

            let next = b.wadd(c.wdiv(anchor.wmul(anchor)?)?)?.wdiv(two)?;
            let delta = next.wdiff(anchor);
            anchor = next;

            if delta <= tolerance {
                trace!(iterations = iteration, "anchor converged");
                return Ok(Convergence {
                    value: FixedPoint::from_wide(anchor, "compute_anchor")?,
                    iterations: iteration,
                });
            }
        }

        let last_estimate = FixedPoint::from_wide(anchor, "compute_anchor")?;
        warn!(
            solver = %SolverKind::Anchor,
            iterations = max_iterations,
            %last_estimate,
            %invariant,
            "Anchor did not converge"
        );
        Err(MathError::ConvergenceFault {
            solver: SolverKind::Anchor,
            iterations: max_iterations,
            last_estimate,
        })
    }

    /// Carry an invariant valid under `from` to the equivalent one under `to`
    pub fn translate_invariant(
        &self,
        from: Amplification,
        to: Amplification,
        invariant: FixedPoint,
    ) -> Result<FixedPoint, MathError> {
        let anchor = self.compute_anchor(from, invariant)?;
        let translated = self.compute_invariant([anchor, anchor], to)?;
        debug!(
            %from,
            %to,
            before = %invariant,
            after = %translated,
            "translated invariant across the kink"
        );
        Ok(translated)
    }
}

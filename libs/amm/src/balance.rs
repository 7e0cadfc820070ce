//! Closed-form balance solver
//!
//! For two tokens the invariant is quadratic in the unknown balance x:
//!
//! ```text
//! x² + b·x + c = 0
//! b = S + D/(amp·n) − D
//! c = −D^(n+1) / (amp·n^(n+1)·P)
//! x = (−b + sqrt(b² − 4c)) / 2
//! ```
//!
//! where S and P are the sum and product of the other balances. `b` may be
//! negative, `c` never is positive, so the discriminant is at least `b²`.
//! `b` is carried as magnitude and sign; `c` at 10^36 scale so that the
//! integer square root lands back on 10^18.

use crate::errors::{DomainError, MathError};
use crate::solver::{validate_token_index, DualCurveMath};
use crate::wide::WideMath;
use dualcurve_types::scales::{AMP_PRECISION, N_TOKENS};
use dualcurve_types::{Amplification, FixedPoint, U512};

impl DualCurveMath {
    /// Solve for `balances[token_index]` given the invariant
    ///
    /// The current value of `balances[token_index]` is ignored.
    pub fn solve_balance(
        &self,
        balances: [FixedPoint; 2],
        amp: Amplification,
        invariant: FixedPoint,
        token_index: usize,
    ) -> Result<FixedPoint, MathError> {
        validate_token_index(token_index)?;
        let other = 1 - token_index;
        if balances[other].is_zero() {
            return Err(DomainError::ZeroBalance { index: other }.into());
        }

        let n = U512::from(N_TOKENS);
        let precision = U512::from(AMP_PRECISION);
        let amp = U512::from(amp.raw());
        let d = invariant.to_wide();
        let sum = balances[other].to_wide();
        let product = balances[other].to_wide();

        let d_over_ann = d.wmul(precision)?.wdiv(amp.wmul(n)?)?;
        let positive = sum.wadd(d_over_ann)?;
        let (b, b_negative) = if positive >= d {
            (positive.wsub(d)?, false)
        } else {
            (d.wsub(positive)?, true)
        };

        let n_pow = n.wmul(n)?.wmul(n)?;
        let c = d
            .wmul(d)?
            .wmul(d)?
            .wmul(precision)?
            .wdiv(amp.wmul(n_pow)?.wmul(product)?)?;

        let discriminant = b.wmul(b)?.wadd(c.wmul(U512::from(4u8))?)?;
        let root = discriminant.integer_sqrt();

        let doubled = if b_negative {
            root.wadd(b)?
        } else {
            root.checked_sub(b).ok_or(DomainError::NegativeResult {
                operation: "solve_balance",
            })?
        };

        Ok(FixedPoint::from_wide(
            doubled / U512::from(2u8),
            "solve_balance",
        )?)
    }
}

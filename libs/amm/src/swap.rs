//! Swap quotes across both curves
//!
//! Quotes are fee-free; the pool facade takes the swap fee from the input
//! before quoting out-given-in and adds it after quoting in-given-out.

use crate::curve::{select_curve, AmplificationPair};
use crate::errors::{DomainError, MathError};
use crate::solver::{validate_token_pair, DualCurveMath};
use dualcurve_types::FixedPoint;

impl DualCurveMath {
    /// Amount of `index_out` received for exactly `amount_in` of `index_in`
    pub fn quote_out_given_in(
        &self,
        balances: [FixedPoint; 2],
        amps: AmplificationPair,
        index_in: usize,
        index_out: usize,
        amount_in: FixedPoint,
    ) -> Result<FixedPoint, MathError> {
        validate_token_pair(index_in, index_out)?;
        if amount_in.is_zero() {
            return Err(DomainError::ZeroAmount.into());
        }

        let curve_in = select_curve(balances);
        let invariant = self.compute_invariant(balances, amps.for_curve(curve_in))?;

        let mut new_balances = balances;
        new_balances[index_in] = balances[index_in].try_add(amount_in)?;

        let resolved =
            self.resolve_balance(new_balances, amps, curve_in, invariant, index_out)?;

        Ok(balances[index_out]
            .checked_sub(resolved.balance)
            .ok_or(DomainError::NegativeResult {
                operation: "quote_out_given_in",
            })?)
    }

    /// Amount of `index_in` required to receive exactly `amount_out` of `index_out`
    pub fn quote_in_given_out(
        &self,
        balances: [FixedPoint; 2],
        amps: AmplificationPair,
        index_in: usize,
        index_out: usize,
        amount_out: FixedPoint,
    ) -> Result<FixedPoint, MathError> {
        validate_token_pair(index_in, index_out)?;
        if amount_out.is_zero() {
            return Err(DomainError::ZeroAmount.into());
        }
        if amount_out >= balances[index_out] {
            return Err(DomainError::InsufficientLiquidity {
                index: index_out,
                requested: amount_out,
                available: balances[index_out],
            }
            .into());
        }

        let curve_in = select_curve(balances);
        let invariant = self.compute_invariant(balances, amps.for_curve(curve_in))?;

        let mut new_balances = balances;
        new_balances[index_out] = balances[index_out].try_sub(amount_out)?;

        let resolved = self.resolve_balance(new_balances, amps, curve_in, invariant, index_in)?;

        Ok(resolved
            .balance
            .checked_sub(balances[index_in])
            .ok_or(DomainError::NegativeResult {
                operation: "quote_in_given_out",
            })?)
    }
}

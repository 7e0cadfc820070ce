//! Pool trait definitions for a unified two-token interface

use crate::errors::MathError;
use crate::pool::DualCurvePool;
use crate::solver::validate_token_index;
use dualcurve_types::FixedPoint;

/// Unified pool interface for routing and quoting
pub trait AmmPool {
    /// Calculate output amount for `amount_in` of `token_in`
    fn get_amount_out(
        &self,
        token_in: usize,
        amount_in: FixedPoint,
    ) -> Result<FixedPoint, MathError>;

    /// Calculate required input for `amount_out` of `token_out`
    fn get_amount_in(
        &self,
        token_out: usize,
        amount_out: FixedPoint,
    ) -> Result<FixedPoint, MathError>;

    /// Get current balances
    fn get_liquidity(&self) -> (FixedPoint, FixedPoint);

    /// Get swap fee as a fraction of one
    fn get_swap_fee(&self) -> FixedPoint;
}

impl AmmPool for DualCurvePool {
    fn get_amount_out(
        &self,
        token_in: usize,
        amount_in: FixedPoint,
    ) -> Result<FixedPoint, MathError> {
        validate_token_index(token_in)?;
        self.swap_given_in(token_in, 1 - token_in, amount_in)
    }

    fn get_amount_in(
        &self,
        token_out: usize,
        amount_out: FixedPoint,
    ) -> Result<FixedPoint, MathError> {
        validate_token_index(token_out)?;
        self.swap_given_out(1 - token_out, token_out, amount_out)
    }

    fn get_liquidity(&self) -> (FixedPoint, FixedPoint) {
        let [balance_0, balance_1] = self.balances();
        (balance_0, balance_1)
    }

    fn get_swap_fee(&self) -> FixedPoint {
        self.swap_fee()
    }
}

//! Stateful two-token pool over the dual-curve math
//!
//! Balances are held in native token units. Every operation upscales them by
//! the per-token rates, runs the pure math in [`DualCurveMath`] and scales
//! the result back: amounts paid out round down, amounts paid in round up.

use crate::curve::{select_curve, AmplificationPair, Curve, InvariantPair};
use crate::errors::{DomainError, MathError};
use crate::solver::{validate_fee, validate_token_index, validate_token_pair, DualCurveMath};
use dualcurve_config::MathConfig;
use dualcurve_types::{FixedPoint, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Point-in-time view of a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// Curve governing the rate-scaled balances
    pub curve: Curve,
    pub balances: [FixedPoint; 2],
    pub amplification: AmplificationPair,
    pub invariants: InvariantPair,
    pub total_supply: FixedPoint,
    pub swap_fee: FixedPoint,

    /// Active invariant per BPT, `None` before initialization
    pub bpt_rate: Option<FixedPoint>,
}

/// Dual-curve StableSwap pool state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualCurvePool {
    balances: [FixedPoint; 2],
    amplification: AmplificationPair,
    swap_fee: FixedPoint,
    total_supply: FixedPoint,
    rates: [FixedPoint; 2],
    math: DualCurveMath,
}

impl DualCurvePool {
    pub fn new(
        balances: [FixedPoint; 2],
        amplification: AmplificationPair,
        swap_fee: FixedPoint,
        total_supply: FixedPoint,
    ) -> Result<Self, MathError> {
        validate_fee(swap_fee)?;
        Ok(Self {
            balances,
            amplification,
            swap_fee,
            total_supply,
            rates: [FixedPoint::ONE; 2],
            math: DualCurveMath::default(),
        })
    }

    /// Build a pool from loaded settings
    pub fn from_config(
        config: &MathConfig,
        balances: [FixedPoint; 2],
        total_supply: FixedPoint,
    ) -> Result<Self, MathError> {
        config.pool.validate()?;
        let (curve_1, curve_2) = config.pool.amplifications()?;

        let pool = Self::new(
            balances,
            AmplificationPair::new(curve_1, curve_2),
            config.pool.swap_fee,
            total_supply,
        )?
        .with_math(DualCurveMath::new(config.solver)?)
        .with_rates(config.pool.rates)?;

        debug!(
            amplification_1 = %curve_1,
            amplification_2 = %curve_2,
            swap_fee = %pool.swap_fee,
            "Pool built from config"
        );
        Ok(pool)
    }

    /// Replace the per-token rates
    pub fn with_rates(mut self, rates: [FixedPoint; 2]) -> Result<Self, MathError> {
        if rates.iter().any(|rate| rate.is_zero()) {
            return Err(ValidationError::Zero { name: "rate" }.into());
        }
        self.rates = rates;
        Ok(self)
    }

    pub fn with_math(mut self, math: DualCurveMath) -> Self {
        self.math = math;
        self
    }

    pub fn balances(&self) -> [FixedPoint; 2] {
        self.balances
    }

    pub fn amplification(&self) -> AmplificationPair {
        self.amplification
    }

    pub fn swap_fee(&self) -> FixedPoint {
        self.swap_fee
    }

    pub fn total_supply(&self) -> FixedPoint {
        self.total_supply
    }

    pub fn rates(&self) -> [FixedPoint; 2] {
        self.rates
    }

    pub fn math(&self) -> &DualCurveMath {
        &self.math
    }

    /// Balances multiplied by their rates
    pub fn scaled_balances(&self) -> Result<[FixedPoint; 2], MathError> {
        self.upscale_all(self.balances)
    }

    pub fn current_curve(&self) -> Result<Curve, MathError> {
        Ok(select_curve(self.scaled_balances()?))
    }

    /// Invariant of the scaled balances under both curves
    pub fn current_invariants(&self) -> Result<InvariantPair, MathError> {
        let balances = self.scaled_balances()?;
        Ok(InvariantPair::new(
            self.math
                .invariant_for_curve(balances, self.amplification, Curve::Curve1)?,
            self.math
                .invariant_for_curve(balances, self.amplification, Curve::Curve2)?,
        ))
    }

    pub fn snapshot(&self) -> Result<PoolSnapshot, MathError> {
        let curve = self.current_curve()?;
        let invariants = self.current_invariants()?;
        let bpt_rate = if self.total_supply.is_zero() {
            None
        } else {
            Some(invariants.for_curve(curve).div_down(self.total_supply)?)
        };

        Ok(PoolSnapshot {
            curve,
            balances: self.balances,
            amplification: self.amplification,
            invariants,
            total_supply: self.total_supply,
            swap_fee: self.swap_fee,
            bpt_rate,
        })
    }

    /// Tokens out for exactly `amount_in`, fee taken from the input
    pub fn swap_given_in(
        &self,
        index_in: usize,
        index_out: usize,
        amount_in: FixedPoint,
    ) -> Result<FixedPoint, MathError> {
        validate_token_pair(index_in, index_out)?;
        let fee = amount_in.mul_up(self.swap_fee)?;
        let net_in = amount_in.try_sub(fee)?;

        let amount_out = self.math.quote_out_given_in(
            self.scaled_balances()?,
            self.amplification,
            index_in,
            index_out,
            self.upscale(index_in, net_in)?,
        )?;
        self.downscale_down(index_out, amount_out)
    }

    /// Tokens in, fee included, for exactly `amount_out`
    pub fn swap_given_out(
        &self,
        index_in: usize,
        index_out: usize,
        amount_out: FixedPoint,
    ) -> Result<FixedPoint, MathError> {
        validate_token_pair(index_in, index_out)?;
        let amount_in = self.math.quote_in_given_out(
            self.scaled_balances()?,
            self.amplification,
            index_in,
            index_out,
            self.upscale(index_out, amount_out)?,
        )?;
        let amount_in = self.downscale_up(index_in, amount_in)?;
        Ok(amount_in.div_up(self.swap_fee.complement())?)
    }

    /// Quote a swap and move the balances; the fee stays in the pool
    pub fn apply_swap_given_in(
        &mut self,
        index_in: usize,
        index_out: usize,
        amount_in: FixedPoint,
    ) -> Result<FixedPoint, MathError> {
        let amount_out = self.swap_given_in(index_in, index_out, amount_in)?;

        let mut balances = self.balances;
        balances[index_in] = balances[index_in].try_add(amount_in)?;
        balances[index_out] = balances[index_out].try_sub(amount_out)?;
        self.balances = balances;

        debug!(index_in, %amount_in, index_out, %amount_out, "Applied swap");
        Ok(amount_out)
    }

    /// Seed an empty pool; mints BPT equal to the starting invariant
    pub fn initialize(&mut self, amounts: [FixedPoint; 2]) -> Result<FixedPoint, MathError> {
        if !self.total_supply.is_zero() {
            return Err(DomainError::AlreadyInitialized {
                total_supply: self.total_supply,
            }
            .into());
        }

        let scaled = self.upscale_all(amounts)?;
        let curve = select_curve(scaled);
        let invariant = self
            .math
            .compute_invariant(scaled, self.amplification.for_curve(curve))?;
        if invariant.is_zero() {
            return Err(DomainError::ZeroInvariant.into());
        }

        self.balances = amounts;
        self.total_supply = invariant;
        debug!(%curve, bpt_out = %invariant, "Initialized pool");
        Ok(invariant)
    }

    /// BPT minted for depositing exactly `amounts_in`
    pub fn join_exact_tokens_in(
        &self,
        amounts_in: [FixedPoint; 2],
    ) -> Result<FixedPoint, MathError> {
        self.math.bpt_out_given_exact_tokens_in(
            self.scaled_balances()?,
            self.amplification,
            self.upscale_all(amounts_in)?,
            self.total_supply,
            self.current_invariants()?,
            self.swap_fee,
        )
    }

    /// BPT burned for withdrawing exactly `amounts_out`
    pub fn exit_exact_tokens_out(
        &self,
        amounts_out: [FixedPoint; 2],
    ) -> Result<FixedPoint, MathError> {
        self.math.bpt_in_given_exact_tokens_out(
            self.scaled_balances()?,
            self.amplification,
            self.upscale_all(amounts_out)?,
            self.total_supply,
            self.current_invariants()?,
            self.swap_fee,
        )
    }

    /// Tokens of `token_index` to deposit for exactly `bpt_out`
    pub fn join_single_token(
        &self,
        token_index: usize,
        bpt_out: FixedPoint,
    ) -> Result<FixedPoint, MathError> {
        validate_token_index(token_index)?;
        let amount_in = self.math.token_in_given_exact_bpt_out(
            token_index,
            self.scaled_balances()?,
            self.amplification,
            bpt_out,
            self.total_supply,
            self.current_invariants()?,
            self.swap_fee,
        )?;
        self.downscale_up(token_index, amount_in)
    }

    /// Tokens of `token_index` received for burning exactly `bpt_in`
    pub fn exit_single_token(
        &self,
        token_index: usize,
        bpt_in: FixedPoint,
    ) -> Result<FixedPoint, MathError> {
        validate_token_index(token_index)?;
        let amount_out = self.math.token_out_given_exact_bpt_in(
            token_index,
            self.scaled_balances()?,
            self.amplification,
            bpt_in,
            self.total_supply,
            self.current_invariants()?,
            self.swap_fee,
        )?;
        self.downscale_down(token_index, amount_out)
    }

    /// Deposit `amounts_in` and mint the quoted BPT
    pub fn apply_join(&mut self, amounts_in: [FixedPoint; 2]) -> Result<FixedPoint, MathError> {
        let bpt_out = self.join_exact_tokens_in(amounts_in)?;
        let mut balances = self.balances;
        for (balance, amount) in balances.iter_mut().zip(amounts_in) {
            *balance = balance.try_add(amount)?;
        }
        self.total_supply = self.total_supply.try_add(bpt_out)?;
        self.balances = balances;

        debug!(%bpt_out, total_supply = %self.total_supply, "Applied join");
        Ok(bpt_out)
    }

    /// Withdraw `amounts_out` and burn the quoted BPT
    pub fn apply_exit(&mut self, amounts_out: [FixedPoint; 2]) -> Result<FixedPoint, MathError> {
        let bpt_in = self.exit_exact_tokens_out(amounts_out)?;
        if bpt_in > self.total_supply {
            return Err(DomainError::ExcessiveBptIn {
                requested: bpt_in,
                total_supply: self.total_supply,
            }
            .into());
        }

        let mut balances = self.balances;
        for (balance, amount) in balances.iter_mut().zip(amounts_out) {
            *balance = balance.try_sub(amount)?;
        }
        self.total_supply = self.total_supply.try_sub(bpt_in)?;
        self.balances = balances;

        debug!(%bpt_in, total_supply = %self.total_supply, "Applied exit");
        Ok(bpt_in)
    }

    fn upscale(&self, index: usize, amount: FixedPoint) -> Result<FixedPoint, MathError> {
        Ok(amount.mul_down(self.rates[index])?)
    }

    fn upscale_all(&self, amounts: [FixedPoint; 2]) -> Result<[FixedPoint; 2], MathError> {
        Ok([self.upscale(0, amounts[0])?, self.upscale(1, amounts[1])?])
    }

    fn downscale_down(&self, index: usize, amount: FixedPoint) -> Result<FixedPoint, MathError> {
        Ok(amount.div_down(self.rates[index])?)
    }

    fn downscale_up(&self, index: usize, amount: FixedPoint) -> Result<FixedPoint, MathError> {
        Ok(amount.div_up(self.rates[index])?)
    }
}

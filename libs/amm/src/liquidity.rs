//! BPT amounts for joins and exits
//!
//! Only the non-proportional part of a deposit or withdrawal pays the swap
//! fee. For exact-token operations the proportional share is taken from the
//! balance-weighted average of the per-token ratios; for exact-BPT
//! operations from the token's current weight.
//!
//! The exact-token operations compare the new invariant against the current
//! invariant of the curve the NEW balances sit on. The exact-BPT operations
//! scale the invariant of the curve the pool sits on now and let the
//! resolver handle a crossing.

use crate::curve::{select_curve, AmplificationPair, InvariantPair};
use crate::errors::{DomainError, MathError};
use crate::solver::{validate_fee, validate_token_index, DualCurveMath};
use dualcurve_types::FixedPoint;

const ONE: FixedPoint = FixedPoint::ONE;

fn total_balance(balances: [FixedPoint; 2]) -> Result<FixedPoint, MathError> {
    let sum = balances[0].try_add(balances[1])?;
    if sum.is_zero() {
        return Err(DomainError::ZeroTotalBalance.into());
    }
    Ok(sum)
}

fn require_supply(total_supply: FixedPoint) -> Result<(), DomainError> {
    if total_supply.is_zero() {
        return Err(DomainError::ZeroTotalSupply);
    }
    Ok(())
}

fn require_invariant(invariant: FixedPoint) -> Result<FixedPoint, DomainError> {
    if invariant.is_zero() {
        return Err(DomainError::ZeroInvariant);
    }
    Ok(invariant)
}

impl DualCurveMath {
    /// BPT minted for depositing exactly `amounts_in`
    pub fn bpt_out_given_exact_tokens_in(
        &self,
        balances: [FixedPoint; 2],
        amps: AmplificationPair,
        amounts_in: [FixedPoint; 2],
        total_supply: FixedPoint,
        current_invariants: InvariantPair,
        swap_fee: FixedPoint,
    ) -> Result<FixedPoint, MathError> {
        validate_fee(swap_fee)?;
        require_supply(total_supply)?;
        let sum = total_balance(balances)?;

        let mut ratios = [FixedPoint::ZERO; 2];
        let mut invariant_ratio_with_fees = FixedPoint::ZERO;
        for i in 0..2 {
            if balances[i].is_zero() {
                return Err(DomainError::ZeroBalance { index: i }.into());
            }
            let weight = balances[i].div_down(sum)?;
            ratios[i] = balances[i].try_add(amounts_in[i])?.div_down(balances[i])?;
            invariant_ratio_with_fees =
                invariant_ratio_with_fees.try_add(ratios[i].mul_down(weight)?)?;
        }

        let mut new_balances = balances;
        for i in 0..2 {
            let amount_in = if ratios[i] > invariant_ratio_with_fees {
                let non_taxable =
                    balances[i].mul_down(invariant_ratio_with_fees.saturating_sub(ONE))?;
                let taxable = amounts_in[i].saturating_sub(non_taxable);
                non_taxable.try_add(taxable.mul_down(swap_fee.complement())?)?
            } else {
                amounts_in[i]
            };
            new_balances[i] = balances[i].try_add(amount_in)?;
        }

        let curve = select_curve(new_balances);
        let new_invariant = self.compute_invariant(new_balances, amps.for_curve(curve))?;
        let current_invariant = require_invariant(current_invariants.for_curve(curve))?;

        let invariant_ratio = new_invariant.div_down(current_invariant)?;
        if invariant_ratio > ONE {
            Ok(total_supply.mul_down(invariant_ratio.try_sub(ONE)?)?)
        } else {
            Ok(FixedPoint::ZERO)
        }
    }

    /// BPT burned for withdrawing exactly `amounts_out`
    pub fn bpt_in_given_exact_tokens_out(
        &self,
        balances: [FixedPoint; 2],
        amps: AmplificationPair,
        amounts_out: [FixedPoint; 2],
        total_supply: FixedPoint,
        current_invariants: InvariantPair,
        swap_fee: FixedPoint,
    ) -> Result<FixedPoint, MathError> {
        validate_fee(swap_fee)?;
        require_supply(total_supply)?;
        let sum = total_balance(balances)?;

        let mut ratios = [FixedPoint::ZERO; 2];
        let mut invariant_ratio_without_fees = FixedPoint::ZERO;
        for i in 0..2 {
            if amounts_out[i] > balances[i] {
                return Err(DomainError::InsufficientLiquidity {
                    index: i,
                    requested: amounts_out[i],
                    available: balances[i],
                }
                .into());
            }
            if balances[i].is_zero() {
                return Err(DomainError::ZeroBalance { index: i }.into());
            }
            let weight = balances[i].div_down(sum)?;
            ratios[i] = balances[i].try_sub(amounts_out[i])?.div_down(balances[i])?;
            invariant_ratio_without_fees =
                invariant_ratio_without_fees.try_add(ratios[i].mul_down(weight)?)?;
        }

        let mut new_balances = balances;
        for i in 0..2 {
            let amount_out = if invariant_ratio_without_fees > ratios[i] {
                let non_taxable = balances[i].mul_down(invariant_ratio_without_fees.complement())?;
                let taxable = amounts_out[i].saturating_sub(non_taxable);
                non_taxable.try_add(taxable.div_down(swap_fee.complement())?)?
            } else {
                amounts_out[i]
            };
            new_balances[i] = balances[i].checked_sub(amount_out).ok_or(
                DomainError::InsufficientLiquidity {
                    index: i,
                    requested: amount_out,
                    available: balances[i],
                },
            )?;
        }

        let curve = select_curve(new_balances);
        let new_invariant = self.compute_invariant(new_balances, amps.for_curve(curve))?;
        let current_invariant = require_invariant(current_invariants.for_curve(curve))?;

        let invariant_ratio = new_invariant.div_down(current_invariant)?;
        if invariant_ratio < ONE {
            Ok(total_supply.mul_down(invariant_ratio.complement())?)
        } else {
            Ok(FixedPoint::ZERO)
        }
    }

    /// Amount of `token_index` to deposit to mint exactly `bpt_out`
    #[allow(clippy::too_many_arguments)]
    pub fn token_in_given_exact_bpt_out(
        &self,
        token_index: usize,
        balances: [FixedPoint; 2],
        amps: AmplificationPair,
        bpt_out: FixedPoint,
        total_supply: FixedPoint,
        current_invariants: InvariantPair,
        swap_fee: FixedPoint,
    ) -> Result<FixedPoint, MathError> {
        validate_token_index(token_index)?;
        validate_fee(swap_fee)?;
        require_supply(total_supply)?;
        if bpt_out.is_zero() {
            return Err(DomainError::ZeroAmount.into());
        }
        let sum = total_balance(balances)?;

        let curve = select_curve(balances);
        let current_invariant = require_invariant(current_invariants.for_curve(curve))?;
        let invariant_ratio = total_supply.try_add(bpt_out)?.div_down(total_supply)?;
        let new_invariant = current_invariant.mul_down(invariant_ratio)?;

        let resolved = self.resolve_balance(balances, amps, curve, new_invariant, token_index)?;
        // rounding can leave the solved balance a unit below the current one
        let amount_in_without_fee = resolved.balance.saturating_sub(balances[token_index]);

        let weight = balances[token_index].div_down(sum)?;
        let taxable = amount_in_without_fee.mul_down(weight.complement())?;
        let non_taxable = amount_in_without_fee.try_sub(taxable)?;

        Ok(non_taxable.try_add(taxable.div_down(swap_fee.complement())?)?)
    }

    /// Amount of `token_index` received for burning exactly `bpt_in`
    #[allow(clippy::too_many_arguments)]
    pub fn token_out_given_exact_bpt_in(
        &self,
        token_index: usize,
        balances: [FixedPoint; 2],
        amps: AmplificationPair,
        bpt_in: FixedPoint,
        total_supply: FixedPoint,
        current_invariants: InvariantPair,
        swap_fee: FixedPoint,
    ) -> Result<FixedPoint, MathError> {
        validate_token_index(token_index)?;
        validate_fee(swap_fee)?;
        require_supply(total_supply)?;
        if bpt_in.is_zero() {
            return Err(DomainError::ZeroAmount.into());
        }
        if bpt_in > total_supply {
            return Err(DomainError::ExcessiveBptIn {
                requested: bpt_in,
                total_supply,
            }
            .into());
        }
        let sum = total_balance(balances)?;

        let curve = select_curve(balances);
        let current_invariant = require_invariant(current_invariants.for_curve(curve))?;
        let invariant_ratio = total_supply.try_sub(bpt_in)?.div_down(total_supply)?;
        let new_invariant = current_invariant.mul_down(invariant_ratio)?;

        let resolved = self.resolve_balance(balances, amps, curve, new_invariant, token_index)?;
        let amount_out_without_fee = balances[token_index].saturating_sub(resolved.balance);

        let weight = balances[token_index].div_down(sum)?;
        let taxable = amount_out_without_fee.mul_down(weight.complement())?;
        let non_taxable = amount_out_without_fee.try_sub(taxable)?;

        Ok(non_taxable.try_add(taxable.mul_down(swap_fee.complement())?)?)
    }
}

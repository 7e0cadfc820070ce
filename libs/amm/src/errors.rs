//! Error taxonomy for the pool math
//!
//! [`DomainError`] covers inputs outside the valid region of the curves.
//! [`MathError`] wraps it together with solver convergence faults and
//! fixed-point failures. Precision loss from rounding is never an error.

use dualcurve_types::{FixedPoint, FixedPointError, ValidationError};
use std::fmt;
use thiserror::Error;

/// Inputs outside the mathematically valid region
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Total pool balance is zero")]
    ZeroTotalBalance,

    #[error("Balance of token {index} is zero")]
    ZeroBalance { index: usize },

    #[error("Amount must be positive")]
    ZeroAmount,

    #[error("Token index {index} out of range for a two-token pool")]
    InvalidTokenIndex { index: usize },

    #[error("Token {index} cannot be swapped for itself")]
    IdenticalTokens { index: usize },

    /// Requested output meets or exceeds the pool balance
    #[error(
        "Insufficient liquidity: requested {requested} of token {index}, \
         pool holds {available}"
    )]
    InsufficientLiquidity {
        index: usize,
        requested: FixedPoint,
        available: FixedPoint,
    },

    #[error("{operation} would produce a negative amount")]
    NegativeResult { operation: &'static str },

    #[error("Current invariant is zero")]
    ZeroInvariant,

    #[error("BPT total supply is zero")]
    ZeroTotalSupply,

    #[error("BPT in {requested} exceeds total supply {total_supply}")]
    ExcessiveBptIn {
        requested: FixedPoint,
        total_supply: FixedPoint,
    },

    #[error("Swap fee {fee} must be below 1")]
    FeeOutOfRange { fee: FixedPoint },

    #[error("Pool already initialized with BPT supply {total_supply}")]
    AlreadyInitialized { total_supply: FixedPoint },
}

/// Iterative solver that can fail to converge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverKind {
    Invariant,
    Anchor,
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverKind::Invariant => write!(f, "invariant"),
            SolverKind::Anchor => write!(f, "anchor"),
        }
    }
}

/// Errors returned by every pool math operation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MathError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// The iteration cap was reached before the tolerance was met.
    /// `last_estimate` is the value the solver stopped at.
    #[error(
        "{solver} solver did not converge after {iterations} iterations \
         (last estimate {last_estimate})"
    )]
    ConvergenceFault {
        solver: SolverKind,
        iterations: u32,
        last_estimate: FixedPoint,
    },

    #[error("Arithmetic error: {0}")]
    Arithmetic(#[from] FixedPointError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] ValidationError),
}

impl MathError {
    pub fn is_convergence_fault(&self) -> bool {
        matches!(self, MathError::ConvergenceFault { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MathError::from(DomainError::InsufficientLiquidity {
            index: 1,
            requested: FixedPoint::from_integer(12),
            available: FixedPoint::from_integer(12),
        });
        assert_eq!(
            err.to_string(),
            "Domain error: Insufficient liquidity: requested 12 of token 1, pool holds 12"
        );

        let fault = MathError::ConvergenceFault {
            solver: SolverKind::Anchor,
            iterations: 255,
            last_estimate: FixedPoint::ONE,
        };
        assert!(fault.is_convergence_fault());
        assert_eq!(
            fault.to_string(),
            "anchor solver did not converge after 255 iterations (last estimate 1)"
        );
    }
}

//! Entry point shared by every solver and engine

use crate::errors::DomainError;
use dualcurve_config::SolverSettings;
use dualcurve_types::{FixedPoint, ValidationError};

/// Result of an iterative solve together with the work it took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Convergence {
    pub value: FixedPoint,
    pub iterations: u32,
}

/// Dual-curve StableSwap math
///
/// Holds only the solver calibration, so it is cheap to clone and safe to
/// share between threads. Every operation is a pure function of its
/// arguments; the implementations live in the per-component modules
/// ([`crate::invariant`], [`crate::balance`], [`crate::anchor`],
/// [`crate::resolver`], [`crate::swap`], [`crate::liquidity`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DualCurveMath {
    settings: SolverSettings,
}

impl DualCurveMath {
    /// Engine with the given calibration; a zero iteration cap is rejected
    pub fn new(settings: SolverSettings) -> Result<Self, ValidationError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }
}

pub(crate) fn validate_token_index(index: usize) -> Result<(), DomainError> {
    if index > 1 {
        return Err(DomainError::InvalidTokenIndex { index });
    }
    Ok(())
}

pub(crate) fn validate_token_pair(index_in: usize, index_out: usize) -> Result<(), DomainError> {
    validate_token_index(index_in)?;
    validate_token_index(index_out)?;
    if index_in == index_out {
        return Err(DomainError::IdenticalTokens { index: index_in });
    }
    Ok(())
}

pub(crate) fn validate_fee(fee: FixedPoint) -> Result<(), DomainError> {
    if fee >= FixedPoint::ONE {
        return Err(DomainError::FeeOutOfRange { fee });
    }
    Ok(())
}

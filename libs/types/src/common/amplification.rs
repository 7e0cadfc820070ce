//! Amplification parameter carried at [`AMP_PRECISION`]
//!
//! Pools are configured with a human value (e.g. 450). The solvers work on the
//! raw value, 1000 times larger, so fractional amplification survives ramping
//! performed outside this workspace.

use crate::common::errors::ValidationError;
use crate::common::scales::{AMP_PRECISION, MAX_AMP, MIN_AMP};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Amplification parameter in raw units (human value * 1000)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Amplification(u64);

impl Amplification {
    /// Smallest raw value accepted
    pub const MIN_RAW: u64 = MIN_AMP * AMP_PRECISION;

    /// Largest raw value accepted
    pub const MAX_RAW: u64 = MAX_AMP * AMP_PRECISION;

    /// Create from a raw value, validating the pool range
    pub fn from_raw(raw: u64) -> Result<Self, ValidationError> {
        if !(Self::MIN_RAW..=Self::MAX_RAW).contains(&raw) {
            return Err(ValidationError::ValueOutOfRange {
                name: "amplification",
                value: raw,
                min: Self::MIN_RAW,
                max: Self::MAX_RAW,
            });
        }
        Ok(Self(raw))
    }

    /// Create from the human value a pool is deployed with
    ///
    /// # Examples
    /// ```
    /// use dualcurve_types::Amplification;
    ///
    /// let amp = Amplification::from_human(450).unwrap();
    /// assert_eq!(amp.raw(), 450_000);
    /// ```
    pub fn from_human(value: u64) -> Result<Self, ValidationError> {
        let raw = value
            .checked_mul(AMP_PRECISION)
            .ok_or(ValidationError::ValueOutOfRange {
                name: "amplification",
                value,
                min: MIN_AMP,
                max: MAX_AMP,
            })?;
        Self::from_raw(raw)
    }

    /// Raw value at AMP_PRECISION
    pub fn raw(self) -> u64 {
        self.0
    }

    /// Human value, for display only
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / AMP_PRECISION as f64
    }
}

impl TryFrom<u64> for Amplification {
    type Error = ValidationError;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

impl From<Amplification> for u64 {
    fn from(amp: Amplification) -> Self {
        amp.0
    }
}

impl fmt::Display for Amplification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / AMP_PRECISION;
        let fraction = self.0 % AMP_PRECISION;
        if fraction == 0 {
            write!(f, "{}", whole)
        } else {
            write!(f, "{}.{:03}", whole, fraction)
        }
    }
}

//! 18-decimal fixed-point arithmetic for pool math
//!
//! Token amounts, invariants, fees and share supply are stored as unsigned
//! 256-bit integers scaled by 10^18. Products and quotients are formed in
//! 512 bits and narrowed back, so every operation either returns an exact
//! scaled result (rounded in the documented direction) or a
//! [`FixedPointError`].
//!
//! ## Design Principles
//!
//! - **No Precision Loss**: values are scaled integers; rounding happens only on division
//! - **Overflow Protection**: checked arithmetic with explicit error values
//! - **Explicit Rounding**: `_down` variants truncate, `_up` variants round away from zero
//! - **Transparency**: floating point appears only at display and test boundaries

use crate::common::errors::FixedPointError;
use crate::common::scales::{FIXED_POINT_DECIMALS, FIXED_POINT_SCALE};
use primitive_types::{U256, U512};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unsigned fixed-point value with 18 decimal places
///
/// Examples:
/// - 1.0 = FixedPoint(1_000_000_000_000_000_000)
/// - 0.01 = FixedPoint(10_000_000_000_000_000)
/// - 1e-18 = FixedPoint(1), the smallest representable increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FixedPoint(U256);

impl FixedPoint {
    /// Scale factor for 18 decimal places
    pub const SCALE: u128 = FIXED_POINT_SCALE;

    /// Zero
    pub const ZERO: Self = Self(U256([0, 0, 0, 0]));

    /// One (1.0)
    pub const ONE: Self = Self(U256([1_000_000_000_000_000_000, 0, 0, 0]));

    /// Two (2.0)
    pub const TWO: Self = Self(U256([2_000_000_000_000_000_000, 0, 0, 0]));

    /// Smallest representable increment (1e-18)
    pub const EPSILON: Self = Self(U256([1, 0, 0, 0]));

    /// Largest representable value
    pub const MAX: Self = Self(U256::MAX);

    /// Create from a decimal string with exact parsing
    ///
    /// This is the primary constructor for external data (configuration,
    /// fixtures, user input). Scientific notation is accepted. Digits beyond
    /// the 18th decimal are truncated toward zero.
    ///
    /// # Examples
    /// ```
    /// use dualcurve_types::FixedPoint;
    ///
    /// let fee = FixedPoint::from_decimal_str("0.01").unwrap();
    /// assert_eq!(fee.raw().as_u128(), 10_000_000_000_000_000);
    /// ```
    pub fn from_decimal_str(s: &str) -> Result<Self, FixedPointError> {
        let trimmed = s.trim();
        let parsed = if trimmed.contains(|c| c == 'e' || c == 'E') {
            Decimal::from_scientific(trimmed)
        } else {
            Decimal::from_str(trimmed)
        };
        let decimal = parsed.map_err(|_| FixedPointError::InvalidDecimal {
            input: s.to_string(),
        })?;

        Self::from_decimal(decimal).map_err(|e| match e {
            FixedPointError::Negative { .. } => FixedPointError::Negative {
                input: s.to_string(),
            },
            other => other,
        })
    }

    /// Create from a `Decimal`, truncating digits beyond 18 decimals
    pub fn from_decimal(decimal: Decimal) -> Result<Self, FixedPointError> {
        if decimal.is_sign_negative() && !decimal.is_zero() {
            return Err(FixedPointError::Negative {
                input: decimal.to_string(),
            });
        }

        let mantissa = U256::from(decimal.mantissa().unsigned_abs());
        let scale = decimal.scale();

        let raw = if scale <= FIXED_POINT_DECIMALS {
            let factor = U256::exp10((FIXED_POINT_DECIMALS - scale) as usize);
            mantissa
                .checked_mul(factor)
                .ok_or(FixedPointError::Overflow {
                    operation: "from_decimal",
                })?
        } else {
            mantissa / U256::exp10((scale - FIXED_POINT_DECIMALS) as usize)
        };

        Ok(Self(raw))
    }

    /// Create from a whole number of tokens
    pub fn from_integer(value: u64) -> Self {
        // u64 * 10^18 < 2^128, no overflow possible
        Self(U256::from(value) * U256::from(FIXED_POINT_SCALE))
    }

    /// Create from f64 with safety checks
    ///
    /// Intended for test fixtures and display round trips. The value goes
    /// through `Decimal`, so it is limited to about 28 significant digits.
    pub fn try_from_f64(value: f64) -> Result<Self, FixedPointError> {
        if !value.is_finite() {
            return Err(FixedPointError::NotFinite { value });
        }
        if value < 0.0 {
            return Err(FixedPointError::Negative {
                input: value.to_string(),
            });
        }

        let decimal = Decimal::from_f64(value).ok_or(FixedPointError::Overflow {
            operation: "try_from_f64",
        })?;
        Self::from_decimal(decimal)
    }

    /// Convert to f64 for display or interfacing with floating-point systems
    ///
    /// # Warning
    /// Only use for display, logging, or test oracles. Never feed the result
    /// back into pool math.
    pub fn to_f64(self) -> f64 {
        let U256(ref limbs) = self.0;
        let mut value = 0.0f64;
        for limb in limbs.iter().rev() {
            value = value * 18_446_744_073_709_551_616.0 + *limb as f64;
        }
        value / FIXED_POINT_SCALE as f64
    }

    /// Convert to `Decimal`; fails when the raw value exceeds 96 bits
    pub fn to_decimal(self) -> Result<Decimal, FixedPointError> {
        if self.0.bits() > 96 {
            return Err(FixedPointError::Overflow {
                operation: "to_decimal",
            });
        }
        Decimal::try_from_i128_with_scale(self.0.as_u128() as i128, FIXED_POINT_DECIMALS).map_err(
            |_| FixedPointError::Overflow {
                operation: "to_decimal",
            },
        )
    }

    /// Get the raw scaled integer value
    pub fn raw(self) -> U256 {
        self.0
    }

    /// Create from raw scaled integer
    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// Create from a raw scaled integer that fits in u128
    pub fn from_raw_u128(raw: u128) -> Self {
        Self(U256::from(raw))
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Widen the raw value to 512 bits for intermediate products
    pub fn to_wide(self) -> U512 {
        widen(self.0)
    }

    /// Narrow a 512-bit intermediate back to a fixed-point value
    pub fn from_wide(wide: U512, operation: &'static str) -> Result<Self, FixedPointError> {
        narrow(wide, operation).map(Self)
    }

    // CHECKED ARITHMETIC

    /// Checked addition - returns None on overflow
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Checked subtraction - returns None on underflow
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Addition reporting overflow as an error
    pub fn try_add(self, rhs: Self) -> Result<Self, FixedPointError> {
        self.checked_add(rhs)
            .ok_or(FixedPointError::Overflow { operation: "add" })
    }

    /// Subtraction reporting underflow as an error
    pub fn try_sub(self, rhs: Self) -> Result<Self, FixedPointError> {
        self.checked_sub(rhs)
            .ok_or(FixedPointError::Underflow { operation: "sub" })
    }

    /// `self * rhs`, truncated
    pub fn mul_down(self, rhs: Self) -> Result<Self, FixedPointError> {
        let product = self.to_wide() * rhs.to_wide();
        Self::from_wide(product / scale_wide(), "mul_down")
    }

    /// `self * rhs`, rounded up
    pub fn mul_up(self, rhs: Self) -> Result<Self, FixedPointError> {
        let product = self.to_wide() * rhs.to_wide();
        if product.is_zero() {
            return Ok(Self::ZERO);
        }
        Self::from_wide((product - U512::one()) / scale_wide() + U512::one(), "mul_up")
    }

    /// `self / rhs`, truncated
    pub fn div_down(self, rhs: Self) -> Result<Self, FixedPointError> {
        if rhs.is_zero() {
            return Err(FixedPointError::DivisionByZero);
        }
        Self::from_wide(self.to_wide() * scale_wide() / rhs.to_wide(), "div_down")
    }

    /// `self / rhs`, rounded up
    pub fn div_up(self, rhs: Self) -> Result<Self, FixedPointError> {
        if rhs.is_zero() {
            return Err(FixedPointError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(Self::ZERO);
        }
        let numerator = self.to_wide() * scale_wide();
        Self::from_wide((numerator - U512::one()) / rhs.to_wide() + U512::one(), "div_up")
    }

    /// `1 - self`, or zero when `self >= 1`
    pub fn complement(self) -> Self {
        Self::ONE.checked_sub(self).unwrap_or(Self::ZERO)
    }

    // SATURATING ARITHMETIC

    /// Saturating addition - clamps to max on overflow
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction - clamps to zero on underflow
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// Absolute difference
    pub fn abs_diff(self, rhs: Self) -> Self {
        if self >= rhs {
            Self(self.0 - rhs.0)
        } else {
            Self(rhs.0 - self.0)
        }
    }
}

fn scale_wide() -> U512 {
    U512::from(FIXED_POINT_SCALE)
}

/// Zero-extend a 256-bit value to 512 bits
pub fn widen(value: U256) -> U512 {
    U512::from(value)
}

/// Narrow a 512-bit value to 256 bits, failing if any high bit is set
pub fn narrow(value: U512, operation: &'static str) -> Result<U256, FixedPointError> {
    U256::try_from(value).map_err(|_| FixedPointError::Overflow { operation })
}

/// Exact decimal rendering with trailing zeros trimmed
impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = U256::from(FIXED_POINT_SCALE);
        let whole = self.0 / scale;
        let fraction = (self.0 % scale).low_u64();
        if fraction == 0 {
            write!(f, "{}", whole)
        } else {
            let digits = format!("{:018}", fraction);
            write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
        }
    }
}

impl FromStr for FixedPoint {
    type Err = FixedPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_decimal_str(s)
    }
}

impl TryFrom<String> for FixedPoint {
    type Error = FixedPointError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_decimal_str(&value)
    }
}

impl From<FixedPoint> for String {
    fn from(value: FixedPoint) -> Self {
        value.to_string()
    }
}

impl From<U256> for FixedPoint {
    fn from(raw: U256) -> Self {
        Self(raw)
    }
}

//! # Dual-Curve Types Library
//!
//! Value types shared by the dual-curve pool math and its configuration.
//!
//! ## Design Philosophy
//!
//! - **No Precision Loss**: amounts are stored as 18-decimal scaled integers
//! - **Named Scales**: the token scale (10^18) and the amplification scale (1000)
//!   are separate named constants, never inferred from literals
//! - **Type Safety**: amplification parameters cannot be confused with amounts
//! - **Clear Boundaries**: explicit conversion points between floating point and fixed point
//!
//! ## Quick Start
//!
//! ```rust
//! use dualcurve_types::{Amplification, FixedPoint};
//!
//! // Parse from decimal strings (primary method)
//! let balance = FixedPoint::from_decimal_str("10.5").unwrap();
//! let fee = FixedPoint::from_decimal_str("0.01").unwrap();
//!
//! // Explicit rounding direction on every product and quotient
//! let charged = balance.mul_up(fee).unwrap();
//! assert_eq!(charged.to_string(), "0.105");
//!
//! let amp = Amplification::from_human(450).unwrap();
//! assert_eq!(amp.raw(), 450_000);
//! ```

pub mod common;

pub use common::amplification::Amplification;
pub use common::errors::{FixedPointError, ValidationError};
pub use common::fixed_point::FixedPoint;
pub use common::scales;

/// Raw integer types backing [`FixedPoint`]
pub use primitive_types::{U256, U512};

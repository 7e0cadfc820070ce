//! # Dual-Curve StableSwap Math
//!
//! ## Purpose
//!
//! Pricing and liquidity mathematics for a two-token StableSwap pool that
//! applies a different amplification on each side of the balanced point.
//! Curve 1 governs pools where token 0 is the scarcer side, curve 2 governs
//! the rest. Swaps and single-token liquidity operations that move the pool
//! across the kink are priced on the curve they land on.
//!
//! ## Components
//!
//! - **Curve selection** ([`curve`]): which amplification governs a balance pair
//! - **Invariant solver** ([`invariant`]): Newton iteration for D
//! - **Balance solver** ([`balance`]): closed-form quadratic for one balance
//! - **Anchor solver** ([`anchor`]): carries an invariant across the kink
//! - **Resolver** ([`resolver`]): curve-aware balance solve shared by swaps and exits
//! - **Swap quotes** ([`swap`]) and **BPT math** ([`liquidity`])
//! - **Pool facade** ([`pool`]): rates, fees and state on top of the pure math
//!
//! ## Precision
//!
//! All amounts are 18-decimal [`FixedPoint`] values backed by `U256`, with
//! every solver intermediate computed in `U512`. Amplifications are integers
//! at [`AMP_PRECISION`](dualcurve_types::scales::AMP_PRECISION). Operations
//! are deterministic: identical inputs give bit-identical outputs.
//!
//! ## Failure Model
//!
//! Every operation returns [`MathError`]. Inputs outside the curve domain
//! are [`DomainError`]s; a solver hitting its iteration cap returns
//! [`MathError::ConvergenceFault`] with its last estimate and logs a warning.
//!
//! ## Example
//!
//! ```
//! use dualcurve_amm::{AmplificationPair, DualCurveMath};
//! use dualcurve_types::{Amplification, FixedPoint};
//!
//! let math = DualCurveMath::default();
//! let amps = AmplificationPair::new(
//!     Amplification::from_human(450)?,
//!     Amplification::from_human(50)?,
//! );
//! let balances = [FixedPoint::from_integer(10), FixedPoint::from_integer(12)];
//! let out = math.quote_out_given_in(balances, amps, 0, 1, FixedPoint::from_integer(2))?;
//! assert!(out < FixedPoint::from_integer(2));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod anchor;
pub mod balance;
pub mod curve;
pub mod errors;
pub mod invariant;
pub mod liquidity;
pub mod pool;
pub mod pool_traits;
pub mod resolver;
pub mod solver;
pub mod swap;

mod wide;

pub use curve::{select_curve, AmplificationPair, Curve, InvariantPair};
pub use errors::{DomainError, MathError, SolverKind};
pub use pool::{DualCurvePool, PoolSnapshot};
pub use pool_traits::AmmPool;
pub use resolver::ResolvedBalance;
pub use solver::{Convergence, DualCurveMath};

/// Common types for pool calculations
pub use dualcurve_types::{Amplification, FixedPoint};

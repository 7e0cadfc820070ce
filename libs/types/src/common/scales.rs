//! The two fixed-point scales used by the pool math.
//!
//! Token amounts, invariants and ratios are scaled by [`FIXED_POINT_SCALE`].
//! Amplification parameters are scaled by [`AMP_PRECISION`]. The solvers
//! combine both, so neither may be inferred from a literal.

/// Number of decimals carried by [`crate::FixedPoint`]
pub const FIXED_POINT_DECIMALS: u32 = 18;

/// 10^18
pub const FIXED_POINT_SCALE: u128 = 1_000_000_000_000_000_000;

/// Internal precision of amplification parameters (raw = human * 1000)
pub const AMP_PRECISION: u64 = 1_000;

/// Smallest human amplification value accepted by a pool
pub const MIN_AMP: u64 = 1;

/// Largest human amplification value accepted by a pool
pub const MAX_AMP: u64 = 5_000;

/// Number of tokens in a dual-curve pool
pub const N_TOKENS: u64 = 2;

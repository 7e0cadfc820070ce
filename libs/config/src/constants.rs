//! Default calibration values for the solvers and pools
//!
//! Iteration caps and tolerances were tuned for balances between 1e-8 and
//! 1e10 tokens. Pools far outside that range should override them through
//! [`crate::SolverSettings`].

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "DUALCURVE";

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "config/dualcurve.toml";

/// Newton / fixed-point iteration limits
pub mod solver {
    /// Maximum iterations for the invariant and anchor solvers
    pub const MAX_ITERATIONS: u32 = 255;

    /// Convergence tolerance in raw fixed-point units (1 = 1e-18)
    pub const CONVERGENCE_TOLERANCE: u64 = 1;
}

/// Pool parameter defaults
pub mod pool {
    /// Human amplification for curve 1 (balance0 < balance1)
    pub const DEFAULT_AMPLIFICATION_1: u64 = 450;

    /// Human amplification for curve 2 (balance0 >= balance1)
    pub const DEFAULT_AMPLIFICATION_2: u64 = 50;

    /// 1% swap fee, raw 18-decimal
    pub const DEFAULT_SWAP_FEE_RAW: u128 = 10_000_000_000_000_000;

    /// 10% maximum swap fee, raw 18-decimal
    pub const MAX_SWAP_FEE_RAW: u128 = 100_000_000_000_000_000;
}

//! # Dual-Curve Configuration
//!
//! Calibration settings and defaults for the dual-curve pool math.
//!
//! ## Features
//!
//! - **Solver Settings**: iteration caps and convergence tolerance
//! - **Pool Settings**: amplification pair, swap fee, token rates
//! - **Layered Loading**: TOML file, then `DUALCURVE_` environment overrides
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dualcurve_config::{constants, MathConfig};
//!
//! let config = MathConfig::load(None).unwrap();
//! assert!(config.solver.max_iterations > 0);
//!
//! let cap = constants::solver::MAX_ITERATIONS;
//! ```

pub mod constants;
pub mod settings;

// Re-export commonly used types
pub use settings::{load_config, MathConfig, PoolSettings, SolverSettings};

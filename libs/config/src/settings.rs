//! Solver and pool configuration
//!
//! Loads calibration settings from an optional TOML file with environment
//! variable overrides (`DUALCURVE_` prefix, `__` between nested keys).

use crate::constants::{pool, solver, DEFAULT_CONFIG_PATH, ENV_PREFIX};
use anyhow::{Context, Result};
use config_crate::{Config, Environment, File, FileFormat, Map};
use dualcurve_types::{Amplification, FixedPoint, ValidationError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MathConfig {
    /// Iteration limits shared by every solver
    pub solver: SolverSettings,

    /// Parameters used to construct a pool
    pub pool: PoolSettings,
}

/// Convergence limits for the iterative solvers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub max_iterations: u32,

    /// Raw fixed-point units; 1 means the smallest representable increment
    pub convergence_tolerance: u64,
}

/// Pool construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    /// Human amplification while balance0 < balance1
    pub amplification_1: u64,

    /// Human amplification while balance0 >= balance1
    pub amplification_2: u64,

    pub swap_fee: FixedPoint,

    /// Token rates applied before the math (1.0 for plain tokens)
    pub rates: [FixedPoint; 2],
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_iterations: solver::MAX_ITERATIONS,
            convergence_tolerance: solver::CONVERGENCE_TOLERANCE,
        }
    }
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            amplification_1: pool::DEFAULT_AMPLIFICATION_1,
            amplification_2: pool::DEFAULT_AMPLIFICATION_2,
            swap_fee: FixedPoint::from_raw_u128(pool::DEFAULT_SWAP_FEE_RAW),
            rates: [FixedPoint::ONE, FixedPoint::ONE],
        }
    }
}

impl SolverSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_iterations == 0 {
            return Err(ValidationError::Zero {
                name: "max_iterations",
            });
        }
        Ok(())
    }
}

impl PoolSettings {
    /// Validated amplification parameters for curve 1 and curve 2
    pub fn amplifications(&self) -> Result<(Amplification, Amplification), ValidationError> {
        Ok((
            Amplification::from_human(self.amplification_1)?,
            Amplification::from_human(self.amplification_2)?,
        ))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.amplifications()?;

        let max_fee = FixedPoint::from_raw_u128(pool::MAX_SWAP_FEE_RAW);
        if self.swap_fee > max_fee {
            return Err(ValidationError::ValueTooLarge {
                name: "swap_fee",
                value: self.swap_fee.to_string(),
                bound: max_fee.to_string(),
            });
        }

        if self.rates.iter().any(|rate| rate.is_zero()) {
            return Err(ValidationError::Zero { name: "rate" });
        }
        Ok(())
    }
}

impl MathConfig {
    /// Load configuration from a TOML file with environment overrides
    ///
    /// A missing file is not an error when no explicit path is given; the
    /// defaults apply instead.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`MathConfig::load`], reading overrides from `env` instead of
    /// the process environment when it is provided
    pub fn load_with_env(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let mut builder = Config::builder();

        match path {
            Some(path) => {
                info!("Loading math config: {:?}", path);
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    info!("Loading math config: {:?}", default_path);
                    builder = builder.add_source(File::from(default_path));
                } else {
                    debug!("No config file at {:?}, using defaults", default_path);
                }
            }
        }

        // Override with environment variables (DUALCURVE_ prefix)
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text without environment overrides
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize configuration")
    }

    pub fn validate(&self) -> Result<()> {
        self.solver
            .validate()
            .context("Invalid solver settings")?;
        self.pool.validate().context("Invalid pool settings")?;

        if self.solver.max_iterations < solver::MAX_ITERATIONS {
            warn!(
                max_iterations = self.solver.max_iterations,
                "Iteration cap below default; extreme balances may not converge"
            );
        }
        Ok(())
    }
}

/// Convenience function to load configuration from the default location
pub fn load_config() -> Result<MathConfig> {
    MathConfig::load(None)
}

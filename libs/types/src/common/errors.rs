//! Error types for fixed-point arithmetic and parameter validation
//!
//! Provides error handling for overflow, underflow and conversion failures in
//! 18-decimal arithmetic, as well as range checks for pool parameters.

use thiserror::Error;

/// Errors that can occur while validating pool parameters
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Value is not within the allowed range
    #[error("{name} value {value} is not in allowed range [{min}, {max}]")]
    ValueOutOfRange {
        name: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    /// Value must be strictly below a bound
    #[error("{name} value {value} must be below {bound}")]
    ValueTooLarge {
        name: &'static str,
        value: String,
        bound: String,
    },

    /// Value must be non-zero
    #[error("{name} cannot be zero")]
    Zero { name: &'static str },
}

/// Errors that can occur during fixed-point arithmetic operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FixedPointError {
    /// Result exceeds 256 bits
    #[error("Overflow in fixed-point {operation}")]
    Overflow { operation: &'static str },

    /// Result would be negative
    #[error("Underflow in fixed-point {operation}")]
    Underflow { operation: &'static str },

    /// Invalid decimal string format
    #[error("Invalid decimal string: '{input}' - expected numeric format")]
    InvalidDecimal { input: String },

    /// Negative values cannot be represented
    #[error("Negative value '{input}' cannot be represented")]
    Negative { input: String },

    /// Division by zero in fixed-point arithmetic
    #[error("Division by zero in fixed-point arithmetic")]
    DivisionByZero,

    /// Value is not finite (NaN or infinity)
    #[error("Value is not finite: {value}")]
    NotFinite { value: f64 },
}

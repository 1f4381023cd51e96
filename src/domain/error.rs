//! Domain validation errors.
//!
//! Argument errors are raised by the normalizer before any network
//! interaction. Arithmetic errors are raised by [`Amount`] operations that
//! would otherwise wrap.
//!
//! # Examples
//!
//! ```
//! use pmkit::domain::amount::Amount;
//! use pmkit::domain::error::ArithmeticError;
//!
//! let fee = Amount::from(7u64);
//! let profit = Amount::from(5u64);
//! assert!(matches!(
//!     profit.checked_sub(fee),
//!     Err(ArithmeticError::Underflow { .. })
//! ));
//! ```
//!
//! [`Amount`]: crate::domain::amount::Amount

use thiserror::Error;

use super::amount::Amount;

/// Malformed or missing call arguments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// A parameter declared by the signature was not supplied.
    #[error("{function}: missing required parameter '{param}'")]
    Missing {
        function: &'static str,
        param: &'static str,
    },

    /// Positional argument count differs from the signature length.
    #[error("{function}: expected {expected} positional arguments, got {actual}")]
    Arity {
        function: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A named argument matches neither a parameter nor an alias.
    #[error("{function}: unrecognized parameter '{name}'")]
    Unrecognized { function: &'static str, name: String },

    /// The same parameter was supplied under two names.
    #[error("{function}: parameter '{param}' supplied more than once")]
    Duplicate {
        function: &'static str,
        param: &'static str,
    },

    /// A value could not be coerced to its declared type.
    #[error("{function}: invalid {ty} for '{param}': {reason}")]
    InvalidValue {
        function: &'static str,
        param: &'static str,
        ty: String,
        reason: String,
    },
}

/// Amount arithmetic that would leave the unsigned 256-bit range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("overflow computing {lhs} + {rhs}")]
    Overflow { lhs: Amount, rhs: Amount },

    #[error("underflow computing {lhs} - {rhs}")]
    Underflow { lhs: Amount, rhs: Amount },
}

use std::time::Duration;

use alloy_primitives::TxHash;
use thiserror::Error;

use crate::domain::error::{ArgumentError, ArithmeticError};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised while talking to deployed contracts.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("contract {contract} has no method '{method}'")]
    UnknownMethod {
        contract: &'static str,
        method: String,
    },

    #[error("contract {contract} does not emit event '{event}'")]
    UnknownEvent {
        contract: &'static str,
        event: String,
    },

    #[error("{method}: {reason}")]
    InvalidCall { method: String, reason: String },

    #[error("{method}: expected event '{event}' was not emitted")]
    MissingEvent { method: String, event: String },

    #[error("{method}: event '{event}' was emitted {count} times, expected exactly once")]
    AmbiguousEvent {
        method: String,
        event: String,
        count: usize,
    },

    #[error("{method}: event '{event}' has no field '{field}'")]
    MissingEventField {
        method: String,
        event: String,
        field: String,
    },

    #[error("{method}: transaction failed: {reason}")]
    TransactionFailure { method: String, reason: String },

    #[error("{method}: no receipt for {tx_hash} within {timeout:?}")]
    ConfirmationTimeout {
        method: String,
        tx_hash: TxHash,
        timeout: Duration,
    },

    #[error("{method}: expected {expected} value, got {actual}")]
    UnexpectedValue {
        method: String,
        expected: &'static str,
        actual: String,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

pub type Result<T> = std::result::Result<T, Error>;

//! Loosely-typed call arguments accepted from SDK callers.
//!
//! Values arrive as strings from the CLI, as raw addresses or handles from
//! Rust callers, or as plain integers. The normalizer resolves each shape to
//! one [`AbiValue`](super::abi::AbiValue).

use alloy_primitives::{Address, U256};

use super::contract::ContractHandle;

/// One loosely-typed argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// Hex address or numeric string (decimal or `0x` hex).
    Text(String),
    /// Native integer; negative values are rejected for unsigned types.
    Int(i128),
    Uint(U256),
    Address(Address),
    Handle(ContractHandle),
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i128> for ArgValue {
    fn from(value: i128) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Int(i128::from(value))
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        Self::Int(i128::from(value))
    }
}

impl From<u128> for ArgValue {
    fn from(value: u128) -> Self {
        Self::Uint(U256::from(value))
    }
}

impl From<u64> for ArgValue {
    fn from(value: u64) -> Self {
        Self::Uint(U256::from(value))
    }
}

impl From<u32> for ArgValue {
    fn from(value: u32) -> Self {
        Self::Uint(U256::from(value))
    }
}

impl From<u8> for ArgValue {
    fn from(value: u8) -> Self {
        Self::Uint(U256::from(value))
    }
}

impl From<U256> for ArgValue {
    fn from(value: U256) -> Self {
        Self::Uint(value)
    }
}

impl From<Address> for ArgValue {
    fn from(value: Address) -> Self {
        Self::Address(value)
    }
}

impl From<ContractHandle> for ArgValue {
    fn from(value: ContractHandle) -> Self {
        Self::Handle(value)
    }
}

impl From<&ContractHandle> for ArgValue {
    fn from(value: &ContractHandle) -> Self {
        Self::Handle(*value)
    }
}

/// A whole call: positional values or a named mapping.
///
/// Named entries keep insertion order so duplicate detection can report the
/// parameter deterministically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArgs {
    Positional(Vec<ArgValue>),
    Named(Vec<(String, ArgValue)>),
}

impl CallArgs {
    #[must_use]
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ArgValue>,
    {
        Self::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Start an empty named mapping; chain [`CallArgs::with`].
    #[must_use]
    pub fn named() -> Self {
        Self::Named(Vec::new())
    }

    /// Add a named entry. On a positional call, appends the value instead.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        match &mut self {
            Self::Named(entries) => entries.push((name.into(), value.into())),
            Self::Positional(values) => values.push(value.into()),
        }
        self
    }
}

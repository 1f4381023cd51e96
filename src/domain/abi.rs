//! Contract interface descriptors and normalized ABI values.
//!
//! An interface is a static table of function and event signatures. The
//! normalizer reads parameter types from it and the dispatcher checks calls
//! against it before touching the network.

use std::fmt;

use alloy_primitives::{Address, U256};

/// Semantic type of a call parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Address,
    /// Unsigned integer of the given bit width (8..=256, multiple of 8).
    Uint(usize),
}

impl ParamType {
    /// Return whether `value` fits this type.
    #[must_use]
    pub fn accepts(&self, value: &AbiValue) -> bool {
        match (self, value) {
            (Self::Address, AbiValue::Address(_)) => true,
            (Self::Uint(bits), AbiValue::Uint(v)) => v.bit_len() <= *bits,
            _ => false,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => write!(f, "address"),
            Self::Uint(bits) => write!(f, "uint{bits}"),
        }
    }
}

/// A named, typed parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub ty: ParamType,
}

impl Param {
    #[must_use]
    pub const fn address(name: &'static str) -> Self {
        Self {
            name,
            ty: ParamType::Address,
        }
    }

    #[must_use]
    pub const fn uint(name: &'static str, bits: usize) -> Self {
        Self {
            name,
            ty: ParamType::Uint(bits),
        }
    }
}

/// Ordered parameter list of a callable function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: &'static str,
    pub params: &'static [Param],
    /// Read-only functions are served by `eth_call`, never submitted.
    pub view: bool,
}

/// An event and the names of its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSignature {
    pub name: &'static str,
    pub fields: &'static [Param],
}

impl EventSignature {
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|p| p.name == field)
    }
}

/// Callable methods and emitted events of one contract type.
#[derive(Debug, PartialEq, Eq)]
pub struct ContractInterface {
    pub name: &'static str,
    pub functions: &'static [FunctionSignature],
    pub events: &'static [EventSignature],
}

impl ContractInterface {
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn event(&self, name: &str) -> Option<&EventSignature> {
        self.events.iter().find(|e| e.name == name)
    }
}

/// A strictly-typed argument or decoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiValue {
    Address(Address),
    Uint(U256),
}

impl AbiValue {
    #[must_use]
    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(a) => Some(*a),
            Self::Uint(_) => None,
        }
    }

    #[must_use]
    pub fn as_uint(&self) -> Option<U256> {
        match self {
            Self::Uint(v) => Some(*v),
            Self::Address(_) => None,
        }
    }

    /// ABI kind name used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Address(_) => "address",
            Self::Uint(_) => "uint",
        }
    }
}

impl fmt::Display for AbiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(a) => write!(f, "{a}"),
            Self::Uint(v) => write!(f, "{v}"),
        }
    }
}

impl From<Address> for AbiValue {
    fn from(value: Address) -> Self {
        Self::Address(value)
    }
}

impl From<U256> for AbiValue {
    fn from(value: U256) -> Self {
        Self::Uint(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uint_width_is_enforced() {
        let ty = ParamType::Uint(8);
        assert!(ty.accepts(&AbiValue::Uint(U256::from(255u64))));
        assert!(!ty.accepts(&AbiValue::Uint(U256::from(256u64))));
    }

    #[test]
    fn uint256_accepts_max() {
        assert!(ParamType::Uint(256).accepts(&AbiValue::Uint(U256::MAX)));
    }

    #[test]
    fn kinds_do_not_cross() {
        assert!(!ParamType::Address.accepts(&AbiValue::Uint(U256::ZERO)));
        assert!(!ParamType::Uint(256).accepts(&AbiValue::Address(Address::ZERO)));
    }

    #[test]
    fn type_display_matches_solidity() {
        assert_eq!(ParamType::Uint(24).to_string(), "uint24");
        assert_eq!(ParamType::Address.to_string(), "address");
    }
}

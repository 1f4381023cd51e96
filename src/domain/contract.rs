//! Handles to deployed contracts.

use std::fmt;

use alloy_primitives::Address;

use super::abi::ContractInterface;

/// Read-only reference to a deployed contract.
///
/// Pairs the on-chain address with the static interface descriptor used to
/// validate calls. Cheap to copy and safe to share between tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractHandle {
    address: Address,
    interface: &'static ContractInterface,
}

impl ContractHandle {
    #[must_use]
    pub const fn new(address: Address, interface: &'static ContractInterface) -> Self {
        Self { address, interface }
    }

    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    #[must_use]
    pub const fn interface(&self) -> &'static ContractInterface {
        self.interface
    }

    /// Contract type name, e.g. `"Market"`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.interface.name
    }
}

impl fmt::Display for ContractHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.interface.name, self.address)
    }
}

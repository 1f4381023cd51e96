//! Per-call descriptors and the caller context threaded through operations.

use std::time::Duration;

use alloy_primitives::Address;

use super::abi::AbiValue;
use super::contract::ContractHandle;

/// The event a transaction must emit, and which of its fields is the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedEvent {
    pub name: &'static str,
    /// `None` when only the presence of the event matters.
    pub field: Option<&'static str>,
}

impl ExpectedEvent {
    #[must_use]
    pub const fn field(name: &'static str, field: &'static str) -> Self {
        Self {
            name,
            field: Some(field),
        }
    }

    #[must_use]
    pub const fn presence(name: &'static str) -> Self {
        Self { name, field: None }
    }
}

/// One pending contract interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallDescriptor {
    pub target: ContractHandle,
    pub method: &'static str,
    pub args: Vec<AbiValue>,
    /// Absent for read-only queries.
    pub expect: Option<ExpectedEvent>,
}

impl CallDescriptor {
    /// A read-only query.
    #[must_use]
    pub fn query(target: ContractHandle, method: &'static str, args: Vec<AbiValue>) -> Self {
        Self {
            target,
            method,
            args,
            expect: None,
        }
    }

    /// A state-changing transaction expected to emit `expect`.
    #[must_use]
    pub fn transaction(
        target: ContractHandle,
        method: &'static str,
        args: Vec<AbiValue>,
        expect: ExpectedEvent,
    ) -> Self {
        Self {
            target,
            method,
            args,
            expect: Some(expect),
        }
    }

    /// `Contract.method` label for logs and errors.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}.{}", self.target.kind(), self.method)
    }
}

/// Identity and limits for one operation invocation.
///
/// Replaces any notion of an ambient "current account": every operation
/// receives the signer address explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub from: Address,
    /// Upper bound on the confirmation wait. `None` uses the dispatcher
    /// default.
    pub timeout: Option<Duration>,
}

impl CallContext {
    #[must_use]
    pub const fn new(from: Address) -> Self {
        Self {
            from,
            timeout: None,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

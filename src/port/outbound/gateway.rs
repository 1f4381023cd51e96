//! Contract gateway port: submission, confirmation and read-only calls.
//!
//! The application layer never speaks JSON-RPC itself. Everything it needs
//! from a chain goes through this trait, which keeps the market pipelines
//! testable against a scripted gateway.

use async_trait::async_trait;
use alloy_primitives::TxHash;

use crate::domain::{AbiValue, CallContext, CallDescriptor, Receipt};
use crate::error::Result;

/// Port for interacting with deployed contracts.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`). Concurrent
/// [`submit`](Self::submit) calls from the same identity must be serialized
/// by the implementation so nonces never collide.
///
/// # Errors
///
/// Transport failures and reverted calls are reported as
/// [`DispatchError::TransactionFailure`](crate::error::DispatchError::TransactionFailure).
#[async_trait]
pub trait ContractGateway: Send + Sync {
    /// Execute a read-only call and return its single return value.
    async fn call(&self, call: &CallDescriptor) -> Result<AbiValue>;

    /// Sign and submit a state-changing call as `ctx.from`.
    async fn submit(&self, ctx: &CallContext, call: &CallDescriptor) -> Result<TxHash>;

    /// Wait until the transaction is included and return its decoded receipt.
    ///
    /// Blocks for as long as the chain takes; callers bound the wait.
    async fn wait_for_receipt(&self, call: &CallDescriptor, tx_hash: TxHash) -> Result<Receipt>;
}

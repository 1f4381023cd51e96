//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use tracing::info;

#[cfg(feature = "ethereum")]
use crate::adapter::outbound::ethereum::{EthereumGateway, EthereumSettings};
use crate::application::{MarketOperations, TransactionDispatcher};
use crate::domain::CallContext;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::ContractGateway;

/// Build the JSON-RPC gateway from configuration.
///
/// # Errors
///
/// Returns an error if the RPC URL is invalid or no private key is
/// available from `WALLET_PRIVATE_KEY` or the keystore.
#[cfg(feature = "ethereum")]
pub fn build_gateway(config: &Config) -> Result<EthereumGateway> {
    let private_key = config.wallet.private_key()?;
    let settings = EthereumSettings::new(config.rpc_url()?, config.network.chain_id, private_key);
    let gateway = EthereumGateway::new(&settings)?;

    info!(
        rpc_url = %settings.rpc_url,
        chain_id = settings.chain_id,
        signer = %gateway.signer_address(),
        "Gateway ready"
    );
    Ok(gateway)
}

/// Wire the market operations over `gateway`.
///
/// # Errors
///
/// Returns an error if the configured contract addresses are invalid.
pub fn build_operations(
    config: &Config,
    gateway: Arc<dyn ContractGateway>,
) -> Result<MarketOperations> {
    let contracts = config.contracts()?;
    let dispatcher =
        TransactionDispatcher::new(gateway).with_default_timeout(config.confirmation_timeout());

    info!(
        market_factory = %contracts.market_factory,
        market_maker = %contracts.market_maker,
        buy_approval = ?config.execution.buy_approval,
        "Market operations ready"
    );
    Ok(MarketOperations::new(dispatcher, contracts)
        .with_buy_approval(config.execution.buy_approval))
}

/// Caller context for `from`, with an optional per-invocation timeout that
/// overrides the configured confirmation bound.
#[must_use]
pub fn call_context(from: Address, timeout: Option<Duration>) -> CallContext {
    match timeout {
        Some(timeout) => CallContext::new(from).with_timeout(timeout),
        None => CallContext::new(from),
    }
}

/// Everything a command needs to run operations against the chain.
#[cfg(feature = "ethereum")]
pub struct Runtime {
    pub operations: MarketOperations,
    pub signer: Address,
}

#[cfg(feature = "ethereum")]
impl Runtime {
    /// Build the gateway and operations from configuration.
    ///
    /// # Errors
    ///
    /// See [`build_gateway`] and [`build_operations`].
    pub fn from_config(config: &Config) -> Result<Self> {
        let gateway = build_gateway(config)?;
        let signer = gateway.signer_address();
        let operations = build_operations(config, Arc::new(gateway))?;
        Ok(Self { operations, signer })
    }

    #[must_use]
    pub fn context(&self, timeout: Option<Duration>) -> CallContext {
        call_context(self.signer, timeout)
    }
}

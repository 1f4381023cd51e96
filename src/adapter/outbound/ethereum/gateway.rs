//! JSON-RPC contract gateway backed by an alloy HTTP provider.
//!
//! Signs with a local private key. Submissions from this gateway are
//! serialized behind an async mutex so concurrent operations never race for
//! the same nonce.

use std::str::FromStr;

use alloy_primitives::{Address, TxHash};
use alloy_provider::network::{Ethereum, EthereumWallet, Network, ReceiptResponse, TransactionBuilder};
use alloy_provider::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::abi::{decode_event, decode_return, encode_call};
use crate::domain::{AbiValue, CallContext, CallDescriptor, Receipt};
use crate::error::{ConfigError, DispatchError, Error, Result};
use crate::port::ContractGateway;

type TransactionRequest = <Ethereum as Network>::TransactionRequest;

/// Connection settings for [`EthereumGateway`].
#[derive(Debug, Clone)]
pub struct EthereumSettings {
    /// HTTP JSON-RPC endpoint.
    pub rpc_url: url::Url,
    /// Chain ID stamped on every transaction.
    pub chain_id: u64,
    /// Hex private key of the signing wallet.
    pub private_key: String,
}

impl EthereumSettings {
    pub fn new(rpc_url: url::Url, chain_id: u64, private_key: impl Into<String>) -> Self {
        Self {
            rpc_url,
            chain_id,
            private_key: private_key.into(),
        }
    }
}

/// [`ContractGateway`] over an Ethereum JSON-RPC node.
pub struct EthereumGateway {
    provider: DynProvider,
    signer: Address,
    chain_id: u64,
    submit_lock: Mutex<()>,
}

impl EthereumGateway {
    /// Build a gateway from connection settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the private key is missing or invalid.
    pub fn new(settings: &EthereumSettings) -> Result<Self> {
        if settings.private_key.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "WALLET_PRIVATE_KEY",
            }
            .into());
        }

        let signer = PrivateKeySigner::from_str(settings.private_key.trim()).map_err(|e| {
            ConfigError::InvalidValue {
                field: "WALLET_PRIVATE_KEY",
                reason: e.to_string(),
            }
        })?;
        let address = signer.address();

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(settings.rpc_url.clone())
            .erased();

        Ok(Self {
            provider,
            signer: address,
            chain_id: settings.chain_id,
            submit_lock: Mutex::new(()),
        })
    }

    /// Address of the signing wallet.
    #[must_use]
    pub fn signer_address(&self) -> Address {
        self.signer
    }

    fn failure(call: &CallDescriptor, stage: &str, err: impl std::fmt::Display) -> Error {
        DispatchError::TransactionFailure {
            method: call.label(),
            reason: format!("{stage}: {err}"),
        }
        .into()
    }
}

#[async_trait]
impl ContractGateway for EthereumGateway {
    async fn call(&self, call: &CallDescriptor) -> Result<AbiValue> {
        let tx = TransactionRequest::default()
            .with_to(call.target.address())
            .with_input(encode_call(call)?);

        let output = self
            .provider
            .call(tx)
            .await
            .map_err(|e| Self::failure(call, "eth_call", e))?;

        decode_return(call, &output)
    }

    async fn submit(&self, ctx: &CallContext, call: &CallDescriptor) -> Result<TxHash> {
        if ctx.from != self.signer {
            return Err(Self::failure(
                call,
                "signing",
                format!("no key for {} (wallet is {})", ctx.from, self.signer),
            ));
        }

        let tx = TransactionRequest::default()
            .with_from(ctx.from)
            .with_to(call.target.address())
            .with_chain_id(self.chain_id)
            .with_input(encode_call(call)?);

        // Nonce is filled inside send_transaction; hold the lock until the
        // node has accepted the transaction.
        let _guard = self.submit_lock.lock().await;
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| Self::failure(call, "eth_sendTransaction", e))?;

        Ok(*pending.tx_hash())
    }

    async fn wait_for_receipt(&self, call: &CallDescriptor, tx_hash: TxHash) -> Result<Receipt> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash)
            .get_receipt()
            .await
            .map_err(|e| Self::failure(call, "receipt", e))?;

        let events: Vec<_> = receipt
            .inner
            .logs()
            .iter()
            .filter_map(|log| decode_event(&log.inner))
            .collect();
        debug!(
            tx_hash = %tx_hash,
            block = ?receipt.block_number,
            events = events.len(),
            "Receipt available"
        );
        Ok(Receipt {
            tx_hash,
            success: ReceiptResponse::status(&receipt),
            events,
        })
    }
}

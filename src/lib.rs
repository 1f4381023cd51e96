//! pmkit - client for LMSR prediction-market contracts.
//!
//! Creates markets and trades outcome tokens against deployed market,
//! event, token and market-maker contracts over Ethereum JSON-RPC.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **`domain`** - Contract interfaces, ABI values, amounts, fees and
//!   receipts. No I/O.
//! - **`port`** - The [`ContractGateway`](port::ContractGateway) trait the
//!   application talks through.
//! - **`application`** - Argument normalization, the transaction
//!   dispatcher and the four market operations.
//! - **`adapter`** - The alloy-backed JSON-RPC gateway and the CLI.
//! - **`infrastructure`** - Configuration, logging and runtime wiring.
//!
//! # Features
//!
//! - `ethereum` (default) - JSON-RPC gateway, keystore support and the CLI
//! - `testkit` - In-memory gateway and fixtures for integration tests
//!
//! # Example
//!
//! ```no_run
//! use pmkit::domain::{CallArgs, CallContext};
//! use pmkit::infrastructure::bootstrap::Runtime;
//! use pmkit::infrastructure::config::settings::Config;
//!
//! # async fn run() -> pmkit::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let runtime = Runtime::from_config(&config)?;
//! let ctx = runtime.context(None);
//!
//! let args = CallArgs::named()
//!     .with("market", "0x1111111111111111111111111111111111111111")
//!     .with("outcomeTokenIndex", 0u8)
//!     .with("outcomeTokenCount", 10u64);
//! let cost = runtime.operations.buy_outcome_tokens(&ctx, &args).await?;
//! println!("paid {cost}");
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

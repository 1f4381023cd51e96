//! Ethereum JSON-RPC adapter for the contract gateway port.

pub mod abi;
pub mod gateway;

pub use gateway::{EthereumGateway, EthereumSettings};

//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`gateway`] - In-memory [`ContractGateway`](crate::port::ContractGateway)
//!   with scripted query results and receipts.
//! - [`domain`] - Builders for addresses and protocol events.
//! - [`config`] - Canonical TOML configurations.

pub mod config;
pub mod domain;
pub mod gateway;

//! Outbound adapters (driven side).

#[cfg(feature = "ethereum")]
pub mod ethereum;

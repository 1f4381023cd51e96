//! Implementations of ports (hexagonal adapters).

#[cfg(feature = "ethereum")]
pub mod inbound;
pub mod outbound;

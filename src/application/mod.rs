//! Application layer: argument normalization, dispatch and market
//! operations. Depends on domain and ports only.

pub mod dispatcher;
pub mod market;
pub mod normalizer;

pub use dispatcher::{TransactionDispatcher, DEFAULT_CONFIRMATION_TIMEOUT};
pub use market::{BuyApproval, MarketOperations, ProtocolContracts};
pub use normalizer::{normalize, Alias, Signature};

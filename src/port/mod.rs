//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!     ┌──────────────────────────┐
//!     │       Application        │
//!     │  normalizer · dispatcher │
//!     │    market operations     │
//!     └────────────┬─────────────┘
//!                  │ ContractGateway
//!                  ▼
//!     ┌──────────────────────────┐
//!     │   Ethereum adapter /     │
//!     │   testkit ScriptedGateway│
//!     └──────────────────────────┘
//! ```

pub mod outbound;

pub use outbound::gateway::ContractGateway;

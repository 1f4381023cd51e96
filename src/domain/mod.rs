//! Protocol-agnostic types: amounts, ABI descriptors, handles, receipts.
//!
//! Nothing in this module touches the network. The [`protocol`] submodule
//! holds the interface tables of the deployed market contracts.

pub mod abi;
pub mod amount;
pub mod args;
pub mod call;
pub mod contract;
pub mod error;
pub mod fee;
pub mod protocol;
pub mod receipt;

pub use abi::{AbiValue, ContractInterface, EventSignature, FunctionSignature, Param, ParamType};
pub use amount::Amount;
pub use args::{ArgValue, CallArgs};
pub use call::{CallContext, CallDescriptor, ExpectedEvent};
pub use contract::ContractHandle;
pub use error::{ArgumentError, ArithmeticError};
pub use fee::Fee;
pub use receipt::{EventMatch, EventRecord, Receipt};

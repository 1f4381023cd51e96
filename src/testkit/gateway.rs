//! Scripted [`ContractGateway`] for exercising the application layer
//! without a node.
//!
//! Queries answer from a per-method table. Transactions are recorded and
//! confirmed with a per-method [`Outcome`]; unscripted transactions succeed
//! and emit exactly their expected event with no fields.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use alloy_primitives::{Address, TxHash, B256};
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{AbiValue, CallContext, CallDescriptor, EventRecord, Receipt};
use crate::error::{DispatchError, Result};
use crate::port::ContractGateway;

/// How a scripted transaction settles.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Mined successfully with these events.
    Events(Vec<EventRecord>),
    /// Mined but reverted.
    Reverted,
    /// Never mined: the receipt wait does not return.
    Pending,
    /// Rejected at submission.
    Rejected(String),
}

/// A recorded submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub from: Address,
    pub call: CallDescriptor,
    pub tx_hash: TxHash,
}

#[derive(Default)]
struct State {
    queries: HashMap<&'static str, AbiValue>,
    outcomes: HashMap<&'static str, Outcome>,
    query_log: Vec<CallDescriptor>,
    submissions: Vec<Submission>,
}

/// In-memory gateway with scripted responses.
#[derive(Default)]
pub struct ScriptedGateway {
    state: Mutex<State>,
    next_tx: AtomicU64,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every query of `method` with `value`.
    #[must_use]
    pub fn with_query(self, method: &'static str, value: impl Into<AbiValue>) -> Self {
        self.state.lock().queries.insert(method, value.into());
        self
    }

    /// Settle every transaction of `method` with `outcome`.
    #[must_use]
    pub fn with_outcome(self, method: &'static str, outcome: Outcome) -> Self {
        self.state.lock().outcomes.insert(method, outcome);
        self
    }

    /// Shorthand for a successful transaction emitting `events`.
    #[must_use]
    pub fn with_events(self, method: &'static str, events: Vec<EventRecord>) -> Self {
        self.with_outcome(method, Outcome::Events(events))
    }

    /// Every query issued so far, in order.
    pub fn queries(&self) -> Vec<CallDescriptor> {
        self.state.lock().query_log.clone()
    }

    /// Every transaction submitted so far, in order.
    pub fn submissions(&self) -> Vec<Submission> {
        self.state.lock().submissions.clone()
    }

    /// Methods of submitted transactions, in order.
    pub fn submitted_methods(&self) -> Vec<&'static str> {
        self.state
            .lock()
            .submissions
            .iter()
            .map(|s| s.call.method)
            .collect()
    }

    /// The last submission of `method`, if any.
    pub fn last_submission(&self, method: &str) -> Option<Submission> {
        self.state
            .lock()
            .submissions
            .iter()
            .rev()
            .find(|s| s.call.method == method)
            .cloned()
    }

    fn next_hash(&self) -> TxHash {
        let n = self.next_tx.fetch_add(1, Ordering::Relaxed) + 1;
        B256::left_padding_from(&n.to_be_bytes())
    }
}

#[async_trait]
impl ContractGateway for ScriptedGateway {
    async fn call(&self, call: &CallDescriptor) -> Result<AbiValue> {
        let mut state = self.state.lock();
        state.query_log.push(call.clone());
        state.queries.get(call.method).copied().ok_or_else(|| {
            DispatchError::TransactionFailure {
                method: call.label(),
                reason: "no scripted response".to_string(),
            }
            .into()
        })
    }

    async fn submit(&self, ctx: &CallContext, call: &CallDescriptor) -> Result<TxHash> {
        if let Some(Outcome::Rejected(reason)) = self.state.lock().outcomes.get(call.method) {
            return Err(DispatchError::TransactionFailure {
                method: call.label(),
                reason: reason.clone(),
            }
            .into());
        }

        let tx_hash = self.next_hash();
        self.state.lock().submissions.push(Submission {
            from: ctx.from,
            call: call.clone(),
            tx_hash,
        });
        Ok(tx_hash)
    }

    async fn wait_for_receipt(&self, call: &CallDescriptor, tx_hash: TxHash) -> Result<Receipt> {
        let outcome = self.state.lock().outcomes.get(call.method).cloned();
        let events = match outcome {
            Some(Outcome::Events(events)) => events,
            Some(Outcome::Reverted) => {
                return Ok(Receipt {
                    tx_hash,
                    success: false,
                    events: Vec::new(),
                })
            }
            Some(Outcome::Pending) => std::future::pending().await,
            Some(Outcome::Rejected(_)) | None => call
                .expect
                .map(|e| vec![EventRecord::new(e.name, call.target.address())])
                .unwrap_or_default(),
        };
        Ok(Receipt {
            tx_hash,
            success: true,
            events,
        })
    }
}

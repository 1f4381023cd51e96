//! Transaction dispatch and event-result extraction.
//!
//! Every contract interaction in the crate goes through
//! [`TransactionDispatcher`]: it validates the call against the target's
//! interface, hands it to the [`ContractGateway`], bounds the confirmation
//! wait and picks the expected event out of the receipt.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::{AbiValue, CallContext, CallDescriptor, EventMatch, ExpectedEvent, Receipt};
use crate::error::{DispatchError, Result};
use crate::port::ContractGateway;

/// Default bound on waiting for a receipt.
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Submits calls and extracts their results.
pub struct TransactionDispatcher {
    gateway: Arc<dyn ContractGateway>,
    default_timeout: Duration,
}

impl TransactionDispatcher {
    pub fn new(gateway: Arc<dyn ContractGateway>) -> Self {
        Self {
            gateway,
            default_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Run a read-only query and return its value.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownMethod`] or
    /// [`DispatchError::InvalidCall`] for calls the target does not declare,
    /// or whatever the gateway reports.
    pub async fn query(&self, call: &CallDescriptor) -> Result<AbiValue> {
        self.validate(call, true)?;
        let value = self.gateway.call(call).await?;
        debug!(call = %call.label(), target = %call.target.address(), result = %value, "Query returned");
        Ok(value)
    }

    /// Submit `call`, wait for it, and return the expected event's field.
    ///
    /// # Errors
    ///
    /// Fails with [`DispatchError::MissingEvent`] when the event is absent,
    /// [`DispatchError::AmbiguousEvent`] when it appears more than once and
    /// [`DispatchError::MissingEventField`] when the field is absent.
    pub async fn send_and_extract(&self, ctx: &CallContext, call: &CallDescriptor) -> Result<AbiValue> {
        let expect = self.expected(call)?;
        let field = expect.field.ok_or_else(|| DispatchError::InvalidCall {
            method: call.label(),
            reason: format!("no result field named for event '{}'", expect.name),
        })?;

        let receipt = self.confirm(ctx, call, expect).await?;
        let missing_field = || DispatchError::MissingEventField {
            method: call.label(),
            event: expect.name.to_string(),
            field: field.to_string(),
        };
        match receipt.find_event(expect.name) {
            EventMatch::One(event) => event.field(field).copied().ok_or_else(|| missing_field().into()),
            _ => Err(missing_field().into()),
        }
    }

    /// Submit `call`, wait for it, and require exactly one expected event.
    ///
    /// Used where only confirmation matters, e.g. token approvals.
    ///
    /// # Errors
    ///
    /// See [`send_and_extract`](Self::send_and_extract); also fails with
    /// [`DispatchError::ConfirmationTimeout`] when the wait exceeds the bound.
    pub async fn send_and_require(&self, ctx: &CallContext, call: &CallDescriptor) -> Result<Receipt> {
        let expect = self.expected(call)?;
        self.confirm(ctx, call, expect).await
    }

    async fn confirm(&self, ctx: &CallContext, call: &CallDescriptor, expect: ExpectedEvent) -> Result<Receipt> {
        let label = call.label();

        let tx_hash = self.gateway.submit(ctx, call).await?;
        info!(call = %label, from = %ctx.from, tx_hash = %tx_hash, "Transaction submitted");

        let timeout = ctx.timeout.unwrap_or(self.default_timeout);
        let receipt = tokio::time::timeout(timeout, self.gateway.wait_for_receipt(call, tx_hash))
            .await
            .map_err(|_| DispatchError::ConfirmationTimeout {
                method: label.clone(),
                tx_hash,
                timeout,
            })??;

        if !receipt.success {
            warn!(call = %label, tx_hash = %tx_hash, "Transaction reverted");
            return Err(DispatchError::TransactionFailure {
                method: label,
                reason: format!("transaction {tx_hash} reverted"),
            }
            .into());
        }

        match receipt.find_event(expect.name) {
            EventMatch::One(_) => {
                info!(call = %label, tx_hash = %tx_hash, event = expect.name, "Transaction confirmed");
                Ok(receipt)
            }
            EventMatch::None => Err(DispatchError::MissingEvent {
                method: label,
                event: expect.name.to_string(),
            }
            .into()),
            EventMatch::Many(count) => Err(DispatchError::AmbiguousEvent {
                method: label,
                event: expect.name.to_string(),
                count,
            }
            .into()),
        }
    }

    /// Validate a transaction and resolve its expected event.
    fn expected(&self, call: &CallDescriptor) -> Result<ExpectedEvent> {
        self.validate(call, false)?;
        let expect = call.expect.ok_or_else(|| DispatchError::InvalidCall {
            method: call.label(),
            reason: "transaction has no expected event".to_string(),
        })?;
        let event = call
            .target
            .interface()
            .event(expect.name)
            .ok_or_else(|| DispatchError::UnknownEvent {
                contract: call.target.kind(),
                event: expect.name.to_string(),
            })?;
        if let Some(field) = expect.field {
            if !event.has_field(field) {
                return Err(DispatchError::MissingEventField {
                    method: call.label(),
                    event: expect.name.to_string(),
                    field: field.to_string(),
                }
                .into());
            }
        }
        Ok(expect)
    }

    /// Check the method exists, has the right mutability, and that the
    /// arguments fit its signature.
    fn validate(&self, call: &CallDescriptor, view: bool) -> Result<()> {
        let interface = call.target.interface();
        let function = interface
            .function(call.method)
            .ok_or_else(|| DispatchError::UnknownMethod {
                contract: interface.name,
                method: call.method.to_string(),
            })?;
        let invalid = |reason: String| DispatchError::InvalidCall {
            method: call.label(),
            reason,
        };

        if function.view != view {
            let kind = if function.view { "read-only" } else { "state-changing" };
            return Err(invalid(format!("method is {kind}")).into());
        }
        if function.params.len() != call.args.len() {
            return Err(invalid(format!(
                "expected {} arguments, got {}",
                function.params.len(),
                call.args.len()
            ))
            .into());
        }
        if let Some((param, value)) = function
            .params
            .iter()
            .zip(&call.args)
            .find(|(param, value)| !param.ty.accepts(value))
        {
            return Err(invalid(format!("'{}' is not a valid {}: {value}", param.name, param.ty)).into());
        }
        Ok(())
    }
}

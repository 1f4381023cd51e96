//! Market operations: create, buy, sell and short-sell.
//!
//! Each operation is a short linear pipeline
//! (normalize → query → approve → dispatch). A failing step aborts the
//! rest; nothing is retried and nothing needs rolling back because every
//! transaction is atomic on chain.

use alloy_primitives::{Address, U256};
use serde::Deserialize;
use tracing::{debug, info};

use super::dispatcher::TransactionDispatcher;
use super::normalizer::{normalize, Alias, Signature};
use crate::domain::protocol::{self, event, method};
use crate::domain::{
    AbiValue, Amount, ArgumentError, CallArgs, CallContext, CallDescriptor, ContractHandle,
    ContractInterface, ExpectedEvent, Fee, Param,
};
use crate::error::{DispatchError, Result};

/// Which amount `buy_outcome_tokens` approves on the collateral token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuyApproval {
    /// Approve `outcomeTokenCount`. Matches the historical client; the buy
    /// reverts whenever cost exceeds the count and no prior allowance
    /// covers the difference.
    #[default]
    TokenCount,
    /// Approve the computed total cost (base cost plus market fee).
    Cost,
}

const TRADE_PARAMS: &[Param] = &[
    Param::address("market"),
    Param::uint("outcomeTokenIndex", 8),
    Param::uint("outcomeTokenCount", 256),
];

const CREATE_MARKET_PARAMS: &[Param] = &[
    Param::address("eventContract"),
    Param::address("marketMaker"),
    Param::uint("fee", 24),
];

const CREATE_MARKET_ALIASES: &[Alias] = &[Alias {
    external: "event",
    param: "eventContract",
}];

pub const CREATE_MARKET: Signature =
    Signature::new("createMarket", CREATE_MARKET_PARAMS).with_aliases(CREATE_MARKET_ALIASES);

pub const BUY_OUTCOME_TOKENS: Signature = Signature::new("buyOutcomeTokens", TRADE_PARAMS);
pub const SELL_OUTCOME_TOKENS: Signature = Signature::new("sellOutcomeTokens", TRADE_PARAMS);
pub const SHORT_SELL_OUTCOME_TOKENS: Signature =
    Signature::new("shortSellOutcomeTokens", TRADE_PARAMS);

/// Addresses of the protocol singletons operations are issued against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolContracts {
    pub market_factory: Address,
    pub market_maker: Address,
}

/// Normalized trade arguments shared by buy, sell and short-sell.
struct Trade {
    market: ContractHandle,
    index: U256,
    count: Amount,
}

/// The SDK surface: four market operations over a dispatcher.
pub struct MarketOperations {
    dispatcher: TransactionDispatcher,
    factory: ContractHandle,
    market_maker: ContractHandle,
    buy_approval: BuyApproval,
}

impl MarketOperations {
    pub fn new(dispatcher: TransactionDispatcher, contracts: ProtocolContracts) -> Self {
        Self {
            dispatcher,
            factory: ContractHandle::new(contracts.market_factory, &protocol::MARKET_FACTORY),
            market_maker: ContractHandle::new(contracts.market_maker, &protocol::MARKET_MAKER),
            buy_approval: BuyApproval::default(),
        }
    }

    #[must_use]
    pub fn with_buy_approval(mut self, buy_approval: BuyApproval) -> Self {
        self.buy_approval = buy_approval;
        self
    }

    /// Handle for an existing market contract.
    #[must_use]
    pub fn market(address: Address) -> ContractHandle {
        ContractHandle::new(address, &protocol::MARKET)
    }

    /// Create a market for `{event, marketMaker, fee}` and return its handle.
    ///
    /// # Errors
    ///
    /// [`ArgumentError`] for malformed input (including a fee above 100%),
    /// or any dispatch failure of the `createMarket` transaction.
    pub async fn create_market(&self, ctx: &CallContext, args: &CallArgs) -> Result<ContractHandle> {
        let values = normalize(&CREATE_MARKET, args)?;
        let fee = values[2]
            .as_uint()
            .and_then(Fee::from_u256)
            .ok_or_else(|| ArgumentError::InvalidValue {
                function: CREATE_MARKET.function,
                param: "fee",
                ty: "uint24".to_string(),
                reason: format!("fee may not exceed {}", protocol::FEE_RANGE),
            })?;
        info!(
            factory = %self.factory.address(),
            event = %values[0],
            market_maker = %values[1],
            fee = %fee,
            fee_ppm = fee.parts_per_million(),
            "Creating market"
        );

        let call = CallDescriptor::transaction(
            self.factory,
            method::CREATE_MARKET,
            values,
            ExpectedEvent::field(event::MARKET_CREATION, "market"),
        );
        let value = self.dispatcher.send_and_extract(ctx, &call).await?;
        let market = Self::market(expect_address(&call, value)?);

        info!(market = %market.address(), "Market created");
        Ok(market)
    }

    /// Buy outcome tokens, paying base cost plus market fee.
    ///
    /// Returns the cost reported by the `OutcomeTokenPurchase` event.
    ///
    /// # Errors
    ///
    /// [`ArgumentError`] for malformed input, an arithmetic error if the fee
    /// overflows the cost, or any query/approval/dispatch failure.
    pub async fn buy_outcome_tokens(&self, ctx: &CallContext, args: &CallArgs) -> Result<Amount> {
        let trade = self.trade(&BUY_OUTCOME_TOKENS, args)?;

        let event_contract = self.event_contract(&trade.market).await?;
        let collateral = self
            .query_address(
                CallDescriptor::query(event_contract, method::COLLATERAL_TOKEN, vec![]),
                &protocol::TOKEN,
            )
            .await?;

        let base_cost = self
            .query_amount(CallDescriptor::query(
                self.market_maker,
                method::CALC_COST,
                trade.pricing_args(),
            ))
            .await?;
        let fee = self.market_fee(&trade.market, base_cost).await?;
        let cost = base_cost.checked_add(fee)?;
        info!(
            market = %trade.market.address(),
            index = %trade.index,
            count = %trade.count,
            base_cost = %base_cost,
            fee = %fee,
            cost = %cost,
            "Buying outcome tokens"
        );

        let allowance = match self.buy_approval {
            BuyApproval::TokenCount => trade.count,
            BuyApproval::Cost => cost,
        };
        self.approve(ctx, collateral, &trade.market, allowance).await?;

        let call = CallDescriptor::transaction(
            trade.market,
            method::BUY,
            trade.order_args(cost),
            ExpectedEvent::field(event::OUTCOME_TOKEN_PURCHASE, "cost"),
        );
        let value = self.dispatcher.send_and_extract(ctx, &call).await?;
        expect_amount(&call, value)
    }

    /// Sell outcome tokens for at least base profit minus market fee.
    ///
    /// Returns the profit reported by the `OutcomeTokenSale` event.
    ///
    /// # Errors
    ///
    /// Fails with an arithmetic error, without clamping, when the fee exceeds
    /// the base profit.
    pub async fn sell_outcome_tokens(&self, ctx: &CallContext, args: &CallArgs) -> Result<Amount> {
        let trade = self.trade(&SELL_OUTCOME_TOKENS, args)?;

        let event_contract = self.event_contract(&trade.market).await?;
        let outcome_token = self
            .query_address(
                CallDescriptor::query(
                    event_contract,
                    method::OUTCOME_TOKENS,
                    vec![AbiValue::Uint(trade.index)],
                ),
                &protocol::TOKEN,
            )
            .await?;

        let base_profit = self
            .query_amount(CallDescriptor::query(
                self.market_maker,
                method::CALC_PROFIT,
                trade.pricing_args(),
            ))
            .await?;
        let fee = self.market_fee(&trade.market, base_profit).await?;
        let min_profit = base_profit.checked_sub(fee)?;
        info!(
            market = %trade.market.address(),
            index = %trade.index,
            count = %trade.count,
            base_profit = %base_profit,
            fee = %fee,
            min_profit = %min_profit,
            "Selling outcome tokens"
        );

        self.approve(ctx, outcome_token, &trade.market, trade.count)
            .await?;

        let call = CallDescriptor::transaction(
            trade.market,
            method::SELL,
            trade.order_args(min_profit),
            ExpectedEvent::field(event::OUTCOME_TOKEN_SALE, "profit"),
        );
        let value = self.dispatcher.send_and_extract(ctx, &call).await?;
        expect_amount(&call, value)
    }

    /// Short-sell outcome tokens, accepting any cost.
    ///
    /// No pricing query and no approval: submits `shortSell` with a floor
    /// of zero and returns the cost from `OutcomeTokenShortSale`.
    ///
    /// # Errors
    ///
    /// [`ArgumentError`] for malformed input, or any dispatch failure.
    pub async fn short_sell_outcome_tokens(&self, ctx: &CallContext, args: &CallArgs) -> Result<Amount> {
        let trade = self.trade(&SHORT_SELL_OUTCOME_TOKENS, args)?;
        info!(
            market = %trade.market.address(),
            index = %trade.index,
            count = %trade.count,
            "Short-selling outcome tokens"
        );

        let call = CallDescriptor::transaction(
            trade.market,
            method::SHORT_SELL,
            trade.order_args(Amount::ZERO),
            ExpectedEvent::field(event::OUTCOME_TOKEN_SHORT_SALE, "cost"),
        );
        let value = self.dispatcher.send_and_extract(ctx, &call).await?;
        expect_amount(&call, value)
    }

    fn trade(&self, signature: &Signature, args: &CallArgs) -> Result<Trade> {
        let values = normalize(signature, args)?;
        let unexpected = |value: &AbiValue, expected: &'static str| DispatchError::UnexpectedValue {
            method: signature.function.to_string(),
            expected,
            actual: value.kind().to_string(),
        };
        let market = values[0].as_address().ok_or_else(|| unexpected(&values[0], "address"))?;
        let index = values[1].as_uint().ok_or_else(|| unexpected(&values[1], "uint"))?;
        let count = values[2].as_uint().ok_or_else(|| unexpected(&values[2], "uint"))?;
        Ok(Trade {
            market: Self::market(market),
            index,
            count: Amount::new(count),
        })
    }

    async fn event_contract(&self, market: &ContractHandle) -> Result<ContractHandle> {
        self.query_address(
            CallDescriptor::query(*market, method::EVENT_CONTRACT, vec![]),
            &protocol::EVENT,
        )
        .await
    }

    async fn market_fee(&self, market: &ContractHandle, amount: Amount) -> Result<Amount> {
        self.query_amount(CallDescriptor::query(
            *market,
            method::CALC_MARKET_FEE,
            vec![AbiValue::Uint(amount.as_u256())],
        ))
        .await
    }

    /// Approve `spender` to move `amount` of `token`, requiring an
    /// `Approval` event.
    async fn approve(
        &self,
        ctx: &CallContext,
        token: ContractHandle,
        spender: &ContractHandle,
        amount: Amount,
    ) -> Result<()> {
        debug!(token = %token.address(), spender = %spender.address(), amount = %amount, "Approving transfer");
        let call = CallDescriptor::transaction(
            token,
            method::APPROVE,
            vec![
                AbiValue::Address(spender.address()),
                AbiValue::Uint(amount.as_u256()),
            ],
            ExpectedEvent::presence(event::APPROVAL),
        );
        self.dispatcher.send_and_require(ctx, &call).await?;
        Ok(())
    }

    async fn query_address(
        &self,
        call: CallDescriptor,
        interface: &'static ContractInterface,
    ) -> Result<ContractHandle> {
        let value = self.dispatcher.query(&call).await?;
        Ok(ContractHandle::new(expect_address(&call, value)?, interface))
    }

    async fn query_amount(&self, call: CallDescriptor) -> Result<Amount> {
        let value = self.dispatcher.query(&call).await?;
        expect_amount(&call, value)
    }
}

impl Trade {
    fn pricing_args(&self) -> Vec<AbiValue> {
        vec![
            AbiValue::Address(self.market.address()),
            AbiValue::Uint(self.index),
            AbiValue::Uint(self.count.as_u256()),
        ]
    }

    fn order_args(&self, limit: Amount) -> Vec<AbiValue> {
        vec![
            AbiValue::Uint(self.index),
            AbiValue::Uint(self.count.as_u256()),
            AbiValue::Uint(limit.as_u256()),
        ]
    }
}

fn expect_address(call: &CallDescriptor, value: AbiValue) -> Result<Address> {
    value.as_address().ok_or_else(|| {
        DispatchError::UnexpectedValue {
            method: call.label(),
            expected: "address",
            actual: value.kind().to_string(),
        }
        .into()
    })
}

fn expect_amount(call: &CallDescriptor, value: AbiValue) -> Result<Amount> {
    value.as_uint().map(Amount::new).ok_or_else(|| {
        DispatchError::UnexpectedValue {
            method: call.label(),
            expected: "uint",
            actual: value.kind().to_string(),
        }
        .into()
    })
}

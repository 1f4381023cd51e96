//! Builders for addresses and protocol events used across tests.

use alloy_primitives::{Address, U256};

use crate::domain::protocol::event;
use crate::domain::{CallContext, EventRecord};

/// Deterministic address with every byte set to `byte`.
pub fn address(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

/// The same address as a `0x`-prefixed string.
pub fn address_str(byte: u8) -> String {
    address(byte).to_string()
}

/// Context for a sender built from `byte`, with no timeout override.
pub fn context(byte: u8) -> CallContext {
    CallContext::new(address(byte))
}

/// `MarketCreation` announcing `market`, emitted by `factory`.
pub fn market_creation(factory: Address, creator: Address, market: Address) -> EventRecord {
    EventRecord::new(event::MARKET_CREATION, factory)
        .with_field("creator", creator)
        .with_field("market", market)
}

/// `OutcomeTokenPurchase` reporting `cost`.
pub fn purchase(market: Address, buyer: Address, index: u8, count: u64, cost: u64) -> EventRecord {
    EventRecord::new(event::OUTCOME_TOKEN_PURCHASE, market)
        .with_field("buyer", buyer)
        .with_field("outcomeTokenIndex", U256::from(index))
        .with_field("outcomeTokenCount", U256::from(count))
        .with_field("cost", U256::from(cost))
}

/// `OutcomeTokenSale` reporting `profit`.
pub fn sale(market: Address, seller: Address, index: u8, count: u64, profit: u64) -> EventRecord {
    EventRecord::new(event::OUTCOME_TOKEN_SALE, market)
        .with_field("seller", seller)
        .with_field("outcomeTokenIndex", U256::from(index))
        .with_field("outcomeTokenCount", U256::from(count))
        .with_field("profit", U256::from(profit))
}

/// `OutcomeTokenShortSale` reporting `cost`.
pub fn short_sale(market: Address, buyer: Address, index: u8, count: u64, cost: u64) -> EventRecord {
    EventRecord::new(event::OUTCOME_TOKEN_SHORT_SALE, market)
        .with_field("buyer", buyer)
        .with_field("outcomeTokenIndex", U256::from(index))
        .with_field("outcomeTokenCount", U256::from(count))
        .with_field("cost", U256::from(cost))
}

/// `Approval` from `owner` to `spender`.
pub fn approval(token: Address, owner: Address, spender: Address, value: u64) -> EventRecord {
    EventRecord::new(event::APPROVAL, token)
        .with_field("owner", owner)
        .with_field("spender", spender)
        .with_field("value", U256::from(value))
}

/// An event no operation waits for.
pub fn unrelated(emitter: Address) -> EventRecord {
    EventRecord::new("Transfer", emitter)
        .with_field("value", U256::from(1u64))
}

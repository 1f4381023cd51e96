use std::sync::Arc;

use alloy_primitives::U256;
use pmkit::application::{MarketOperations, ProtocolContracts, TransactionDispatcher};
use pmkit::domain::protocol::method;
use pmkit::testkit::domain::address;
use pmkit::testkit::gateway::ScriptedGateway;

pub const SENDER: u8 = 0x01;
pub const FACTORY: u8 = 0xfa;
pub const MARKET_MAKER: u8 = 0xaa;
pub const MARKET: u8 = 0x11;
pub const EVENT: u8 = 0x22;
pub const COLLATERAL: u8 = 0x33;
pub const OUTCOME_TOKEN: u8 = 0x44;

pub fn contracts() -> ProtocolContracts {
    ProtocolContracts {
        market_factory: address(FACTORY),
        market_maker: address(MARKET_MAKER),
    }
}

/// Gateway answering the read-only queries a trade makes.
pub fn priced_gateway(base: u64, fee: u64) -> ScriptedGateway {
    ScriptedGateway::new()
        .with_query(method::EVENT_CONTRACT, address(EVENT))
        .with_query(method::COLLATERAL_TOKEN, address(COLLATERAL))
        .with_query(method::OUTCOME_TOKENS, address(OUTCOME_TOKEN))
        .with_query(method::CALC_COST, U256::from(base))
        .with_query(method::CALC_PROFIT, U256::from(base))
        .with_query(method::CALC_MARKET_FEE, U256::from(fee))
}

pub fn operations(gateway: ScriptedGateway) -> (Arc<ScriptedGateway>, MarketOperations) {
    let gateway = Arc::new(gateway);
    let dispatcher = TransactionDispatcher::new(gateway.clone());
    (gateway, MarketOperations::new(dispatcher, contracts()))
}

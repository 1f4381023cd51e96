//! Interface descriptors of the deployed prediction-market contracts.
//!
//! Names and parameter types mirror the on-chain ABI exactly; the Ethereum
//! adapter declares the same functions with `sol!` and the two must agree.

use super::abi::{ContractInterface, EventSignature, FunctionSignature, Param};

/// Fee denominator: a market fee of `FEE_RANGE` is 100%.
pub const FEE_RANGE: u32 = 1_000_000;

pub mod method {
    pub const CREATE_MARKET: &str = "createMarket";
    pub const EVENT_CONTRACT: &str = "eventContract";
    pub const CALC_MARKET_FEE: &str = "calcMarketFee";
    pub const BUY: &str = "buy";
    pub const SELL: &str = "sell";
    pub const SHORT_SELL: &str = "shortSell";
    pub const COLLATERAL_TOKEN: &str = "collateralToken";
    pub const OUTCOME_TOKENS: &str = "outcomeTokens";
    pub const CALC_COST: &str = "calcCost";
    pub const CALC_PROFIT: &str = "calcProfit";
    pub const APPROVE: &str = "approve";
}

pub mod event {
    pub const MARKET_CREATION: &str = "MarketCreation";
    pub const OUTCOME_TOKEN_PURCHASE: &str = "OutcomeTokenPurchase";
    pub const OUTCOME_TOKEN_SALE: &str = "OutcomeTokenSale";
    pub const OUTCOME_TOKEN_SHORT_SALE: &str = "OutcomeTokenShortSale";
    pub const APPROVAL: &str = "Approval";
}

pub static MARKET_FACTORY: ContractInterface = ContractInterface {
    name: "MarketFactory",
    functions: &[FunctionSignature {
        name: method::CREATE_MARKET,
        params: &[
            Param::address("eventContract"),
            Param::address("marketMaker"),
            Param::uint("fee", 24),
        ],
        view: false,
    }],
    events: &[EventSignature {
        name: event::MARKET_CREATION,
        fields: &[
            Param::address("creator"),
            Param::address("market"),
            Param::address("eventContract"),
            Param::address("marketMaker"),
            Param::uint("fee", 24),
        ],
    }],
};

const OUTCOME_INDEX: Param = Param::uint("outcomeTokenIndex", 8);
const OUTCOME_COUNT: Param = Param::uint("outcomeTokenCount", 256);

pub static MARKET: ContractInterface = ContractInterface {
    name: "Market",
    functions: &[
        FunctionSignature {
            name: method::EVENT_CONTRACT,
            params: &[],
            view: true,
        },
        FunctionSignature {
            name: method::CALC_MARKET_FEE,
            params: &[Param::uint("outcomeTokenCost", 256)],
            view: true,
        },
        FunctionSignature {
            name: method::BUY,
            params: &[
                OUTCOME_INDEX,
                OUTCOME_COUNT,
                Param::uint("maxCost", 256),
            ],
            view: false,
        },
        FunctionSignature {
            name: method::SELL,
            params: &[
                OUTCOME_INDEX,
                OUTCOME_COUNT,
                Param::uint("minProfit", 256),
            ],
            view: false,
        },
        FunctionSignature {
            name: method::SHORT_SELL,
            params: &[
                OUTCOME_INDEX,
                OUTCOME_COUNT,
                Param::uint("minProfit", 256),
            ],
            view: false,
        },
    ],
    events: &[
        EventSignature {
            name: event::OUTCOME_TOKEN_PURCHASE,
            fields: &[
                Param::address("buyer"),
                OUTCOME_INDEX,
                OUTCOME_COUNT,
                Param::uint("cost", 256),
            ],
        },
        EventSignature {
            name: event::OUTCOME_TOKEN_SALE,
            fields: &[
                Param::address("seller"),
                OUTCOME_INDEX,
                OUTCOME_COUNT,
                Param::uint("profit", 256),
            ],
        },
        EventSignature {
            name: event::OUTCOME_TOKEN_SHORT_SALE,
            fields: &[
                Param::address("buyer"),
                OUTCOME_INDEX,
                OUTCOME_COUNT,
                Param::uint("cost", 256),
            ],
        },
    ],
};

pub static EVENT: ContractInterface = ContractInterface {
    name: "Event",
    functions: &[
        FunctionSignature {
            name: method::COLLATERAL_TOKEN,
            params: &[],
            view: true,
        },
        FunctionSignature {
            name: method::OUTCOME_TOKENS,
            params: &[Param::uint("index", 256)],
            view: true,
        },
    ],
    events: &[],
};

pub static TOKEN: ContractInterface = ContractInterface {
    name: "Token",
    functions: &[FunctionSignature {
        name: method::APPROVE,
        params: &[Param::address("spender"), Param::uint("value", 256)],
        view: false,
    }],
    events: &[EventSignature {
        name: event::APPROVAL,
        fields: &[
            Param::address("owner"),
            Param::address("spender"),
            Param::uint("value", 256),
        ],
    }],
};

const PRICING_PARAMS: &[Param] = &[Param::address("market"), OUTCOME_INDEX, OUTCOME_COUNT];

pub static MARKET_MAKER: ContractInterface = ContractInterface {
    name: "MarketMaker",
    functions: &[
        FunctionSignature {
            name: method::CALC_COST,
            params: PRICING_PARAMS,
            view: true,
        },
        FunctionSignature {
            name: method::CALC_PROFIT,
            params: PRICING_PARAMS,
            view: true,
        },
    ],
    events: &[],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_transaction_method_is_declared() {
        for name in [method::BUY, method::SELL, method::SHORT_SELL] {
            let f = MARKET.function(name).unwrap();
            assert!(!f.view);
            assert_eq!(f.params.len(), 3);
        }
        assert!(!MARKET_FACTORY.function(method::CREATE_MARKET).unwrap().view);
        assert!(!TOKEN.function(method::APPROVE).unwrap().view);
    }

    #[test]
    fn result_fields_exist_on_events() {
        assert!(MARKET_FACTORY
            .event(event::MARKET_CREATION)
            .unwrap()
            .has_field("market"));
        assert!(MARKET
            .event(event::OUTCOME_TOKEN_PURCHASE)
            .unwrap()
            .has_field("cost"));
        assert!(MARKET
            .event(event::OUTCOME_TOKEN_SALE)
            .unwrap()
            .has_field("profit"));
        assert!(MARKET
            .event(event::OUTCOME_TOKEN_SHORT_SALE)
            .unwrap()
            .has_field("cost"));
    }

    #[test]
    fn queries_are_views() {
        assert!(MARKET.function(method::EVENT_CONTRACT).unwrap().view);
        assert!(EVENT.function(method::OUTCOME_TOKENS).unwrap().view);
        assert!(MARKET_MAKER.function(method::CALC_PROFIT).unwrap().view);
    }
}

//! `sol!` declarations of the market contracts, with calldata encoding,
//! return decoding and log decoding against the domain descriptors.
//!
//! Method and event names here must match `domain::protocol`; the tests at
//! the bottom check the two tables against each other.

use alloy_primitives::aliases::U24;
use alloy_primitives::{Address, Bytes, Log, U256};
use alloy_sol_types::{sol, SolCall, SolEvent};

use crate::domain::protocol::{event, method};
use crate::domain::{AbiValue, CallDescriptor, EventRecord};
use crate::error::{DispatchError, Result};

sol! {
    interface IMarketFactory {
        event MarketCreation(address indexed creator, address market, address eventContract, address marketMaker, uint24 fee);

        function createMarket(address eventContract, address marketMaker, uint24 fee) external returns (address market);
    }

    interface IMarket {
        event OutcomeTokenPurchase(address indexed buyer, uint8 outcomeTokenIndex, uint256 outcomeTokenCount, uint256 cost);
        event OutcomeTokenSale(address indexed seller, uint8 outcomeTokenIndex, uint256 outcomeTokenCount, uint256 profit);
        event OutcomeTokenShortSale(address indexed buyer, uint8 outcomeTokenIndex, uint256 outcomeTokenCount, uint256 cost);

        function eventContract() external view returns (address);
        function calcMarketFee(uint256 outcomeTokenCost) external view returns (uint256);
        function buy(uint8 outcomeTokenIndex, uint256 outcomeTokenCount, uint256 maxCost) external returns (uint256 cost);
        function sell(uint8 outcomeTokenIndex, uint256 outcomeTokenCount, uint256 minProfit) external returns (uint256 profit);
        function shortSell(uint8 outcomeTokenIndex, uint256 outcomeTokenCount, uint256 minProfit) external returns (uint256 cost);
    }

    interface IEvent {
        function collateralToken() external view returns (address);
        function outcomeTokens(uint256 index) external view returns (address);
    }

    interface IToken {
        event Approval(address indexed owner, address indexed spender, uint256 value);

        function approve(address spender, uint256 value) external returns (bool);
    }

    interface IMarketMaker {
        function calcCost(address market, uint8 outcomeTokenIndex, uint256 outcomeTokenCount) external view returns (uint256 cost);
        function calcProfit(address market, uint8 outcomeTokenIndex, uint256 outcomeTokenCount) external view returns (uint256 profit);
    }
}

/// ABI-encode `call` into calldata.
///
/// # Errors
///
/// Returns [`DispatchError::UnknownMethod`] for methods without a `sol!`
/// declaration and [`DispatchError::InvalidCall`] for mistyped arguments.
pub fn encode_call(call: &CallDescriptor) -> Result<Bytes> {
    let args = Args(call);
    let data = match call.method {
        method::CREATE_MARKET => IMarketFactory::createMarketCall {
            eventContract: args.address(0)?,
            marketMaker: args.address(1)?,
            fee: args.uint24(2)?,
        }
        .abi_encode(),
        method::EVENT_CONTRACT => IMarket::eventContractCall {}.abi_encode(),
        method::CALC_MARKET_FEE => IMarket::calcMarketFeeCall {
            outcomeTokenCost: args.uint(0)?,
        }
        .abi_encode(),
        method::BUY => IMarket::buyCall {
            outcomeTokenIndex: args.uint8(0)?,
            outcomeTokenCount: args.uint(1)?,
            maxCost: args.uint(2)?,
        }
        .abi_encode(),
        method::SELL => IMarket::sellCall {
            outcomeTokenIndex: args.uint8(0)?,
            outcomeTokenCount: args.uint(1)?,
            minProfit: args.uint(2)?,
        }
        .abi_encode(),
        method::SHORT_SELL => IMarket::shortSellCall {
            outcomeTokenIndex: args.uint8(0)?,
            outcomeTokenCount: args.uint(1)?,
            minProfit: args.uint(2)?,
        }
        .abi_encode(),
        method::COLLATERAL_TOKEN => IEvent::collateralTokenCall {}.abi_encode(),
        method::OUTCOME_TOKENS => IEvent::outcomeTokensCall {
            index: args.uint(0)?,
        }
        .abi_encode(),
        method::APPROVE => IToken::approveCall {
            spender: args.address(0)?,
            value: args.uint(1)?,
        }
        .abi_encode(),
        method::CALC_COST => IMarketMaker::calcCostCall {
            market: args.address(0)?,
            outcomeTokenIndex: args.uint8(1)?,
            outcomeTokenCount: args.uint(2)?,
        }
        .abi_encode(),
        method::CALC_PROFIT => IMarketMaker::calcProfitCall {
            market: args.address(0)?,
            outcomeTokenIndex: args.uint8(1)?,
            outcomeTokenCount: args.uint(2)?,
        }
        .abi_encode(),
        other => {
            return Err(DispatchError::UnknownMethod {
                contract: call.target.kind(),
                method: other.to_string(),
            }
            .into())
        }
    };
    Ok(data.into())
}

/// Decode the single return value of a read-only `call`.
///
/// # Errors
///
/// Returns [`DispatchError::TransactionFailure`] when the output does not
/// decode, and [`DispatchError::UnknownMethod`] for undeclared methods.
pub fn decode_return(call: &CallDescriptor, output: &[u8]) -> Result<AbiValue> {
    let undecodable = |e: alloy_sol_types::Error| DispatchError::TransactionFailure {
        method: call.label(),
        reason: format!("undecodable return data: {e}"),
    };
    let value = match call.method {
        method::EVENT_CONTRACT => AbiValue::Address(
            IMarket::eventContractCall::abi_decode_returns(output).map_err(undecodable)?,
        ),
        method::CALC_MARKET_FEE => AbiValue::Uint(
            IMarket::calcMarketFeeCall::abi_decode_returns(output).map_err(undecodable)?,
        ),
        method::COLLATERAL_TOKEN => AbiValue::Address(
            IEvent::collateralTokenCall::abi_decode_returns(output).map_err(undecodable)?,
        ),
        method::OUTCOME_TOKENS => AbiValue::Address(
            IEvent::outcomeTokensCall::abi_decode_returns(output).map_err(undecodable)?,
        ),
        method::CALC_COST => AbiValue::Uint(
            IMarketMaker::calcCostCall::abi_decode_returns(output).map_err(undecodable)?,
        ),
        method::CALC_PROFIT => AbiValue::Uint(
            IMarketMaker::calcProfitCall::abi_decode_returns(output).map_err(undecodable)?,
        ),
        other => {
            return Err(DispatchError::UnknownMethod {
                contract: call.target.kind(),
                method: other.to_string(),
            }
            .into())
        }
    };
    Ok(value)
}

/// Decode a receipt log into an [`EventRecord`], if it is one of ours.
///
/// Logs with an unknown topic or undecodable data are skipped; they belong
/// to contracts this crate does not model (e.g. token `Transfer`s).
#[must_use]
pub fn decode_event(log: &Log) -> Option<EventRecord> {
    let emitter = log.address;

    if let Some(e) = decode::<IMarketFactory::MarketCreation>(log) {
        return Some(
            EventRecord::new(event::MARKET_CREATION, emitter)
                .with_field("creator", e.creator)
                .with_field("market", e.market)
                .with_field("eventContract", e.eventContract)
                .with_field("marketMaker", e.marketMaker)
                .with_field("fee", U256::from(e.fee)),
        );
    }
    if let Some(e) = decode::<IMarket::OutcomeTokenPurchase>(log) {
        return Some(
            EventRecord::new(event::OUTCOME_TOKEN_PURCHASE, emitter)
                .with_field("buyer", e.buyer)
                .with_field("outcomeTokenIndex", U256::from(e.outcomeTokenIndex))
                .with_field("outcomeTokenCount", e.outcomeTokenCount)
                .with_field("cost", e.cost),
        );
    }
    if let Some(e) = decode::<IMarket::OutcomeTokenSale>(log) {
        return Some(
            EventRecord::new(event::OUTCOME_TOKEN_SALE, emitter)
                .with_field("seller", e.seller)
                .with_field("outcomeTokenIndex", U256::from(e.outcomeTokenIndex))
                .with_field("outcomeTokenCount", e.outcomeTokenCount)
                .with_field("profit", e.profit),
        );
    }
    if let Some(e) = decode::<IMarket::OutcomeTokenShortSale>(log) {
        return Some(
            EventRecord::new(event::OUTCOME_TOKEN_SHORT_SALE, emitter)
                .with_field("buyer", e.buyer)
                .with_field("outcomeTokenIndex", U256::from(e.outcomeTokenIndex))
                .with_field("outcomeTokenCount", e.outcomeTokenCount)
                .with_field("cost", e.cost),
        );
    }
    if let Some(e) = decode::<IToken::Approval>(log) {
        return Some(
            EventRecord::new(event::APPROVAL, emitter)
                .with_field("owner", e.owner)
                .with_field("spender", e.spender)
                .with_field("value", e.value),
        );
    }
    None
}

fn decode<E: SolEvent>(log: &Log) -> Option<E> {
    if log.data.topics().first() != Some(&E::SIGNATURE_HASH) {
        return None;
    }
    E::decode_log_data(&log.data).ok()
}

/// Positional accessor over a descriptor's normalized arguments.
struct Args<'a>(&'a CallDescriptor);

impl Args<'_> {
    fn get(&self, idx: usize) -> Result<&AbiValue> {
        self.0.args.get(idx).ok_or_else(|| {
            DispatchError::InvalidCall {
                method: self.0.label(),
                reason: format!("missing argument {idx}"),
            }
            .into()
        })
    }

    fn mistyped(&self, idx: usize, expected: &str) -> crate::error::Error {
        DispatchError::InvalidCall {
            method: self.0.label(),
            reason: format!("argument {idx} is not a valid {expected}"),
        }
        .into()
    }

    fn address(&self, idx: usize) -> Result<Address> {
        self.get(idx)?
            .as_address()
            .ok_or_else(|| self.mistyped(idx, "address"))
    }

    fn uint(&self, idx: usize) -> Result<U256> {
        self.get(idx)?
            .as_uint()
            .ok_or_else(|| self.mistyped(idx, "uint256"))
    }

    fn uint8(&self, idx: usize) -> Result<u8> {
        u8::try_from(self.uint(idx)?).map_err(|_| self.mistyped(idx, "uint8"))
    }

    fn uint24(&self, idx: usize) -> Result<U24> {
        U24::checked_from_limbs_slice(self.uint(idx)?.as_limbs())
            .ok_or_else(|| self.mistyped(idx, "uint24"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::protocol::{EVENT, MARKET, MARKET_FACTORY, MARKET_MAKER, TOKEN};
    use crate::domain::{ContractHandle, ContractInterface, ExpectedEvent};
    use alloy_primitives::{address, LogData};

    const MARKET_ADDR: Address = address!("00000000000000000000000000000000000000aa");
    const BUYER: Address = address!("00000000000000000000000000000000000000bb");

    fn handle(interface: &'static ContractInterface) -> ContractHandle {
        ContractHandle::new(MARKET_ADDR, interface)
    }

    #[test]
    fn every_declared_function_encodes() {
        for interface in [&MARKET_FACTORY, &MARKET, &EVENT, &TOKEN, &MARKET_MAKER] {
            for f in interface.functions {
                let args = f
                    .params
                    .iter()
                    .map(|p| match p.ty {
                        crate::domain::ParamType::Address => AbiValue::Address(BUYER),
                        crate::domain::ParamType::Uint(_) => AbiValue::Uint(U256::from(1u64)),
                    })
                    .collect();
                let call = CallDescriptor::query(handle(interface), f.name, args);
                assert!(encode_call(&call).is_ok(), "{} failed to encode", f.name);
            }
        }
    }

    #[test]
    fn buy_calldata_starts_with_selector() {
        let call = CallDescriptor::transaction(
            handle(&MARKET),
            method::BUY,
            vec![
                AbiValue::Uint(U256::ZERO),
                AbiValue::Uint(U256::from(10u64)),
                AbiValue::Uint(U256::from(105u64)),
            ],
            ExpectedEvent::field(event::OUTCOME_TOKEN_PURCHASE, "cost"),
        );
        let data = encode_call(&call).unwrap();
        assert_eq!(&data[..4], IMarket::buyCall::SELECTOR.as_slice());
        assert_eq!(data.len(), 4 + 3 * 32);
    }

    fn create_market(fee: u64) -> CallDescriptor {
        CallDescriptor::transaction(
            handle(&MARKET_FACTORY),
            method::CREATE_MARKET,
            vec![
                AbiValue::Address(BUYER),
                AbiValue::Address(MARKET_ADDR),
                AbiValue::Uint(U256::from(fee)),
            ],
            ExpectedEvent::field(event::MARKET_CREATION, "market"),
        )
    }

    #[test]
    fn create_market_fee_must_fit_uint24() {
        let data = encode_call(&create_market(16_777_215)).unwrap();
        assert_eq!(&data[..4], IMarketFactory::createMarketCall::SELECTOR.as_slice());
        assert_eq!(&data[4 + 2 * 32 + 29..], &[0xffu8; 3]);

        assert!(encode_call(&create_market(16_777_216)).is_err());
    }

    #[test]
    fn index_wider_than_uint8_is_rejected() {
        let call = CallDescriptor::query(
            handle(&MARKET_MAKER),
            method::CALC_COST,
            vec![
                AbiValue::Address(MARKET_ADDR),
                AbiValue::Uint(U256::from(256u64)),
                AbiValue::Uint(U256::from(1u64)),
            ],
        );
        assert!(encode_call(&call).is_err());
    }

    #[test]
    fn decodes_uint_return() {
        let call = CallDescriptor::query(handle(&MARKET), method::CALC_MARKET_FEE, vec![]);
        let output = U256::from(5u64).to_be_bytes::<32>();
        assert_eq!(
            decode_return(&call, &output).unwrap(),
            AbiValue::Uint(U256::from(5u64))
        );
    }

    #[test]
    fn decodes_purchase_log() {
        let purchase = IMarket::OutcomeTokenPurchase {
            buyer: BUYER,
            outcomeTokenIndex: 0,
            outcomeTokenCount: U256::from(10u64),
            cost: U256::from(105u64),
        };
        let log = Log {
            address: MARKET_ADDR,
            data: purchase.encode_log_data(),
        };

        let record = decode_event(&log).unwrap();
        assert_eq!(record.name, event::OUTCOME_TOKEN_PURCHASE);
        assert_eq!(record.emitter, MARKET_ADDR);
        assert_eq!(record.field("cost"), Some(&AbiValue::Uint(U256::from(105u64))));
        assert_eq!(record.field("buyer"), Some(&AbiValue::Address(BUYER)));
    }

    #[test]
    fn skips_unknown_logs() {
        let log = Log {
            address: MARKET_ADDR,
            data: LogData::new_unchecked(vec![alloy_primitives::B256::repeat_byte(7)], Bytes::new()),
        };
        assert!(decode_event(&log).is_none());
    }

    #[test]
    fn decoded_fields_match_descriptors() {
        let approval = IToken::Approval {
            owner: BUYER,
            spender: MARKET_ADDR,
            value: U256::from(10u64),
        };
        let record = decode_event(&Log {
            address: MARKET_ADDR,
            data: approval.encode_log_data(),
        })
        .unwrap();
        let descriptor = TOKEN.event(event::APPROVAL).unwrap();
        for (name, _) in &record.fields {
            assert!(descriptor.has_field(name), "undeclared field {name}");
        }
        assert_eq!(record.fields.len(), descriptor.fields.len());
    }
}

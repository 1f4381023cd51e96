//! Argument normalization.
//!
//! Turns a [`CallArgs`] (positional or named, loosely typed) into the
//! ordered [`AbiValue`] list a [`Signature`] declares. Pure: no I/O, no
//! logging beyond a debug trace of the result.

use std::str::FromStr;

use alloy_primitives::{Address, U256};
use tracing::debug;

use crate::domain::{AbiValue, ArgValue, ArgumentError, CallArgs, FunctionSignature, Param, ParamType};

/// Maps a caller-facing name to a declared parameter name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alias {
    pub external: &'static str,
    pub param: &'static str,
}

/// Ordered parameters plus the aliases accepted for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub function: &'static str,
    pub params: &'static [Param],
    pub aliases: &'static [Alias],
}

impl Signature {
    #[must_use]
    pub const fn new(function: &'static str, params: &'static [Param]) -> Self {
        Self {
            function,
            params,
            aliases: &[],
        }
    }

    #[must_use]
    pub const fn with_aliases(mut self, aliases: &'static [Alias]) -> Self {
        self.aliases = aliases;
        self
    }

    /// Position of the parameter called `name`, directly or via an alias.
    fn position(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name).or_else(|| {
            self.aliases
                .iter()
                .find(|a| a.external == name)
                .and_then(|a| self.params.iter().position(|p| p.name == a.param))
        })
    }
}

impl From<&FunctionSignature> for Signature {
    fn from(f: &FunctionSignature) -> Self {
        Self::new(f.name, f.params)
    }
}

/// Normalize `args` against `signature`.
///
/// # Errors
///
/// Returns [`ArgumentError`] when a parameter is missing, supplied twice or
/// unrecognized, when the positional count is wrong, or when a value cannot
/// be coerced to its declared type.
pub fn normalize(signature: &Signature, args: &CallArgs) -> Result<Vec<AbiValue>, ArgumentError> {
    let function = signature.function;
    let params = signature.params;

    let slots: Vec<&ArgValue> = match args {
        CallArgs::Positional(values) => {
            if values.len() != params.len() {
                return Err(ArgumentError::Arity {
                    function,
                    expected: params.len(),
                    actual: values.len(),
                });
            }
            values.iter().collect()
        }
        CallArgs::Named(entries) => {
            let mut slots: Vec<Option<&ArgValue>> = vec![None; params.len()];
            for (name, value) in entries {
                let idx = signature
                    .position(name)
                    .ok_or_else(|| ArgumentError::Unrecognized {
                        function,
                        name: name.clone(),
                    })?;
                if slots[idx].replace(value).is_some() {
                    return Err(ArgumentError::Duplicate {
                        function,
                        param: params[idx].name,
                    });
                }
            }
            params
                .iter()
                .zip(slots)
                .map(|(param, slot)| {
                    slot.ok_or(ArgumentError::Missing {
                        function,
                        param: param.name,
                    })
                })
                .collect::<Result<_, _>>()?
        }
    };

    let values = params
        .iter()
        .zip(slots)
        .map(|(param, value)| coerce(function, param, value))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(function, args = ?values, "Normalized call arguments");
    Ok(values)
}

/// Coerce one loosely-typed value to `param.ty`.
fn coerce(function: &'static str, param: &Param, value: &ArgValue) -> Result<AbiValue, ArgumentError> {
    let invalid = |reason: String| ArgumentError::InvalidValue {
        function,
        param: param.name,
        ty: param.ty.to_string(),
        reason,
    };

    match param.ty {
        ParamType::Address => match value {
            ArgValue::Address(address) => Ok(AbiValue::Address(*address)),
            ArgValue::Handle(handle) => Ok(AbiValue::Address(handle.address())),
            ArgValue::Text(text) => parse_address(text).map(AbiValue::Address).map_err(invalid),
            ArgValue::Int(_) | ArgValue::Uint(_) => {
                Err(invalid("expected an address, got an integer".into()))
            }
        },
        ParamType::Uint(bits) => {
            let number = match value {
                ArgValue::Uint(v) => *v,
                ArgValue::Int(i) => u128::try_from(*i)
                    .map(U256::from)
                    .map_err(|_| invalid(format!("negative value {i}")))?,
                ArgValue::Text(text) => parse_uint(text).map_err(invalid)?,
                ArgValue::Address(_) | ArgValue::Handle(_) => {
                    return Err(invalid("expected an integer, got an address".into()))
                }
            };
            if number.bit_len() > bits {
                return Err(invalid(format!("{number} does not fit in {bits} bits")));
            }
            Ok(AbiValue::Uint(number))
        }
    }
}

fn parse_address(text: &str) -> Result<Address, String> {
    let text = text.trim();
    let hex = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .ok_or_else(|| format!("'{text}' is missing the 0x prefix"))?;
    if hex.len() != 40 {
        return Err(format!("'{text}' is not 20 bytes of hex"));
    }
    Address::from_str(hex).map_err(|e| format!("'{text}': {e}"))
}

fn parse_uint(text: &str) -> Result<U256, String> {
    let text = text.trim();
    if text.is_empty() {
        return Err("empty string".into());
    }
    if text.starts_with('-') {
        return Err(format!("negative value {text}"));
    }
    U256::from_str(text).map_err(|e| format!("'{text}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::protocol::{MARKET, MARKET_FACTORY};
    use crate::domain::ContractHandle;

    const PARAMS: &[Param] = &[
        Param::address("eventContract"),
        Param::address("marketMaker"),
        Param::uint("fee", 24),
    ];
    const ALIASES: &[Alias] = &[Alias {
        external: "event",
        param: "eventContract",
    }];
    const SIG: Signature = Signature::new("createMarket", PARAMS).with_aliases(ALIASES);

    const EVENT: &str = "0x1111111111111111111111111111111111111111";
    const MAKER: &str = "0x2222222222222222222222222222222222222222";

    fn addr(s: &str) -> Address {
        Address::from_str(s).unwrap()
    }

    #[test]
    fn positional_and_named_agree() {
        let positional = normalize(&SIG, &CallArgs::positional([EVENT, MAKER, "50000"])).unwrap();
        let named = normalize(
            &SIG,
            &CallArgs::named()
                .with("fee", 50_000u32)
                .with("marketMaker", MAKER)
                .with("event", EVENT),
        )
        .unwrap();

        assert_eq!(positional, named);
        assert_eq!(
            positional,
            vec![
                AbiValue::Address(addr(EVENT)),
                AbiValue::Address(addr(MAKER)),
                AbiValue::Uint(U256::from(50_000u64)),
            ]
        );
    }

    #[test]
    fn canonical_name_works_without_alias() {
        let args = CallArgs::named()
            .with("eventContract", EVENT)
            .with("marketMaker", MAKER)
            .with("fee", 0u32);
        assert!(normalize(&SIG, &args).is_ok());
    }

    #[test]
    fn handle_and_string_resolve_to_same_address() {
        let handle = ContractHandle::new(addr(EVENT), &MARKET);
        let from_handle = normalize(&SIG, &CallArgs::positional([
            ArgValue::from(handle),
            ArgValue::from(MAKER),
            ArgValue::from(1u32),
        ]))
        .unwrap();
        let from_text = normalize(&SIG, &CallArgs::positional([EVENT, MAKER, "1"])).unwrap();
        assert_eq!(from_handle, from_text);
    }

    #[test]
    fn missing_parameter_is_rejected() {
        let err = normalize(&SIG, &CallArgs::named().with("event", EVENT).with("fee", 1u32))
            .unwrap_err();
        assert_eq!(
            err,
            ArgumentError::Missing {
                function: "createMarket",
                param: "marketMaker",
            }
        );
    }

    #[test]
    fn positional_arity_is_checked() {
        let err = normalize(&SIG, &CallArgs::positional([EVENT, MAKER])).unwrap_err();
        assert_eq!(
            err,
            ArgumentError::Arity {
                function: "createMarket",
                expected: 3,
                actual: 2,
            }
        );
    }

    #[test]
    fn unknown_name_is_rejected() {
        let args = CallArgs::named()
            .with("event", EVENT)
            .with("marketMaker", MAKER)
            .with("fee", 1u32)
            .with("feeFactor", 1u32);
        assert!(matches!(
            normalize(&SIG, &args),
            Err(ArgumentError::Unrecognized { name, .. }) if name == "feeFactor"
        ));
    }

    #[test]
    fn alias_and_canonical_together_is_duplicate() {
        let args = CallArgs::named()
            .with("event", EVENT)
            .with("eventContract", EVENT)
            .with("marketMaker", MAKER)
            .with("fee", 1u32);
        assert_eq!(
            normalize(&SIG, &args).unwrap_err(),
            ArgumentError::Duplicate {
                function: "createMarket",
                param: "eventContract",
            }
        );
    }

    #[test]
    fn fee_wider_than_uint24_is_rejected() {
        let err = normalize(&SIG, &CallArgs::positional([EVENT, MAKER, "16777216"])).unwrap_err();
        assert!(matches!(err, ArgumentError::InvalidValue { param: "fee", .. }));
        assert!(normalize(&SIG, &CallArgs::positional([EVENT, MAKER, "16777215"])).is_ok());
    }

    #[test]
    fn negative_integers_are_rejected() {
        let args = CallArgs::positional([ArgValue::from(EVENT), ArgValue::from(MAKER), ArgValue::Int(-1)]);
        assert!(matches!(
            normalize(&SIG, &args),
            Err(ArgumentError::InvalidValue { param: "fee", .. })
        ));
        let args = CallArgs::positional([EVENT, MAKER, "-5"]);
        assert!(normalize(&SIG, &args).is_err());
    }

    #[test]
    fn untyped_integer_literals_coerce() {
        let args = CallArgs::named()
            .with("event", EVENT)
            .with("marketMaker", MAKER)
            .with("fee", 50000);
        let values = normalize(&SIG, &args).unwrap();
        assert_eq!(values[2], AbiValue::Uint(U256::from(50_000u64)));

        let args = CallArgs::positional([ArgValue::from(EVENT), ArgValue::from(MAKER), ArgValue::from(-3)]);
        assert!(normalize(&SIG, &args).is_err());

        let wide = CallArgs::positional([
            ArgValue::from(EVENT),
            ArgValue::from(MAKER),
            ArgValue::from(u128::from(u64::MAX) + 1),
        ]);
        assert!(matches!(
            normalize(&SIG, &wide),
            Err(ArgumentError::InvalidValue { param: "fee", .. })
        ));
    }

    #[test]
    fn hex_numeric_strings_are_accepted() {
        let values = normalize(&SIG, &CallArgs::positional([EVENT, MAKER, "0xc350"])).unwrap();
        assert_eq!(values[2], AbiValue::Uint(U256::from(50_000u64)));
    }

    #[test]
    fn malformed_addresses_are_rejected() {
        for bad in ["0x1234", "1111111111111111111111111111111111111111", "0xzz11111111111111111111111111111111111111"] {
            let err = normalize(&SIG, &CallArgs::positional([bad, MAKER, "1"])).unwrap_err();
            assert!(
                matches!(err, ArgumentError::InvalidValue { param: "eventContract", .. }),
                "{bad} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn integer_for_address_is_rejected() {
        let args = CallArgs::positional([ArgValue::from(7u64), ArgValue::from(MAKER), ArgValue::from(1u32)]);
        assert!(matches!(
            normalize(&SIG, &args),
            Err(ArgumentError::InvalidValue { param: "eventContract", .. })
        ));
    }

    #[test]
    fn builds_from_contract_function() {
        let f = MARKET_FACTORY.function("createMarket").unwrap();
        let sig = Signature::from(f);
        assert_eq!(sig.params.len(), 3);
        assert!(sig.aliases.is_empty());
    }
}

//! Canonical test configurations.
//!
//! Single source of truth for the TOML used across config and bootstrap
//! tests.

use super::domain::address_str;

/// Address byte of the configured market factory.
pub const FACTORY: u8 = 0xfa;
/// Address byte of the configured market maker.
pub const MARKET_MAKER: u8 = 0xaa;

/// A complete, valid configuration pointing at a local node.
pub fn valid_toml() -> String {
    format!(
        r#"
[network]
rpc_url = "http://127.0.0.1:8545"
chain_id = 31337

[contracts]
market_factory = "{}"
market_maker = "{}"

[execution]
confirmation_timeout_secs = 30
buy_approval = "cost"

[logging]
level = "debug"
format = "json"
"#,
        address_str(FACTORY),
        address_str(MARKET_MAKER)
    )
}

/// Only the required settings; everything else defaulted.
pub fn minimal_toml() -> String {
    format!(
        r#"
[network]
rpc_url = "http://127.0.0.1:8545"

[contracts]
market_factory = "{}"
market_maker = "{}"
"#,
        address_str(FACTORY),
        address_str(MARKET_MAKER)
    )
}

mod support;

use std::time::Duration;

use pmkit::application::BuyApproval;
use pmkit::error::{ConfigError, Error};
use pmkit::infrastructure::config::settings::Config;
use pmkit::testkit::config::{minimal_toml, valid_toml, FACTORY, MARKET_MAKER};
use pmkit::testkit::domain::address;

use support::config::write_temp_config;

#[test]
fn config_loads_complete_file() {
    let file = write_temp_config(&valid_toml());
    let config = Config::load(file.path()).expect("valid config");

    assert_eq!(config.network.chain_id, 31337);
    assert_eq!(config.rpc_url().unwrap().as_str(), "http://127.0.0.1:8545/");
    assert_eq!(config.confirmation_timeout(), Duration::from_secs(30));
    assert_eq!(config.execution.buy_approval, BuyApproval::Cost);
    assert_eq!(config.logging.format, "json");

    let contracts = config.contracts().unwrap();
    assert_eq!(contracts.market_factory, address(FACTORY));
    assert_eq!(contracts.market_maker, address(MARKET_MAKER));
}

#[test]
fn config_applies_defaults() {
    let config = Config::parse_toml(&minimal_toml()).expect("minimal config");

    assert_eq!(config.network.chain_id, 1);
    assert_eq!(config.confirmation_timeout(), Duration::from_secs(120));
    assert_eq!(config.execution.buy_approval, BuyApproval::TokenCount);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, "pretty");
    assert!(config.wallet.keystore_path.is_none());
}

#[test]
fn config_rejects_missing_rpc_url() {
    let toml = minimal_toml().replace("rpc_url = \"http://127.0.0.1:8545\"", "");

    assert!(
        matches!(
            Config::parse_toml(&toml),
            Err(Error::Config(ConfigError::MissingField { field: "rpc_url" }))
        ),
        "Expected missing rpc_url to be rejected"
    );
}

#[test]
fn config_rejects_websocket_rpc_url() {
    let toml = minimal_toml().replace("http://127.0.0.1:8545", "ws://127.0.0.1:8546");

    match Config::parse_toml(&toml) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "rpc_url", ..
        })) => {}
        Err(err) => panic!("Expected invalid rpc_url error, got {err}"),
        Ok(_) => panic!("Expected ws:// rpc_url to be rejected"),
    }
}

#[test]
fn config_rejects_unparseable_rpc_url() {
    let toml = minimal_toml().replace("http://127.0.0.1:8545", "not a url");

    match Config::parse_toml(&toml) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "rpc_url", ..
        })) => {}
        Err(err) => panic!("Expected invalid rpc_url error, got {err}"),
        Ok(_) => panic!("Expected unparseable rpc_url to be rejected"),
    }
}

#[test]
fn config_rejects_malformed_contract_address() {
    let toml = minimal_toml().replace(&address(MARKET_MAKER).to_string(), "0x1234");

    assert!(matches!(
        Config::parse_toml(&toml),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "market_maker",
            ..
        }))
    ));
}

#[test]
fn config_rejects_missing_market_factory() {
    let toml = minimal_toml().replace(
        &format!("market_factory = \"{}\"", address(FACTORY)),
        "",
    );

    assert!(matches!(
        Config::parse_toml(&toml),
        Err(Error::Config(ConfigError::MissingField {
            field: "market_factory"
        }))
    ));
}

#[test]
fn config_rejects_zero_confirmation_timeout() {
    let toml = format!("{}\n[execution]\nconfirmation_timeout_secs = 0\n", minimal_toml());

    assert!(matches!(
        Config::parse_toml(&toml),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "confirmation_timeout_secs",
            ..
        }))
    ));
}

#[test]
fn config_rejects_unknown_buy_approval() {
    let toml = format!("{}\n[execution]\nbuy_approval = \"everything\"\n", minimal_toml());

    assert!(matches!(
        Config::parse_toml(&toml),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn config_rejects_unknown_log_format() {
    let toml = format!("{}\n[logging]\nformat = \"xml\"\n", minimal_toml());

    assert!(matches!(
        Config::parse_toml(&toml),
        Err(Error::Config(ConfigError::InvalidValue { field: "format", .. }))
    ));
}

#[test]
fn config_load_reports_missing_file() {
    let result = Config::load("/nonexistent/pmkit/config.toml");
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn config_requires_keystore_password() {
    if std::env::var_os("WALLET_PRIVATE_KEY").is_some()
        || std::env::var_os("PMKIT_KEYSTORE_PASSWORD").is_some()
        || std::env::var_os("PMKIT_KEYSTORE_PASSWORD_FILE").is_some()
    {
        return;
    }
    let toml = format!("{}\n[wallet]\nkeystore_path = \"/tmp/keystore.json\"\n", minimal_toml());

    assert!(matches!(
        Config::parse_toml(&toml),
        Err(Error::Config(ConfigError::MissingField {
            field: "PMKIT_KEYSTORE_PASSWORD"
        }))
    ));
}

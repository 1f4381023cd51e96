use std::sync::Arc;
use std::time::Duration;

use pmkit::domain::protocol::method;
use pmkit::domain::CallArgs;
use pmkit::error::{DispatchError, Error};
use pmkit::infrastructure::bootstrap::{build_operations, call_context};
use pmkit::infrastructure::config::settings::Config;
use pmkit::testkit::config::{valid_toml, FACTORY};
use pmkit::testkit::domain::{address, address_str, market_creation};
use pmkit::testkit::gateway::{Outcome, ScriptedGateway};

#[tokio::test]
async fn operations_target_configured_factory() {
    let config = Config::parse_toml(&valid_toml()).unwrap();
    let gateway = Arc::new(ScriptedGateway::new().with_events(
        method::CREATE_MARKET,
        vec![market_creation(address(FACTORY), address(0x01), address(0x99))],
    ));
    let ops = build_operations(&config, gateway.clone()).unwrap();

    let args = CallArgs::positional([address_str(0x22), address_str(0x23), "0".to_string()]);
    let market = ops
        .create_market(&call_context(address(0x01), None), &args)
        .await
        .unwrap();

    assert_eq!(market.address(), address(0x99));
    let submission = gateway.last_submission(method::CREATE_MARKET).unwrap();
    assert_eq!(submission.call.target.address(), address(FACTORY));
    assert_eq!(submission.from, address(0x01));
}

#[tokio::test]
async fn per_call_timeout_overrides_configured_bound() {
    let config = Config::parse_toml(&valid_toml()).unwrap();
    let gateway = Arc::new(
        ScriptedGateway::new().with_outcome(method::CREATE_MARKET, Outcome::Pending),
    );
    let ops = build_operations(&config, gateway).unwrap();

    let ctx = call_context(address(0x01), Some(Duration::from_millis(20)));
    assert_eq!(ctx.timeout, Some(Duration::from_millis(20)));

    let args = CallArgs::positional([address_str(0x22), address_str(0x23), "0".to_string()]);
    let err = ops.create_market(&ctx, &args).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Dispatch(DispatchError::ConfirmationTimeout { .. })
    ));
}

#[test]
fn call_context_without_override_uses_default() {
    let ctx = call_context(address(0x01), None);
    assert_eq!(ctx.from, address(0x01));
    assert!(ctx.timeout.is_none());
}

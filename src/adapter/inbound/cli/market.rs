//! Handlers for the market operation subcommands.

use crate::adapter::inbound::cli::command::{CreateMarketArgs, TradeArgs, TransactionArgs};
use crate::adapter::inbound::cli::output;
use crate::domain::CallArgs;
use crate::error::Result;
use crate::infrastructure::bootstrap::Runtime;
use crate::infrastructure::config::settings::Config;

/// Which trade a [`TradeArgs`] invocation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeKind {
    Buy,
    Sell,
    ShortSell,
}

impl TradeKind {
    fn title(self) -> &'static str {
        match self {
            Self::Buy => "Buy Outcome Tokens",
            Self::Sell => "Sell Outcome Tokens",
            Self::ShortSell => "Short-Sell Outcome Tokens",
        }
    }

    fn result_label(self) -> &'static str {
        match self {
            Self::Buy | Self::ShortSell => "Cost",
            Self::Sell => "Profit",
        }
    }
}

fn runtime(tx: &TransactionArgs) -> Result<Runtime> {
    let config = Config::load(&tx.config)?;
    config.init_logging();
    Runtime::from_config(&config)
}

/// Create a market and print its address.
pub async fn execute_create_market(args: &CreateMarketArgs) -> Result<()> {
    let runtime = runtime(&args.tx)?;
    let ctx = runtime.context(args.tx.timeout());

    output::section("Create Market");
    output::field("Event", &args.event);
    output::field("Maker", &args.market_maker);
    output::field("Fee", &args.fee);
    output::field("Sender", ctx.from);

    let call_args = CallArgs::named()
        .with("event", args.event.as_str())
        .with("marketMaker", args.market_maker.as_str())
        .with("fee", args.fee.as_str());
    let market = runtime.operations.create_market(&ctx, &call_args).await?;

    output::success("Market created");
    output::result("Market", market.address());
    Ok(())
}

/// Run a buy, sell or short-sell and print the settled amount.
pub async fn execute_trade(kind: TradeKind, args: &TradeArgs) -> Result<()> {
    let runtime = runtime(&args.tx)?;
    let ctx = runtime.context(args.tx.timeout());

    output::section(kind.title());
    output::field("Market", &args.market);
    output::field("Outcome", &args.index);
    output::field("Count", &args.count);
    output::field("Sender", ctx.from);

    let call_args = CallArgs::named()
        .with("market", args.market.as_str())
        .with("outcomeTokenIndex", args.index.as_str())
        .with("outcomeTokenCount", args.count.as_str());
    let operations = &runtime.operations;
    let amount = match kind {
        TradeKind::Buy => operations.buy_outcome_tokens(&ctx, &call_args).await?,
        TradeKind::Sell => operations.sell_outcome_tokens(&ctx, &call_args).await?,
        TradeKind::ShortSell => operations.short_sell_outcome_tokens(&ctx, &call_args).await?,
    };

    output::success("Transaction confirmed");
    output::result(kind.result_label(), amount);
    Ok(())
}

//! Command-line interface definitions.
//!
//! Defines the CLI structure for the pmkit binary using `clap`. Each market
//! operation is a subcommand; every subcommand loads its own configuration
//! file so one invocation runs exactly one operation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Prediction-market contract client
#[derive(Parser, Debug)]
#[command(name = "pmkit")]
#[command(version, about)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a market for an event contract
    CreateMarket(CreateMarketArgs),

    /// Buy outcome tokens, paying at most the quoted cost plus fee
    Buy(TradeArgs),

    /// Sell outcome tokens, accepting at least the quoted profit minus fee
    Sell(TradeArgs),

    /// Short-sell outcome tokens
    ShortSell(TradeArgs),

    /// Display the wallet address derived from the configured key
    Address(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Options common to every command that submits transactions.
#[derive(Parser, Debug)]
pub struct TransactionArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override the confirmation timeout, in seconds.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,
}

impl TransactionArgs {
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Arguments for the `create-market` subcommand.
///
/// Values are passed through as text and validated by the argument
/// normalizer, so hex and decimal forms are both accepted.
#[derive(Parser, Debug)]
pub struct CreateMarketArgs {
    #[command(flatten)]
    pub tx: TransactionArgs,

    /// Address of the event contract the market trades.
    #[arg(long)]
    pub event: String,

    /// Address of the pricing contract.
    #[arg(long)]
    pub market_maker: String,

    /// Market fee in parts per million (50000 = 5%).
    #[arg(long)]
    pub fee: String,
}

/// Arguments for the `buy`, `sell` and `short-sell` subcommands.
#[derive(Parser, Debug)]
pub struct TradeArgs {
    #[command(flatten)]
    pub tx: TransactionArgs,

    /// Address of the market contract.
    #[arg(long)]
    pub market: String,

    /// Outcome index within the event.
    #[arg(long)]
    pub index: String,

    /// Number of outcome tokens, in base units.
    #[arg(long)]
    pub count: String,
}

use clap::Parser;
use pmkit::adapter::inbound::cli::command::{Cli, Commands};
use pmkit::adapter::inbound::cli::market::{execute_create_market, execute_trade, TradeKind};
use pmkit::adapter::inbound::cli::output::{self, OutputConfig};
use pmkit::adapter::inbound::cli::wallet::execute_address;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet), &cli.color);

    let result = tokio::select! {
        result = run(cli.command) => result,
        _ = signal::ctrl_c() => {
            info!("Interrupted; a submitted transaction may still be mined");
            output::warning("Interrupted");
            output::note("A submitted transaction may still be mined");
            std::process::exit(130);
        }
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> pmkit::error::Result<()> {
    match command {
        Commands::CreateMarket(args) => execute_create_market(&args).await,
        Commands::Buy(args) => execute_trade(TradeKind::Buy, &args).await,
        Commands::Sell(args) => execute_trade(TradeKind::Sell, &args).await,
        Commands::ShortSell(args) => execute_trade(TradeKind::ShortSell, &args).await,
        Commands::Address(args) => execute_address(&args.config),
    }
}

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::infrastructure::bootstrap::build_gateway;
use crate::infrastructure::config::settings::Config;
use crate::error::Result;

/// Show the wallet address derived from the configured key material.
pub fn execute_address(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let gateway = build_gateway(&config)?;

    output::section("Wallet Address");
    output::result("Address", gateway.signer_address());
    Ok(())
}

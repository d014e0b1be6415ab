use crate::adapter::inbound::cli::output;
use crate::error::{Result, WriteError};
use crate::infrastructure::config::Config;
use crate::infrastructure::wallet::WalletService;

/// Print the signing address without touching the network.
pub fn execute_address(config: &Config) -> Result<()> {
    let address = WalletService::address(&config.wallet)?.ok_or(WriteError::ReadOnly)?;

    if output::is_json() {
        output::json_output(serde_json::json!({ "address": address.to_string() }));
        return Ok(());
    }
    output::section("Wallet");
    output::field("Address", output::highlight(address));
    Ok(())
}

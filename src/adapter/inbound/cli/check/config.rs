use std::path::Path;

use crate::adapter::inbound::cli::{format, output, paths};
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::infrastructure::wallet::WalletService;

/// Validate the configuration file and print the effective settings.
pub fn execute_config(path: &Path) -> Result<()> {
    output::section("Configuration Check");
    output::field("File", path.display());
    if !path.exists() {
        output::note("File not found, using built-in defaults");
    }

    let config = match Config::load_or_default(path) {
        Ok(config) => config,
        Err(e) => {
            output::error(&format!("Invalid configuration: {e}"));
            return Err(e);
        }
    };

    output::field("Chain ID", config.network.chain_id);
    output::field("RPC endpoints", config.network.rpc_urls.len());
    output::field("Contract", config.contract.address);
    output::field("vPLS token", config.contract.token_address);
    output::field("Issue fee", format::percent(config.fees.issue_fee));
    output::field("Redeem fee", format::percent(config.fees.redeem_fee));
    output::field("Min issue", format!("{} vPLS", config.fees.min_issue));

    match WalletService::address(&config.wallet)? {
        Some(address) => output::field("Wallet", output::highlight(address)),
        None => {
            output::field("Wallet", output::muted("not configured (read-only)"));
            output::hint(&format!(
                "set WALLET_PRIVATE_KEY, or keystore_path under [wallet] (e.g. {})",
                paths::keystore_dir().join("plstr.json").display()
            ));
        }
    }

    output::success("Configuration valid");
    Ok(())
}

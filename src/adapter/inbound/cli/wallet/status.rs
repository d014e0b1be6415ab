use crate::adapter::inbound::cli::{format, output};
use crate::domain::Amount;
use crate::error::{ReadError, Result, WriteError};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;
use crate::infrastructure::wallet::WalletService;

/// Show balances and the vPLS allowance granted to the share contract.
pub async fn execute_status(config: &Config) -> Result<()> {
    let pb = output::spinner("Fetching balances...");
    let session = match bootstrap::connect(config).await {
        Ok(session) => session,
        Err(e) => {
            output::spinner_fail(&pb, "Connection failed");
            return Err(e);
        }
    };
    let Some(account) = session.connection.account else {
        output::spinner_fail(&pb, "No wallet configured");
        return Err(WriteError::ReadOnly.into());
    };
    let status = WalletService::status(&*session.contract, account).await;
    output::spinner_success(&pb, "Fetched balances");

    let decimals = config.fees.display_decimals;
    let show = |value: &std::result::Result<Amount, ReadError>, symbol: &str| match value {
        Ok(amount) => format::tokens(*amount, decimals, symbol),
        Err(e) => {
            output::warning(&format!("{e}"));
            output::negative("unavailable")
        }
    };

    output::section("Wallet Status");
    output::field("Address", output::highlight(status.address));
    output::field("vPLS", show(&status.vpls_balance, "vPLS"));
    output::field("PLSTR", show(&status.plstr_balance, "PLSTR"));
    output::field("Allowance", show(&status.allowance, "vPLS"));
    output::note("Issue and deposit approve the exact amount each time");
    Ok(())
}

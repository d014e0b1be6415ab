//! `plstr info`: contract, owner and account state.

use std::fmt::Display;

use chrono::Utc;

use super::{format, output};
use crate::application::{dashboard, DashboardSnapshot};
use crate::domain::{Amount, ConnectionHandle};
use crate::error::{ReadError, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;
use crate::port::ShareContract;

pub async fn execute(config: &Config) -> Result<()> {
    let pb = output::spinner("Connecting...");
    let session = match bootstrap::connect(config).await {
        Ok(session) => {
            output::spinner_success(&pb, "Connected");
            session
        }
        Err(e) => {
            output::spinner_fail(&pb, "Connection failed");
            return Err(e);
        }
    };

    let pb = output::spinner("Reading contract state...");
    let snapshot = dashboard::snapshot(&*session.contract, session.connection.account).await;
    pb.finish_and_clear();

    render_connection(&session.connection, session.contract.address());
    render(&snapshot, config.fees.display_decimals);
    Ok(())
}

pub(super) fn render_connection(connection: &ConnectionHandle, contract: impl Display) {
    output::section("Connection");
    output::field("Network", connection.network_name());
    output::field("Provider", connection.kind);
    output::field("Endpoint", &connection.url);
    if let Some(height) = connection.block_height {
        output::field("Block", height);
    }
    output::field("Contract", contract);
    match connection.account {
        Some(account) => output::field("Account", output::highlight(account)),
        None => output::field("Account", output::muted("read-only")),
    }
    if connection.chain_mismatch {
        output::warning("Endpoint reports a different chain than configured");
    }
}

/// Render a snapshot. Each field that failed to read shows as unavailable.
pub(super) fn render(snapshot: &DashboardSnapshot, decimals: u32) {
    let amount = |value: &std::result::Result<Amount, ReadError>, symbol: &str| {
        show(value.as_ref().map(|a| format::tokens(*a, decimals, symbol)))
    };

    output::section("Contract");
    output::field(
        "Backing",
        show(
            snapshot
                .contract_info
                .as_ref()
                .map(|info| format::tokens(info.balance, decimals, "vPLS")),
        ),
    );
    output::field(
        "Issuance",
        show(snapshot.contract_info.as_ref().map(|info| {
            if info.issuance_open() {
                format!(
                    "open, {} left ({:.1} days)",
                    format::duration(info.remaining_issuance_period),
                    info.remaining_issuance_days()
                )
            } else {
                "closed".to_string()
            }
        })),
    );
    output::field(
        "Backing ratio",
        show(snapshot.backing_ratio.as_ref().map(|ratio| {
            ratio
                .to_decimal()
                .map_or_else(|| ratio.to_string(), |r| format::round(r, 6).to_string())
        })),
    );
    output::field("Owner", show(snapshot.owner.as_ref().map(ToString::to_string)));

    if snapshot.is_owner() == Some(true) {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
        output::section("Owner");
        output::field(
            "Next mint",
            show(
                snapshot
                    .owner_mint_info
                    .as_ref()
                    .map(|info| format::duration(info.remaining_at(now))),
            ),
        );
        output::field(
            "Issuance left",
            show(
                snapshot
                    .contract_info
                    .as_ref()
                    .map(|info| format::duration(info.remaining_issuance_period)),
            ),
        );
    }

    if let Some(account) = &snapshot.account {
        output::section("Account");
        output::field("PLSTR", amount(&account.plstr_balance, "PLSTR"));
        output::field("vPLS", amount(&account.vpls_balance, "vPLS"));
        output::field("Redeem value", amount(&account.redeem_value, "vPLS"));
        output::field("Redeemable vPLS", amount(&account.redeemable_vpls, "vPLS"));
        output::field("Share", amount(&account.share_info, "PLSTR"));
    } else {
        output::hint("set WALLET_PRIVATE_KEY to see account balances");
    }

    for error in snapshot.errors() {
        output::warning(&error.to_string());
    }
}

fn show(value: std::result::Result<String, &ReadError>) -> String {
    value.unwrap_or_else(|_| output::negative("unavailable"))
}

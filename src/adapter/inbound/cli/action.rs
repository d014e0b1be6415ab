//! Write commands: `issue`, `redeem` and `admin *`.

use chrono::Utc;
use dialoguer::Confirm;

use super::{format, info, output};
use crate::application::{issue_estimate, ActionOutcome};
use crate::domain::{ActionKind, ActionRequest, PreparedAction, WriteCall};
use crate::error::{Result, WriteError};
use crate::infrastructure::bootstrap::{self, Session};
use crate::infrastructure::config::Config;
use crate::port::ShareContract;

/// Validate, confirm and submit one action.
pub async fn execute(config: &Config, request: ActionRequest, skip_confirm: bool) -> Result<()> {
    let kind = request.kind();
    // Validate before touching the network.
    let prepared = request.prepare(config.contract.address, &config.fees.action_limits())?;

    output::section(title(kind));
    describe(config, &request, &prepared);

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
    if !session.connection.can_sign() {
        return Err(WriteError::ReadOnly.into());
    }
    if session.connection.chain_mismatch {
        output::warning("Endpoint reports a different chain than configured");
    }
    match kind {
        ActionKind::Issue => show_redeemable_vpls(&session, config.fees.display_decimals).await,
        ActionKind::Mint => show_mint_cooldown(&session).await,
        _ => {}
    }

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Submit {kind}?"))
            .default(false)
            .interact()?;
        if !confirmed {
            output::warning("Cancelled by user");
            return Ok(());
        }
    }

    let executor = session.executor(config);
    let message = if prepared.approval.is_some() {
        "Approving vPLS, then submitting..."
    } else {
        "Submitting transaction..."
    };
    let pb = output::spinner(message);
    match executor.execute(request).await {
        Ok(outcome) => {
            output::spinner_success(&pb, "Transaction confirmed");
            report(&outcome, config.fees.display_decimals);
            Ok(())
        }
        Err(e) => {
            output::spinner_fail(&pb, "Transaction failed");
            Err(e)
        }
    }
}

fn title(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Issue => "Issue PLSTR",
        ActionKind::Redeem => "Redeem PLSTR",
        ActionKind::Deposit => "Deposit vPLS",
        ActionKind::Mint => "Mint PLSTR",
        ActionKind::Recover => "Recover tokens",
        ActionKind::TransferOwnership => "Transfer ownership",
    }
}

fn describe(config: &Config, request: &ActionRequest, prepared: &PreparedAction) {
    let decimals = config.fees.display_decimals;
    match &prepared.primary {
        WriteCall::IssueShares { amount } => {
            output::field("Deposit", format::tokens(*amount, decimals, "vPLS"));
            if let ActionRequest::Issue { amount: input } = request {
                let estimate = issue_estimate(&config.fees, input).rounded(decimals);
                output::field("Fee", format!("{} vPLS", estimate.fee));
                output::field("You receive", output::positive(format!("~{} PLSTR", estimate.net)));
            }
        }
        WriteCall::RedeemShares { amount } => {
            output::field("Redeem", format::tokens(*amount, decimals, "PLSTR"));
        }
        WriteCall::DepositStakedPls { amount } => {
            output::field("Deposit", format::tokens(*amount, decimals, "vPLS"));
        }
        WriteCall::MintShares { amount } => {
            output::field("Mint", format::tokens(*amount, decimals, "PLSTR"));
        }
        WriteCall::RecoverTokens {
            token,
            recipient,
            amount,
        } => {
            output::field("Token", token);
            output::field("Recipient", recipient);
            output::field("Amount", amount);
        }
        WriteCall::TransferOwnership { new_owner } => {
            output::field("New owner", output::highlight(new_owner));
            output::warning("This hands over every admin permission and cannot be undone by you");
        }
        WriteCall::ApproveToken { .. } => {}
    }
    if let Some(WriteCall::ApproveToken { amount, .. }) = &prepared.approval {
        output::note(&format!(
            "Approves exactly {} for the contract first",
            format::tokens(*amount, decimals, "vPLS")
        ));
    }
}

async fn show_redeemable_vpls(session: &Session, decimals: u32) {
    let Some(account) = session.connection.account else {
        return;
    };
    match session.contract.redeemable_vpls(account).await {
        Ok(amount) => output::field("Your vPLS", format::tokens(amount, decimals, "vPLS")),
        Err(e) => output::warning(&format!("vPLS balance unavailable: {e}")),
    }
}

/// The contract enforces the cooldown; this only informs.
async fn show_mint_cooldown(session: &Session) {
    let (mint_info, contract_info) = tokio::join!(
        session.contract.owner_mint_info(),
        session.contract.contract_info(),
    );
    let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
    match mint_info {
        Ok(info) if info.remaining_at(now) > 0 => output::warning(&format!(
            "Next owner mint opens in {}; the contract may reject this",
            format::duration(info.remaining_at(now))
        )),
        Ok(_) => output::field("Mint window", output::positive("open")),
        Err(e) => output::warning(&format!("Mint cooldown unavailable: {e}")),
    }
    if let Ok(info) = contract_info {
        output::field("Issuance left", format::duration(info.remaining_issuance_period));
    }
}

fn report(outcome: &ActionOutcome, decimals: u32) {
    if let Some(approval) = &outcome.approval {
        output::field("Approval tx", &approval.tx_hash);
    }
    output::field("Transaction", &outcome.receipt.tx_hash);
    if let Some(block) = outcome.receipt.block_number {
        output::field("Block", block);
    }
    output::success(&format!("{} confirmed", outcome.kind));
    info::render(&outcome.snapshot, decimals);
}

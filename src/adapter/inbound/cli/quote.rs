//! `plstr quote`: fee and proceeds estimates.

use super::{format, output};
use crate::application::{issue_estimate, redeem_quote};
use crate::domain::{ActionLimits, Amount};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;

/// Issue quotes are computed locally and need no connection.
pub fn execute_issue(config: &Config, input: &str) {
    let fees = &config.fees;
    let result = issue_estimate(fees, input).rounded(fees.display_decimals);

    output::section("Issue quote");
    output::field("Deposit", format!("{} vPLS", input.trim()));
    output::field("Fee", format!("{} vPLS ({})", result.fee, format::percent(fees.issue_fee)));
    output::field("You receive", output::positive(format!("{} PLSTR", result.net)));

    warn_below_minimum(input, &fees.action_limits());
}

/// Redeem quotes use the live backing ratio.
pub async fn execute_redeem(config: &Config, input: &str) -> Result<()> {
    let session = bootstrap::connect(config).await?;
    let fees = &config.fees;
    let quote = redeem_quote(
        &*session.contract,
        fees,
        session.connection.account,
        input,
    )
    .await;
    let estimate = quote.estimate.rounded(fees.display_decimals);

    output::section("Redeem quote");
    output::field("Redeem", format!("{} PLSTR", input.trim()));
    match &quote.ratio {
        Ok(ratio) => output::field("Backing ratio", format::round(*ratio, 6)),
        Err(e) => output::warning(&format!("Backing ratio unavailable: {e}")),
    }
    output::field("Fee", format!("{} PLSTR ({})", estimate.fee, format::percent(fees.redeem_fee)));
    output::field("Estimated", output::positive(format!("{} vPLS", estimate.net)));

    match quote.on_chain {
        Some(Ok(amount)) => output::field(
            "Contract quote",
            format::tokens(amount, fees.display_decimals, "vPLS"),
        ),
        Some(Err(e)) => output::warning(&format!("Contract quote unavailable: {e}")),
        None => {}
    }
    Ok(())
}

fn warn_below_minimum(input: &str, limits: &ActionLimits) {
    if let Ok(amount) = Amount::parse(input) {
        if !amount.is_zero() && amount < limits.min_issue {
            output::warning(&format!(
                "{amount} vPLS is below the issuance minimum of {} vPLS",
                limits.min_issue
            ));
        }
    }
}

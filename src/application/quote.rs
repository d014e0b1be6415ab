//! Issue and redeem quotes shown before submitting.

use alloy_primitives::Address;
use rust_decimal::Decimal;

use crate::domain::{estimate, Amount, EstimateResult, FeeSchedule};
use crate::error::ReadError;
use crate::infrastructure::config::FeesConfig;
use crate::port::ShareContract;

/// Fixed-fee estimate for issuing PLSTR from vPLS.
#[must_use]
pub fn issue_estimate(fees: &FeesConfig, input: &str) -> EstimateResult {
    estimate(
        input,
        FeeSchedule::Fixed {
            fee_rate: fees.issue_fee,
        },
    )
}

/// Redeem quote: a local estimate from the live backing ratio, and the
/// contract's own figure when an account is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemQuote {
    pub ratio: Result<Decimal, ReadError>,
    pub estimate: EstimateResult,
    pub on_chain: Option<Result<Amount, ReadError>>,
}

pub async fn redeem_quote<C>(
    contract: &C,
    fees: &FeesConfig,
    account: Option<Address>,
    input: &str,
) -> RedeemQuote
where
    C: ShareContract + ?Sized,
{
    let ratio = contract.backing_ratio().await.and_then(|raw| {
        raw.to_decimal()
            .ok_or_else(|| ReadError::rpc("getVPLSBackingRatio", "ratio out of range"))
    });

    let estimate = match &ratio {
        Ok(ratio) => estimate(
            input,
            FeeSchedule::Ratio {
                fee_rate: fees.redeem_fee,
                ratio: *ratio,
            },
        ),
        Err(_) => EstimateResult::ZERO,
    };

    let shares = Amount::parse(input).ok().filter(|amount| !amount.is_zero());
    let on_chain = match (account, shares) {
        (Some(account), Some(shares)) => {
            Some(contract.redeemable_staked_pls(account, shares).await)
        }
        _ => None,
    };

    RedeemQuote {
        ratio,
        estimate,
        on_chain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn issue_estimate_uses_configured_fee() {
        let fees = FeesConfig::default();
        let result = issue_estimate(&fees, "1000").rounded(fees.display_decimals);
        assert_eq!(result.fee, dec!(5));
        assert_eq!(result.net, dec!(995));
    }
}

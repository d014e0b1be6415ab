//! Quote estimation for issue and redeem inputs.
//!
//! Estimates are a display aid only. Malformed input yields a zero result
//! instead of an error, and nothing here is ever submitted on-chain: writes use
//! the full-precision [`Amount`](super::amount::Amount) parsed from the raw input.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

/// How the net amount is derived from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeSchedule {
    /// `fee = amount * fee_rate`, `net = amount - fee`.
    Fixed { fee_rate: Decimal },
    /// `fee = amount * fee_rate`, `net = amount * (1 - fee_rate) * ratio`.
    Ratio { fee_rate: Decimal, ratio: Decimal },
}

/// Fee and net amount for a given input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EstimateResult {
    pub fee: Decimal,
    pub net: Decimal,
}

impl EstimateResult {
    pub const ZERO: Self = Self {
        fee: Decimal::ZERO,
        net: Decimal::ZERO,
    };

    /// Round both values for display and drop trailing zeros.
    #[must_use]
    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            fee: self.fee.round_dp(decimals).normalize(),
            net: self.net.round_dp(decimals).normalize(),
        }
    }
}

/// Compute an estimate from raw user input.
#[must_use]
pub fn estimate(input: &str, schedule: FeeSchedule) -> EstimateResult {
    let Some(amount) = parse_input(input) else {
        return EstimateResult::ZERO;
    };
    compute(amount, schedule).unwrap_or(EstimateResult::ZERO)
}

fn parse_input(input: &str) -> Option<Decimal> {
    let amount = Decimal::from_str(input.trim()).ok()?;
    (!amount.is_sign_negative()).then_some(amount)
}

fn compute(amount: Decimal, schedule: FeeSchedule) -> Option<EstimateResult> {
    match schedule {
        FeeSchedule::Fixed { fee_rate } => {
            let fee = amount.checked_mul(fee_rate)?;
            let net = amount.checked_sub(fee)?;
            Some(EstimateResult { fee, net })
        }
        FeeSchedule::Ratio { fee_rate, ratio } => {
            let fee = amount.checked_mul(fee_rate)?;
            let effective = amount.checked_mul(Decimal::ONE.checked_sub(fee_rate)?)?;
            let net = effective.checked_mul(ratio)?;
            Some(EstimateResult { fee, net })
        }
    }
    .filter(|result| !result.net.is_sign_negative())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn half_percent() -> FeeSchedule {
        FeeSchedule::Fixed {
            fee_rate: dec!(0.005),
        }
    }

    #[test]
    fn fixed_fee_example() {
        let result = estimate("1000", half_percent()).rounded(3);
        assert_eq!(result.fee.to_string(), "5");
        assert_eq!(result.net.to_string(), "995");
    }

    #[test]
    fn fixed_fee_parts_sum_to_input() {
        for input in ["1", "1005", "0.123456789", "98765.4321", "0"] {
            let result = estimate(input, half_percent());
            let amount = Decimal::from_str(input).unwrap();
            assert_eq!(result.fee + result.net, amount, "input {input}");
        }
    }

    #[test]
    fn bad_input_is_zero() {
        for input in ["", "abc", "-5", "0", "1e9999"] {
            assert_eq!(estimate(input, half_percent()), EstimateResult::ZERO, "{input}");
        }
    }

    #[test]
    fn ratio_applies_fee_before_ratio() {
        let schedule = FeeSchedule::Ratio {
            fee_rate: dec!(0.005),
            ratio: dec!(2),
        };
        let result = estimate("100", schedule);
        assert_eq!(result.fee, dec!(0.5));
        assert_eq!(result.net, dec!(199));
    }

    #[test]
    fn rounding_is_display_only() {
        let result = estimate("1.23456", half_percent());
        assert_eq!(result.rounded(3).fee, dec!(0.006));
        assert_eq!(result.fee, dec!(0.0061728));
    }
}

//! Value formatting shared by CLI handlers.

use rust_decimal::Decimal;

use crate::domain::contract::SECONDS_PER_DAY;
use crate::domain::Amount;

/// Token amount rounded to `decimals` places, e.g. `1234.568 vPLS`.
pub fn tokens(amount: Amount, decimals: u32, symbol: &str) -> String {
    match amount.to_decimal() {
        Some(value) => format!("{} {symbol}", round(value, decimals)),
        None => format!("{amount} {symbol}"),
    }
}

/// Decimal rounded to `decimals` places without trailing zeros.
pub fn round(value: Decimal, decimals: u32) -> Decimal {
    value.round_dp(decimals).normalize()
}

/// Fee rate as a percentage, e.g. `0.5%`.
pub fn percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

/// Compact duration such as `2d 3h 15m`, or `now` for zero.
pub fn duration(seconds: u64) -> String {
    if seconds == 0 {
        return "now".to_string();
    }
    let days = seconds / SECONDS_PER_DAY;
    let hours = (seconds % SECONDS_PER_DAY) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 || parts.is_empty() {
        parts.push(format!("{}m", minutes.max(1)));
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn tokens_round_to_display_decimals() {
        let amount = Amount::parse("1234.56789").unwrap();
        assert_eq!(tokens(amount, 3, "vPLS"), "1234.568 vPLS");
        assert_eq!(tokens(Amount::from_tokens(995), 3, "PLSTR"), "995 PLSTR");
    }

    #[test]
    fn percent_drops_trailing_zeros() {
        assert_eq!(percent(dec!(0.005)), "0.5%");
        assert_eq!(percent(dec!(0)), "0%");
    }

    #[test]
    fn duration_is_compact() {
        assert_eq!(duration(0), "now");
        assert_eq!(duration(30), "1m");
        assert_eq!(duration(2 * SECONDS_PER_DAY + 3 * 3_600 + 15 * 60), "2d 3h 15m");
        assert_eq!(duration(SECONDS_PER_DAY), "1d");
    }
}

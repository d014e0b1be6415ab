//! Fixed-point token amounts.
//!
//! Both PLSTR and vPLS use 18 decimals. [`Amount`] stores the integer value in
//! the smallest unit, so parsing a decimal string and formatting it back is
//! exact at 18-decimal granularity.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// Number of decimals used by the share and backing tokens.
pub const DECIMALS: usize = 18;

const UNIT: u64 = 1_000_000_000_000_000_000;

fn unit() -> U256 {
    U256::from(UNIT)
}

/// Non-negative token quantity in the smallest unit (wei-like).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(U256);

impl Amount {
    pub const ZERO: Self = Self(U256::ZERO);

    /// Wrap a raw integer value already expressed in the smallest unit.
    #[must_use]
    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// Whole tokens, e.g. `from_tokens(1005)` is 1005 * 10^18 units.
    #[must_use]
    pub fn from_tokens(whole: u64) -> Self {
        Self(U256::from(whole) * unit())
    }

    #[must_use]
    pub const fn raw(self) -> U256 {
        self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parse a human-readable decimal string (`"1000"`, `"0.5"`, `"12."`).
    ///
    /// Signs, exponents, separators and more than 18 fractional digits are
    /// rejected rather than rounded.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyInput { field: "amount" });
        }
        let invalid = |reason| ValidationError::InvalidAmount {
            input: trimmed.to_string(),
            reason,
        };
        if trimmed.starts_with('-') {
            return Err(invalid("must not be negative"));
        }

        let (whole, frac) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("not a decimal number"));
        }
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !all_digits(frac) {
            return Err(invalid("not a decimal number"));
        }
        if frac.len() > DECIMALS {
            return Err(invalid("more than 18 decimal places"));
        }

        let whole = if whole.is_empty() {
            U256::ZERO
        } else {
            U256::from_str_radix(whole, 10).map_err(|_| invalid("value too large"))?
        };
        let frac = if frac.is_empty() {
            U256::ZERO
        } else {
            let padded = format!("{frac:0<width$}", width = DECIMALS);
            U256::from_str_radix(&padded, 10).map_err(|_| invalid("not a decimal number"))?
        };

        whole
            .checked_mul(unit())
            .and_then(|scaled| scaled.checked_add(frac))
            .map(Self)
            .ok_or_else(|| invalid("value too large"))
    }

    /// Lossy conversion for display and estimates. `None` if the value does not
    /// fit a `Decimal`.
    #[must_use]
    pub fn to_decimal(self) -> Option<Decimal> {
        Decimal::from_str(&self.to_string()).ok()
    }
}

impl FromStr for Amount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<U256> for Amount {
    fn from(raw: U256) -> Self {
        Self(raw)
    }
}

impl Serialize for Amount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / unit();
        let frac = self.0 % unit();
        if frac.is_zero() {
            return write!(f, "{whole}");
        }
        let digits = format!("{:0>width$}", frac.to_string(), width = DECIMALS);
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

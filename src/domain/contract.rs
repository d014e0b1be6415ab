//! Typed descriptors for the PLSTR contract surface.
//!
//! Every state-mutating call is a variant of [`WriteCall`]; there is no
//! string-keyed method dispatch anywhere in the crate.

use std::fmt;

use alloy_primitives::Address;
use serde::Serialize;

use super::amount::Amount;

/// Seconds in a day, for issuance period display.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Result of `getContractInfo()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContractInfo {
    /// vPLS held by the contract.
    pub balance: Amount,
    /// Seconds left in the issuance window.
    pub remaining_issuance_period: u64,
}

impl ContractInfo {
    #[must_use]
    pub fn remaining_issuance_days(&self) -> f64 {
        self.remaining_issuance_period as f64 / SECONDS_PER_DAY as f64
    }

    #[must_use]
    pub fn issuance_open(&self) -> bool {
        self.remaining_issuance_period > 0
    }
}

/// Result of `getOwnerMintInfo()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OwnerMintInfo {
    /// Unix timestamp of the earliest next owner mint.
    pub next_mint_time: u64,
}

impl OwnerMintInfo {
    /// Seconds until the next mint is allowed, zero if already allowed.
    #[must_use]
    pub fn remaining_at(&self, now: u64) -> u64 {
        self.next_mint_time.saturating_sub(now)
    }
}

/// Confirmation of a settled transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxReceipt {
    pub tx_hash: String,
    pub block_number: Option<u64>,
}

/// Every write the client can send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteCall {
    /// `approve(spender, amount)` on the vPLS token.
    ApproveToken { spender: Address, amount: Amount },
    IssueShares { amount: Amount },
    RedeemShares { amount: Amount },
    DepositStakedPls { amount: Amount },
    MintShares { amount: Amount },
    RecoverTokens {
        token: Address,
        recipient: Address,
        amount: Amount,
    },
    TransferOwnership { new_owner: Address },
}

impl WriteCall {
    /// Solidity method name, for logs and error messages.
    #[must_use]
    pub const fn method(&self) -> &'static str {
        match self {
            Self::ApproveToken { .. } => "approve",
            Self::IssueShares { .. } => "issueShares",
            Self::RedeemShares { .. } => "redeemShares",
            Self::DepositStakedPls { .. } => "depositStakedPLS",
            Self::MintShares { .. } => "mintShares",
            Self::RecoverTokens { .. } => "recoverTokens",
            Self::TransferOwnership { .. } => "transferOwnership",
        }
    }

    /// Whether the call targets the companion token rather than PLSTR.
    #[must_use]
    pub const fn targets_token(&self) -> bool {
        matches!(self, Self::ApproveToken { .. })
    }
}

impl fmt::Display for WriteCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApproveToken { spender, amount } => {
                write!(f, "approve({spender}, {amount})")
            }
            Self::IssueShares { amount }
            | Self::RedeemShares { amount }
            | Self::DepositStakedPls { amount }
            | Self::MintShares { amount } => write!(f, "{}({amount})", self.method()),
            Self::RecoverTokens {
                token,
                recipient,
                amount,
            } => write!(f, "recoverTokens({token}, {recipient}, {amount})"),
            Self::TransferOwnership { new_owner } => write!(f, "transferOwnership({new_owner})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mint_remaining_saturates() {
        let info = OwnerMintInfo {
            next_mint_time: 1_000,
        };
        assert_eq!(info.remaining_at(400), 600);
        assert_eq!(info.remaining_at(5_000), 0);
    }

    #[test]
    fn issuance_days() {
        let info = ContractInfo {
            balance: Amount::ZERO,
            remaining_issuance_period: 3 * SECONDS_PER_DAY / 2,
        };
        assert!(info.issuance_open());
        assert!((info.remaining_issuance_days() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn display_uses_solidity_names() {
        let call = WriteCall::IssueShares {
            amount: Amount::from_tokens(1005),
        };
        assert_eq!(call.to_string(), "issueShares(1005)");
        assert!(!call.targets_token());
    }
}

//! User-initiated actions and their lifecycle.
//!
//! An [`ActionRequest`] holds raw user input exactly as entered. It is
//! validated into a [`PreparedAction`] before anything touches the network.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::Address;
use serde::Serialize;

use super::amount::Amount;
use super::contract::{TxReceipt, WriteCall};
use crate::error::ValidationError;

/// The kinds of action a user can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Issue,
    Redeem,
    Deposit,
    Mint,
    Recover,
    TransferOwnership,
}

impl ActionKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::Redeem => "redeem",
            Self::Deposit => "deposit",
            Self::Mint => "mint",
            Self::Recover => "recover",
            Self::TransferOwnership => "transfer-ownership",
        }
    }

    /// Actions that spend vPLS and therefore need a token approval first.
    #[must_use]
    pub const fn needs_approval(self) -> bool {
        matches!(self, Self::Issue | Self::Deposit)
    }

    /// Actions restricted to the contract owner.
    #[must_use]
    pub const fn owner_only(self) -> bool {
        matches!(
            self,
            Self::Deposit | Self::Mint | Self::Recover | Self::TransferOwnership
        )
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw user input for one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    Issue { amount: String },
    Redeem { amount: String },
    Deposit { amount: String },
    Mint { amount: String },
    Recover {
        token: String,
        recipient: String,
        amount: String,
    },
    TransferOwnership { new_owner: String },
}

impl ActionRequest {
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Issue { .. } => ActionKind::Issue,
            Self::Redeem { .. } => ActionKind::Redeem,
            Self::Deposit { .. } => ActionKind::Deposit,
            Self::Mint { .. } => ActionKind::Mint,
            Self::Recover { .. } => ActionKind::Recover,
            Self::TransferOwnership { .. } => ActionKind::TransferOwnership,
        }
    }

    /// Validate the input and resolve it to the writes it will send.
    ///
    /// `contract` is the approval spender for two-step actions.
    pub fn prepare(
        &self,
        contract: Address,
        limits: &ActionLimits,
    ) -> Result<PreparedAction, ValidationError> {
        let kind = self.kind();
        let primary = match self {
            Self::Issue { amount } => {
                let amount = positive_amount(amount)?;
                if amount < limits.min_issue {
                    return Err(ValidationError::BelowMinimum {
                        amount,
                        minimum: limits.min_issue,
                    });
                }
                WriteCall::IssueShares { amount }
            }
            Self::Redeem { amount } => WriteCall::RedeemShares {
                amount: positive_amount(amount)?,
            },
            Self::Deposit { amount } => WriteCall::DepositStakedPls {
                amount: positive_amount(amount)?,
            },
            Self::Mint { amount } => WriteCall::MintShares {
                amount: positive_amount(amount)?,
            },
            Self::Recover {
                token,
                recipient,
                amount,
            } => WriteCall::RecoverTokens {
                token: parse_address(token, "token")?,
                recipient: parse_address(recipient, "recipient")?,
                amount: positive_amount(amount)?,
            },
            Self::TransferOwnership { new_owner } => WriteCall::TransferOwnership {
                new_owner: parse_address(new_owner, "new owner")?,
            },
        };

        let approval = match &primary {
            WriteCall::IssueShares { amount } | WriteCall::DepositStakedPls { amount } => {
                Some(WriteCall::ApproveToken {
                    spender: contract,
                    amount: *amount,
                })
            }
            _ => None,
        };
        debug_assert_eq!(approval.is_some(), kind.needs_approval());

        Ok(PreparedAction {
            kind,
            approval,
            primary,
        })
    }
}

/// Local limits checked before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionLimits {
    /// Smallest amount accepted by `issueShares`.
    pub min_issue: Amount,
}

impl Default for ActionLimits {
    fn default() -> Self {
        Self {
            min_issue: Amount::from_tokens(1005),
        }
    }
}

/// A validated action, ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedAction {
    pub kind: ActionKind,
    /// Token approval that must settle before `primary` is sent.
    pub approval: Option<WriteCall>,
    pub primary: WriteCall,
}

/// Per-action state machine: `Idle -> Submitting -> (Confirmed | Failed) -> Idle`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActionState {
    #[default]
    Idle,
    Submitting,
    Confirmed { receipt: TxReceipt },
    Failed { message: String },
}

impl ActionState {
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

fn positive_amount(input: &str) -> Result<Amount, ValidationError> {
    let amount = Amount::parse(input)?;
    if amount.is_zero() {
        return Err(ValidationError::ZeroAmount);
    }
    Ok(amount)
}

fn parse_address(input: &str, field: &'static str) -> Result<Address, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput { field });
    }
    Address::from_str(trimmed).map_err(|_| ValidationError::InvalidAddress {
        input: trimmed.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const CONTRACT: Address = address!("6c1dA678A1B615f673208e74AB3510c22117090e");

    #[test]
    fn issue_below_minimum_is_rejected() {
        let request = ActionRequest::Issue {
            amount: "500".into(),
        };
        let result = request.prepare(CONTRACT, &ActionLimits::default());
        assert_eq!(
            result,
            Err(ValidationError::BelowMinimum {
                amount: Amount::from_tokens(500),
                minimum: Amount::from_tokens(1005),
            })
        );
    }

    #[test]
    fn issue_prepares_approval_for_same_amount() {
        let request = ActionRequest::Issue {
            amount: "1005.5".into(),
        };
        let prepared = request
            .prepare(CONTRACT, &ActionLimits::default())
            .unwrap();
        let amount = Amount::parse("1005.5").unwrap();
        assert_eq!(
            prepared.approval,
            Some(WriteCall::ApproveToken {
                spender: CONTRACT,
                amount
            })
        );
        assert_eq!(prepared.primary, WriteCall::IssueShares { amount });
    }

    #[test]
    fn empty_and_zero_inputs_are_rejected() {
        let limits = ActionLimits::default();
        let empty = ActionRequest::Redeem { amount: "".into() };
        assert_eq!(
            empty.prepare(CONTRACT, &limits),
            Err(ValidationError::EmptyInput { field: "amount" })
        );
        let zero = ActionRequest::Mint { amount: "0".into() };
        assert_eq!(
            zero.prepare(CONTRACT, &limits),
            Err(ValidationError::ZeroAmount)
        );
    }

    #[test]
    fn recover_validates_addresses() {
        let request = ActionRequest::Recover {
            token: "0x1234".into(),
            recipient: "0x0181e249c507d3b454dE2444444f0Bf5dBE72d09".into(),
            amount: "1".into(),
        };
        assert!(matches!(
            request.prepare(CONTRACT, &ActionLimits::default()),
            Err(ValidationError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn owner_only_and_approval_flags() {
        assert!(ActionKind::Issue.needs_approval());
        assert!(ActionKind::Deposit.needs_approval());
        assert!(!ActionKind::Redeem.needs_approval());
        assert!(!ActionKind::Issue.owner_only());
        assert!(ActionKind::TransferOwnership.owner_only());
    }
}

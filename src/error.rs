use alloy_primitives::Address;
use thiserror::Error;

use crate::domain::action::ActionKind;
use crate::domain::amount::Amount;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures while acquiring a connection or binding the contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("no provider available: all {tried} fallback RPC endpoints failed")]
    NoProvider { tried: usize },

    #[error("contract {address} unreachable: {reason}")]
    ContractUnreachable {
        address: Address,
        reason: UnreachableReason,
    },

    #[error("wallet endpoint {url} unavailable: {reason}")]
    Wallet { url: String, reason: String },
}

/// Why contract validation failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnreachableReason {
    /// The code lookup itself failed; worth retrying.
    #[error("{0}")]
    Rpc(String),

    #[error("no contract code at address")]
    NoCode,
}

impl ConnectionError {
    /// Whether repeating the same request could succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ContractUnreachable {
                reason: UnreachableReason::Rpc(_),
                ..
            }
        )
    }
}

/// Read-only contract query failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error("RPC call {method} failed: {reason}")]
    RpcFailure { method: &'static str, reason: String },
}

impl ReadError {
    pub fn rpc(method: &'static str, reason: impl ToString) -> Self {
        Self::RpcFailure {
            method,
            reason: reason.to_string(),
        }
    }
}

/// State-mutating transaction failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WriteError {
    #[error("transaction rejected by signer: {0}")]
    UserRejected(String),

    #[error("transaction reverted: {}", .reason.as_deref().unwrap_or("no reason given"))]
    Reverted {
        reason: Option<String>,
        tx_hash: Option<String>,
    },

    #[error("RPC failure while sending {method}: {reason}")]
    RpcFailure { method: &'static str, reason: String },

    #[error("connection is read-only; configure WALLET_PRIVATE_KEY or a keystore to send transactions")]
    ReadOnly,
}

/// Local input validation failures, raised before anything is submitted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    EmptyInput { field: &'static str },

    #[error("invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: &'static str },

    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("amount {amount} is below the minimum of {minimum}")]
    BelowMinimum { amount: Amount, minimum: Amount },

    #[error("invalid address '{input}'")]
    InvalidAddress { input: String },

    #[error("{action} is already being submitted")]
    InProgress { action: ActionKind },

    #[error("account {account} is not the contract owner ({owner})")]
    NotOwner { account: Address, owner: Address },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverted_message_includes_reason_when_present() {
        let err = WriteError::Reverted {
            reason: Some("Issuance period ended".to_string()),
            tx_hash: None,
        };
        assert_eq!(err.to_string(), "transaction reverted: Issuance period ended");

        let err = WriteError::Reverted {
            reason: None,
            tx_hash: None,
        };
        assert_eq!(err.to_string(), "transaction reverted: no reason given");
    }
}

//! The acquired network connection.

use std::fmt;

use alloy_primitives::Address;
use serde::Serialize;
use url::Url;

/// How the connection was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// A configured signing wallet and its own endpoint.
    Wallet,
    /// Read-only, the first live endpoint from the fallback list.
    RpcFallback,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wallet => f.write_str("wallet"),
            Self::RpcFallback => f.write_str("rpc fallback"),
        }
    }
}

/// Handle to a live network client. Immutable once acquired; share it behind an
/// `Arc` and re-acquire instead of mutating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionHandle {
    pub kind: ProviderKind,
    pub url: Url,
    pub chain_id: u64,
    /// Block height observed when the connection was acquired.
    pub block_height: Option<u64>,
    /// Signing account, present only for [`ProviderKind::Wallet`].
    pub account: Option<Address>,
    /// The endpoint reports a different chain than configured.
    pub chain_mismatch: bool,
}

impl ConnectionHandle {
    #[must_use]
    pub fn can_sign(&self) -> bool {
        self.account.is_some()
    }

    /// Human-readable network name.
    #[must_use]
    pub fn network_name(&self) -> String {
        match self.chain_id {
            1 => "Ethereum Mainnet".to_string(),
            369 => "PulseChain".to_string(),
            id => format!("Chain ID: {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(kind: ProviderKind, chain_id: u64) -> ConnectionHandle {
        ConnectionHandle {
            kind,
            url: Url::parse("https://rpc.pulsechain.com").unwrap(),
            chain_id,
            block_height: None,
            account: None,
            chain_mismatch: false,
        }
    }

    #[test]
    fn provider_kind_labels() {
        assert_eq!(ProviderKind::Wallet.to_string(), "wallet");
        assert_eq!(ProviderKind::RpcFallback.to_string(), "rpc fallback");
    }

    #[test]
    fn network_names() {
        assert_eq!(handle(ProviderKind::RpcFallback, 369).network_name(), "PulseChain");
        assert_eq!(handle(ProviderKind::RpcFallback, 5).network_name(), "Chain ID: 5");
        assert!(!handle(ProviderKind::Wallet, 1).can_sign());
    }
}

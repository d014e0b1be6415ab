//! Wallet configuration for signing transactions.

use serde::Deserialize;
use url::Url;

/// Wallet configuration.
/// Private key is loaded from `WALLET_PRIVATE_KEY` env var at runtime (never from config file).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletConfig {
    /// Optional keystore path for encrypted wallet storage.
    #[serde(default)]
    pub keystore_path: Option<String>,
    /// Endpoint the wallet sends through. Defaults to the first `network.rpc_urls` entry.
    #[serde(default)]
    pub rpc_url: Option<Url>,
    /// Private key loaded from `WALLET_PRIVATE_KEY` env var at runtime
    #[serde(skip)]
    pub private_key: Option<String>,
}

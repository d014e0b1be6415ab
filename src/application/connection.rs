//! Connection acquisition.
//!
//! A configured wallet connects through its own endpoint. Without one, the
//! fallback endpoints are probed in order and the first live one wins.

use std::future::Future;
use std::time::Duration;

use alloy_primitives::Address;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::{ConnectionHandle, ProviderKind};
use crate::error::{ConnectionError, ReadError};
use crate::infrastructure::config::NetworkConfig;
use crate::port::ChainProbe;

/// The signing side of a wallet connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletIdentity {
    pub address: Address,
    /// Endpoint the wallet talks to; the first fallback URL when unset.
    pub rpc_url: Option<Url>,
}

/// Acquires a [`ConnectionHandle`]. Calling [`acquire`](Self::acquire) again
/// re-probes from scratch.
pub struct ConnectionProvider<P> {
    probe: P,
    network: NetworkConfig,
    wallet: Option<WalletIdentity>,
}

impl<P: ChainProbe> ConnectionProvider<P> {
    pub fn new(probe: P, network: NetworkConfig) -> Self {
        Self {
            probe,
            network,
            wallet: None,
        }
    }

    #[must_use]
    pub fn with_wallet(mut self, wallet: WalletIdentity) -> Self {
        self.wallet = Some(wallet);
        self
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Acquire a connection.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Wallet`] when the wallet endpoint cannot be
    /// reached, and [`ConnectionError::NoProvider`] when there is no wallet and
    /// every fallback endpoint failed its probe.
    pub async fn acquire(&self) -> Result<ConnectionHandle, ConnectionError> {
        match &self.wallet {
            Some(wallet) => self.acquire_wallet(wallet).await,
            None => self.acquire_fallback().await,
        }
    }

    async fn acquire_wallet(
        &self,
        wallet: &WalletIdentity,
    ) -> Result<ConnectionHandle, ConnectionError> {
        let url = wallet
            .rpc_url
            .clone()
            .or_else(|| self.network.rpc_urls.first().cloned())
            .ok_or(ConnectionError::NoProvider { tried: 0 })?;

        let chain_id = self
            .bounded(self.probe.chain_id(&url))
            .await
            .map_err(|reason| ConnectionError::Wallet {
                url: url.to_string(),
                reason,
            })?;

        let chain_mismatch = self.check_chain(chain_id);
        let block_height = self.bounded(self.probe.block_number(&url)).await.ok();

        info!(
            account = %wallet.address,
            url = %url,
            chain_id,
            "Wallet connected"
        );

        Ok(ConnectionHandle {
            kind: ProviderKind::Wallet,
            url,
            chain_id,
            block_height,
            account: Some(wallet.address),
            chain_mismatch,
        })
    }

    async fn acquire_fallback(&self) -> Result<ConnectionHandle, ConnectionError> {
        for url in &self.network.rpc_urls {
            let block_height = match self.bounded(self.probe.block_number(url)).await {
                Ok(height) => height,
                Err(reason) => {
                    warn!(url = %url, reason = %reason, "RPC endpoint probe failed");
                    continue;
                }
            };

            let chain_id = match self.bounded(self.probe.chain_id(url)).await {
                Ok(id) => id,
                Err(reason) => {
                    warn!(url = %url, reason = %reason, "Chain ID lookup failed, assuming configured chain");
                    self.network.chain_id
                }
            };
            let chain_mismatch = self.check_chain(chain_id);

            info!(url = %url, block_height, chain_id, "Connected to fallback RPC endpoint");

            return Ok(ConnectionHandle {
                kind: ProviderKind::RpcFallback,
                url: url.clone(),
                chain_id,
                block_height: Some(block_height),
                account: None,
                chain_mismatch,
            });
        }

        Err(ConnectionError::NoProvider {
            tried: self.network.rpc_urls.len(),
        })
    }

    /// A local signer cannot switch networks, so a mismatch is only a warning.
    fn check_chain(&self, chain_id: u64) -> bool {
        let mismatch = chain_id != self.network.chain_id;
        if mismatch {
            warn!(
                expected = self.network.chain_id,
                actual = chain_id,
                "Endpoint is on a different chain than configured"
            );
        }
        mismatch
    }

    async fn bounded<T>(
        &self,
        request: impl Future<Output = Result<T, ReadError>>,
    ) -> Result<T, String> {
        let limit = Duration::from_millis(self.network.probe_timeout_ms);
        match tokio::time::timeout(limit, request).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => {
                debug!(timeout_ms = self.network.probe_timeout_ms, "Probe timed out");
                Err(format!("timed out after {}ms", self.network.probe_timeout_ms))
            }
        }
    }
}

//! Liveness probe port used while acquiring a connection.

use async_trait::async_trait;
use url::Url;

use crate::error::ReadError;

/// Lightweight JSON-RPC queries against an arbitrary endpoint.
#[async_trait]
pub trait ChainProbe: Send + Sync {
    /// `eth_blockNumber`.
    async fn block_number(&self, url: &Url) -> Result<u64, ReadError>;

    /// `eth_chainId`.
    async fn chain_id(&self, url: &Url) -> Result<u64, ReadError>;
}

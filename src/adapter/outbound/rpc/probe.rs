use alloy_provider::{Provider, ProviderBuilder};
use async_trait::async_trait;
use url::Url;

use crate::error::ReadError;
use crate::port::ChainProbe;

/// [`ChainProbe`] over plain HTTP JSON-RPC.
#[derive(Debug, Clone, Copy, Default)]
pub struct RpcProbe;

#[async_trait]
impl ChainProbe for RpcProbe {
    async fn block_number(&self, url: &Url) -> Result<u64, ReadError> {
        ProviderBuilder::new()
            .connect_http(url.clone())
            .get_block_number()
            .await
            .map_err(|e| ReadError::rpc("eth_blockNumber", e))
    }

    async fn chain_id(&self, url: &Url) -> Result<u64, ReadError> {
        ProviderBuilder::new()
            .connect_http(url.clone())
            .get_chain_id()
            .await
            .map_err(|e| ReadError::rpc("eth_chainId", e))
    }
}

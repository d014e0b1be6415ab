//! Scripted [`ChainProbe`] for connection tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use url::Url;

use crate::error::ReadError;
use crate::port::ChainProbe;

#[derive(Debug, Clone)]
enum Endpoint {
    Live { block: u64, chain_id: u64 },
    Down(String),
    /// Answers block height but not chain id.
    NoChainId { block: u64 },
    Hang,
}

/// A probe whose answers are fixed per URL. Unknown URLs are down.
#[derive(Default)]
pub struct ScriptedProbe {
    endpoints: HashMap<String, Endpoint>,
    probed: Mutex<Vec<String>>,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live(mut self, url: &str, block: u64, chain_id: u64) -> Self {
        self.endpoints
            .insert(key(url), Endpoint::Live { block, chain_id });
        self
    }

    pub fn down(mut self, url: &str, reason: &str) -> Self {
        self.endpoints
            .insert(key(url), Endpoint::Down(reason.to_string()));
        self
    }

    pub fn without_chain_id(mut self, url: &str, block: u64) -> Self {
        self.endpoints.insert(key(url), Endpoint::NoChainId { block });
        self
    }

    /// Never answers; exercises the probe timeout.
    pub fn hanging(mut self, url: &str) -> Self {
        self.endpoints.insert(key(url), Endpoint::Hang);
        self
    }

    /// URLs in the order they were first probed.
    pub fn probed(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for url in self.probed.lock().iter() {
            if !seen.contains(url) {
                seen.push(url.clone());
            }
        }
        seen
    }

    fn lookup(&self, url: &Url) -> Endpoint {
        let url = key(url.as_str());
        self.probed.lock().push(url.clone());
        self.endpoints
            .get(&url)
            .cloned()
            .unwrap_or_else(|| Endpoint::Down("connection refused".to_string()))
    }
}

#[async_trait]
impl ChainProbe for ScriptedProbe {
    async fn block_number(&self, url: &Url) -> Result<u64, ReadError> {
        match self.lookup(url) {
            Endpoint::Live { block, .. } | Endpoint::NoChainId { block } => Ok(block),
            Endpoint::Down(reason) => Err(ReadError::rpc("eth_blockNumber", reason)),
            Endpoint::Hang => hang().await,
        }
    }

    async fn chain_id(&self, url: &Url) -> Result<u64, ReadError> {
        match self.lookup(url) {
            Endpoint::Live { chain_id, .. } => Ok(chain_id),
            Endpoint::NoChainId { .. } => Err(ReadError::rpc("eth_chainId", "method not found")),
            Endpoint::Down(reason) => Err(ReadError::rpc("eth_chainId", reason)),
            Endpoint::Hang => hang().await,
        }
    }
}

async fn hang<T>() -> Result<T, ReadError> {
    tokio::time::sleep(Duration::from_secs(3600)).await;
    Err(ReadError::rpc("probe", "hung"))
}

fn key(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

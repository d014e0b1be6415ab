//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use std::time::Duration;

use url::Url;

use crate::adapter::outbound::retrying::RetryPolicy;
use crate::infrastructure::config::NetworkConfig;

/// Network config over the given endpoints with a short probe timeout.
pub fn network(urls: &[&str]) -> NetworkConfig {
    NetworkConfig {
        chain_id: 1,
        rpc_urls: urls
            .iter()
            .map(|url| Url::parse(url).unwrap_or_else(|e| panic!("bad test url {url}: {e}")))
            .collect(),
        probe_timeout_ms: 50,
    }
}

/// Retry policy with millisecond delays, so tests never wait long.
pub fn fast_retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(2),
        multiplier: 2.0,
    }
}

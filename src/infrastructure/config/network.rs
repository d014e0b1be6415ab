//! Network, contract and retry settings.

use alloy_primitives::{address, Address};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use url::Url;

use crate::domain::{ActionLimits, Amount};

/// Public Ethereum mainnet endpoints, tried in order when no wallet is configured.
const DEFAULT_RPC_URLS: &[&str] = &[
    "https://ethereum-rpc.publicnode.com",
    "https://rpc.ankr.com/eth",
    "https://cloudflare-eth.com",
];

/// Network selection and fallback endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    /// Expected chain ID.
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Fallback JSON-RPC endpoints, probed in order.
    #[serde(default = "default_rpc_urls")]
    pub rpc_urls: Vec<Url>,
    /// Timeout for each liveness probe (milliseconds).
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

fn default_chain_id() -> u64 {
    1
}

fn default_rpc_urls() -> Vec<Url> {
    DEFAULT_RPC_URLS
        .iter()
        .filter_map(|url| Url::parse(url).ok())
        .collect()
}

const fn default_probe_timeout_ms() -> u64 {
    5_000
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            rpc_urls: default_rpc_urls(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

/// Deployed contract addresses.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractConfig {
    /// PLSTR share contract.
    #[serde(default = "default_contract_address")]
    pub address: Address,
    /// vPLS backing token.
    #[serde(default = "default_token_address")]
    pub token_address: Address,
}

const fn default_contract_address() -> Address {
    address!("6c1dA678A1B615f673208e74AB3510c22117090e")
}

const fn default_token_address() -> Address {
    address!("0181e249c507d3b454dE2444444f0Bf5dBE72d09")
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: default_contract_address(),
            token_address: default_token_address(),
        }
    }
}

/// Fee schedule and limits used for local estimates and validation.
#[derive(Debug, Clone, Deserialize)]
pub struct FeesConfig {
    /// Fee charged on issuance (fraction, 0.005 = 0.5%).
    #[serde(default = "default_issue_fee")]
    pub issue_fee: Decimal,
    /// Fee charged on redemption (fraction).
    #[serde(default)]
    pub redeem_fee: Decimal,
    /// Minimum vPLS accepted by `issueShares`.
    #[serde(default = "default_min_issue")]
    pub min_issue: Amount,
    /// Decimal places shown for estimates.
    #[serde(default = "default_display_decimals")]
    pub display_decimals: u32,
}

fn default_issue_fee() -> Decimal {
    dec!(0.005)
}

fn default_min_issue() -> Amount {
    Amount::from_tokens(1005)
}

const fn default_display_decimals() -> u32 {
    3
}

impl FeesConfig {
    #[must_use]
    pub fn action_limits(&self) -> ActionLimits {
        ActionLimits {
            min_issue: self.min_issue,
        }
    }
}

impl Default for FeesConfig {
    fn default() -> Self {
        Self {
            issue_fee: default_issue_fee(),
            redeem_fee: Decimal::ZERO,
            min_issue: default_min_issue(),
            display_decimals: default_display_decimals(),
        }
    }
}

/// Retry policy for read calls.
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per read, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the first retry (milliseconds).
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    /// Upper bound on the delay between attempts (milliseconds).
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Multiplier applied to delay after each failed attempt.
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_base_delay_ms() -> u64 {
    500
}

const fn default_max_delay_ms() -> u64 {
    5_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

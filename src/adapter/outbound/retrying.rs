//! Retrying wrapper for [`ShareContract`] reads.
//!
//! Every read goes through the same bounded exponential backoff with jitter.
//! Writes are passed straight through: resending a transaction is never safe
//! to do automatically.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use alloy_primitives::Address;
use async_trait::async_trait;
use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::domain::{Amount, ContractInfo, OwnerMintInfo, TxReceipt, WriteCall};
use crate::error::{ConnectionError, ReadError, WriteError};
use crate::infrastructure::config::RetryConfig;
use crate::port::ShareContract;

/// Bounded exponential backoff.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
}

impl RetryPolicy {
    #[must_use]
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            multiplier: config.backoff_multiplier,
        }
    }

    /// A policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            multiplier: 1.0,
        }
    }

    /// Delay before retry number `retry` (0-based), without jitter.
    #[must_use]
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = self.multiplier.powi(retry.min(i32::MAX as u32) as i32);
        let millis = (self.base_delay.as_millis() as f64 * factor).min(self.max_delay.as_millis() as f64);
        Duration::from_millis(millis as u64)
    }

    /// Adds up to 20% random jitter to prevent synchronized retry storms.
    fn with_jitter(delay: Duration) -> Duration {
        let jitter_range_ms = (delay.as_millis() as u64) / 5;
        if jitter_range_ms == 0 {
            return delay;
        }
        delay + Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_range_ms))
    }

    /// Run `op` until it succeeds or attempts are exhausted, returning the last error.
    pub async fn run<T, E, F, Fut>(&self, method: &'static str, op: F) -> Result<T, E>
    where
        E: Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.run_if(method, op, |_| true).await
    }

    /// Like [`run`](Self::run), but errors for which `retryable` is false are
    /// returned at once.
    pub async fn run_if<T, E, F, Fut, R>(
        &self,
        method: &'static str,
        mut op: F,
        retryable: R,
    ) -> Result<T, E>
    where
        E: Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        R: Fn(&E) -> bool,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(method, attempt, "Read succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) if !retryable(&e) => {
                    debug!(method, attempt, error = %e, "Read failed permanently");
                    return Err(e);
                }
                Err(e) if attempt >= self.max_attempts => {
                    warn!(method, attempts = attempt, error = %e, "Read failed, giving up");
                    return Err(e);
                }
                Err(e) => {
                    let delay = Self::with_jitter(self.backoff(attempt - 1));
                    debug!(
                        method,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Read failed, retrying after delay"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

/// Wrapper that applies a [`RetryPolicy`] to every read of the inner contract.
pub struct RetryingContract<C> {
    inner: C,
    policy: RetryPolicy,
}

impl<C: ShareContract> RetryingContract<C> {
    pub fn new(inner: C, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: ShareContract> ShareContract for RetryingContract<C> {
    fn address(&self) -> Address {
        self.inner.address()
    }

    fn token_address(&self) -> Address {
        self.inner.token_address()
    }

    fn account(&self) -> Option<Address> {
        self.inner.account()
    }

    async fn validate(&self) -> Result<(), ConnectionError> {
        self.policy
            .run_if(
                "eth_getCode",
                || self.inner.validate(),
                ConnectionError::is_transient,
            )
            .await
    }

    async fn contract_info(&self) -> Result<ContractInfo, ReadError> {
        self.policy
            .run("getContractInfo", || self.inner.contract_info())
            .await
    }

    async fn balance_of(&self, account: Address) -> Result<Amount, ReadError> {
        self.policy
            .run("balanceOf", || self.inner.balance_of(account))
            .await
    }

    async fn backing_ratio(&self) -> Result<Amount, ReadError> {
        self.policy
            .run("getVPLSBackingRatio", || self.inner.backing_ratio())
            .await
    }

    async fn redeemable_staked_pls(
        &self,
        account: Address,
        shares: Amount,
    ) -> Result<Amount, ReadError> {
        self.policy
            .run("getRedeemableStakedPLS", || {
                self.inner.redeemable_staked_pls(account, shares)
            })
            .await
    }

    async fn redeemable_vpls(&self, account: Address) -> Result<Amount, ReadError> {
        self.policy
            .run("redeemableVPLS", || self.inner.redeemable_vpls(account))
            .await
    }

    async fn owner(&self) -> Result<Address, ReadError> {
        self.policy.run("owner", || self.inner.owner()).await
    }

    async fn owner_mint_info(&self) -> Result<OwnerMintInfo, ReadError> {
        self.policy
            .run("getOwnerMintInfo", || self.inner.owner_mint_info())
            .await
    }

    async fn user_share_info(&self, account: Address) -> Result<Amount, ReadError> {
        self.policy
            .run("getUserShareInfo", || self.inner.user_share_info(account))
            .await
    }

    async fn token_balance_of(&self, account: Address) -> Result<Amount, ReadError> {
        self.policy
            .run("balanceOf", || self.inner.token_balance_of(account))
            .await
    }

    async fn token_allowance(
        &self,
        owner: Address,
        spender: Address,
    ) -> Result<Amount, ReadError> {
        self.policy
            .run("allowance", || self.inner.token_allowance(owner, spender))
            .await
    }

    async fn submit(&self, call: WriteCall) -> Result<TxReceipt, WriteError> {
        self.inner.submit(call).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 5,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(350),
            multiplier: 2.0,
        };
        assert_eq!(policy.backoff(0), Duration::from_millis(100));
        assert_eq!(policy.backoff(1), Duration::from_millis(200));
        assert_eq!(policy.backoff(2), Duration::from_millis(350));
        assert_eq!(policy.backoff(10), Duration::from_millis(350));
    }

    #[test]
    fn jitter_stays_within_twenty_percent() {
        let base = Duration::from_millis(1_000);
        for _ in 0..50 {
            let delay = RetryPolicy::with_jitter(base);
            assert!(delay >= base && delay <= Duration::from_millis(1_200));
        }
    }

    #[tokio::test]
    async fn run_returns_last_error_after_max_attempts() {
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
            multiplier: 2.0,
        };
        let mut calls = 0;
        let result: Result<(), ReadError> = policy
            .run("owner", || {
                calls += 1;
                let attempt = calls;
                async move { Err(ReadError::rpc("owner", format!("attempt {attempt}"))) }
            })
            .await;
        assert_eq!(calls, 3);
        assert_eq!(result, Err(ReadError::rpc("owner", "attempt 3")));
    }

    #[tokio::test]
    async fn run_stops_on_first_success() {
        let policy = RetryPolicy {
            max_attempts: 4,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(1),
            multiplier: 1.0,
        };
        let mut calls = 0;
        let result = policy
            .run("getVPLSBackingRatio", || {
                calls += 1;
                let attempt = calls;
                async move {
                    if attempt < 2 {
                        Err(ReadError::rpc("getVPLSBackingRatio", "timeout"))
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await;
        assert_eq!(result, Ok(2));
        assert_eq!(calls, 2);
    }
}

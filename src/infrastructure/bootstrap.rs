//! Composition root: wires config into a connected, validated session.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::retrying::{RetryPolicy, RetryingContract};
use crate::adapter::outbound::rpc::{RpcProbe, RpcShareContract};
use crate::application::{ActionExecutor, ConnectionProvider, WalletIdentity};
use crate::domain::ConnectionHandle;
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::infrastructure::wallet::WalletService;
use crate::port::ShareContract;

/// The contract client used by the CLI.
pub type LiveContract = RetryingContract<RpcShareContract>;

/// A connected session. Cheap to clone; everything is shared by handle.
#[derive(Clone)]
pub struct Session {
    pub connection: Arc<ConnectionHandle>,
    pub contract: Arc<LiveContract>,
}

impl Session {
    /// Executor over this session's contract with the configured limits.
    #[must_use]
    pub fn executor(&self, config: &Config) -> ActionExecutor<LiveContract> {
        ActionExecutor::new(Arc::clone(&self.contract), config.fees.action_limits())
    }
}

/// Acquire a connection, bind the contract and check that it is deployed.
///
/// # Errors
///
/// Returns an error if the wallet key is invalid, no endpoint answers, or
/// no contract code exists at the configured address.
pub async fn connect(config: &Config) -> Result<Session> {
    let signer = WalletService::signer(&config.wallet)?;

    let mut provider = ConnectionProvider::new(RpcProbe, config.network.clone());
    if let Some(signer) = &signer {
        provider = provider.with_wallet(WalletIdentity {
            address: signer.address(),
            rpc_url: config.wallet.rpc_url.clone(),
        });
    }
    let connection = Arc::new(provider.acquire().await?);

    let contract = RpcShareContract::bind(
        &connection,
        config.contract.address,
        config.contract.token_address,
        signer,
    );
    let contract = Arc::new(RetryingContract::new(
        contract,
        RetryPolicy::from_config(&config.retry),
    ));
    contract.validate().await?;

    info!(
        contract = %config.contract.address,
        network = %connection.network_name(),
        read_only = !connection.can_sign(),
        "Session ready"
    );

    Ok(Session {
        connection,
        contract,
    })
}

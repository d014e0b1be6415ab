//! Wallet operations facade for the CLI.
//!
//! Turns configured key material into a signer and gathers the balances and
//! allowance shown by `plstr wallet status`.

use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;

use crate::domain::Amount;
use crate::error::{ConfigError, ReadError, Result};
use crate::infrastructure::config::WalletConfig;
use crate::port::ShareContract;

/// Balances and allowance for one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletStatus {
    pub address: Address,
    /// vPLS held.
    pub vpls_balance: std::result::Result<Amount, ReadError>,
    /// PLSTR held.
    pub plstr_balance: std::result::Result<Amount, ReadError>,
    /// vPLS the share contract may currently pull from this account.
    pub allowance: std::result::Result<Amount, ReadError>,
}

pub struct WalletService;

impl WalletService {
    /// Build the signer from configured key material, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the key does not parse.
    #[allow(clippy::result_large_err)]
    pub fn signer(config: &WalletConfig) -> Result<Option<PrivateKeySigner>> {
        let Some(key) = config.private_key.as_deref() else {
            return Ok(None);
        };
        let signer = key
            .trim()
            .trim_start_matches("0x")
            .parse::<PrivateKeySigner>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "WALLET_PRIVATE_KEY",
                reason: e.to_string(),
            })?;
        Ok(Some(signer))
    }

    /// Address of the configured signer, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured key is invalid.
    #[allow(clippy::result_large_err)]
    pub fn address(config: &WalletConfig) -> Result<Option<Address>> {
        Ok(Self::signer(config)?.map(|signer| signer.address()))
    }

    /// Read balances and allowance concurrently.
    pub async fn status<C>(contract: &C, address: Address) -> WalletStatus
    where
        C: ShareContract + ?Sized,
    {
        let (vpls_balance, plstr_balance, allowance) = tokio::join!(
            contract.token_balance_of(address),
            contract.balance_of(address),
            contract.token_allowance(address, contract.address()),
        );
        WalletStatus {
            address,
            vpls_balance,
            plstr_balance,
            allowance,
        }
    }
}

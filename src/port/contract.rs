//! Contract proxy port.
//!
//! Binds the fixed PLSTR contract and its companion vPLS token to an acquired
//! connection. Reads are stateless and safe to run concurrently; writes block
//! until the transaction is confirmed or rejected.

use alloy_primitives::Address;
use async_trait::async_trait;

use crate::domain::{Amount, ContractInfo, OwnerMintInfo, TxReceipt, WriteCall};
use crate::error::{ConnectionError, ReadError, WriteError};

/// Port for the PLSTR share contract.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait ShareContract: Send + Sync {
    /// PLSTR contract address.
    fn address(&self) -> Address;

    /// vPLS token address.
    fn token_address(&self) -> Address;

    /// Account used for writes, if the connection can sign.
    fn account(&self) -> Option<Address>;

    /// Confirm the bound address has deployed code.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::ContractUnreachable`] when the code lookup
    /// fails or the address is empty.
    async fn validate(&self) -> Result<(), ConnectionError>;

    /// `getContractInfo()`.
    async fn contract_info(&self) -> Result<ContractInfo, ReadError>;

    /// PLSTR `balanceOf(account)`.
    async fn balance_of(&self, account: Address) -> Result<Amount, ReadError>;

    /// `getVPLSBackingRatio()`, 18-decimal fixed point.
    async fn backing_ratio(&self) -> Result<Amount, ReadError>;

    /// `getRedeemableStakedPLS(account, shares)`.
    async fn redeemable_staked_pls(
        &self,
        account: Address,
        shares: Amount,
    ) -> Result<Amount, ReadError>;

    /// `redeemableVPLS(account)`.
    async fn redeemable_vpls(&self, account: Address) -> Result<Amount, ReadError>;

    /// `owner()`.
    async fn owner(&self) -> Result<Address, ReadError>;

    /// `getOwnerMintInfo()`.
    async fn owner_mint_info(&self) -> Result<OwnerMintInfo, ReadError>;

    /// `getUserShareInfo(account)`.
    async fn user_share_info(&self, account: Address) -> Result<Amount, ReadError>;

    /// vPLS `balanceOf(account)`.
    async fn token_balance_of(&self, account: Address) -> Result<Amount, ReadError>;

    /// vPLS `allowance(owner, spender)`.
    async fn token_allowance(&self, owner: Address, spender: Address)
        -> Result<Amount, ReadError>;

    /// Send a write and wait for its receipt.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::UserRejected`] if the signer refuses,
    /// [`WriteError::Reverted`] if the transaction reverts, and
    /// [`WriteError::ReadOnly`] if there is no signer.
    async fn submit(&self, call: WriteCall) -> Result<TxReceipt, WriteError>;
}

//! Contract and account read state.
//!
//! Reads run concurrently and each result is kept on its own, so a single
//! failing call only blanks its own field.

use alloy_primitives::Address;

use crate::domain::{Amount, ContractInfo, OwnerMintInfo};
use crate::error::ReadError;
use crate::port::ShareContract;

/// Contract-wide reads plus, when an account is known, its balances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub contract_info: Result<ContractInfo, ReadError>,
    pub backing_ratio: Result<Amount, ReadError>,
    pub owner: Result<Address, ReadError>,
    pub owner_mint_info: Result<OwnerMintInfo, ReadError>,
    pub account: Option<AccountSnapshot>,
}

/// Per-account reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    pub address: Address,
    /// PLSTR held.
    pub plstr_balance: Result<Amount, ReadError>,
    /// vPLS returned for redeeming the whole PLSTR balance.
    pub redeem_value: Result<Amount, ReadError>,
    /// `redeemableVPLS(account)`, the contract's own per-account figure.
    pub redeemable_vpls: Result<Amount, ReadError>,
    /// vPLS held in the wallet.
    pub vpls_balance: Result<Amount, ReadError>,
    pub share_info: Result<Amount, ReadError>,
}

impl DashboardSnapshot {
    /// `Some(true)` when the account is the owner, `None` if either side is unknown.
    #[must_use]
    pub fn is_owner(&self) -> Option<bool> {
        let owner = self.owner.as_ref().ok()?;
        let account = self.account.as_ref()?;
        Some(*owner == account.address)
    }

    /// Every read error in the snapshot, for inline notices.
    #[must_use]
    pub fn errors(&self) -> Vec<&ReadError> {
        let mut errors = vec![
            self.contract_info.as_ref().err(),
            self.backing_ratio.as_ref().err(),
            self.owner.as_ref().err(),
            self.owner_mint_info.as_ref().err(),
        ];
        if let Some(account) = &self.account {
            errors.extend([
                account.plstr_balance.as_ref().err(),
                account.redeem_value.as_ref().err(),
                account.redeemable_vpls.as_ref().err(),
                account.vpls_balance.as_ref().err(),
                account.share_info.as_ref().err(),
            ]);
        }
        errors.into_iter().flatten().collect()
    }
}

/// Refresh all dependent read state.
pub async fn snapshot<C>(contract: &C, account: Option<Address>) -> DashboardSnapshot
where
    C: ShareContract + ?Sized,
{
    let contract_reads = async {
        tokio::join!(
            contract.contract_info(),
            contract.backing_ratio(),
            contract.owner(),
            contract.owner_mint_info(),
        )
    };
    let account_reads = async {
        match account {
            Some(address) => Some(account_snapshot(contract, address).await),
            None => None,
        }
    };

    let ((contract_info, backing_ratio, owner, owner_mint_info), account) =
        tokio::join!(contract_reads, account_reads);

    DashboardSnapshot {
        contract_info,
        backing_ratio,
        owner,
        owner_mint_info,
        account,
    }
}

async fn account_snapshot<C>(contract: &C, address: Address) -> AccountSnapshot
where
    C: ShareContract + ?Sized,
{
    let redeemable = async {
        let balance = contract.balance_of(address).await;
        let redeemable = match &balance {
            Ok(shares) => contract.redeemable_staked_pls(address, *shares).await,
            Err(e) => Err(e.clone()),
        };
        (balance, redeemable)
    };

    let ((plstr_balance, redeem_value), redeemable_vpls, vpls_balance, share_info) = tokio::join!(
        redeemable,
        contract.redeemable_vpls(address),
        contract.token_balance_of(address),
        contract.user_share_info(address),
    );

    AccountSnapshot {
        address,
        plstr_balance,
        redeem_value,
        redeemable_vpls,
        vpls_balance,
        share_info,
    }
}

//! Alloy-backed [`ShareContract`].
//!
//! Providers are built per call from the bound endpoint, so the proxy itself is
//! plain data and cheap to share.

use alloy_primitives::{Address, U256};
use alloy_provider::network::{EthereumWallet, ReceiptResponse as _};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use tracing::{debug, info};
use url::Url;

use super::bindings::{IPulseStrategy, IERC20};
use super::classify::classify_send_error;
use crate::domain::{Amount, ConnectionHandle, ContractInfo, OwnerMintInfo, TxReceipt, WriteCall};
use crate::error::{ConnectionError, ReadError, UnreachableReason, WriteError};
use crate::port::ShareContract;

/// PLSTR contract proxy over JSON-RPC.
pub struct RpcShareContract {
    url: Url,
    address: Address,
    token_address: Address,
    signer: Option<PrivateKeySigner>,
}

impl RpcShareContract {
    /// Bind the contract and token addresses to an acquired connection.
    ///
    /// Binding is local and always succeeds; call
    /// [`validate`](ShareContract::validate) to confirm the address is live.
    #[must_use]
    pub fn bind(
        connection: &ConnectionHandle,
        address: Address,
        token_address: Address,
        signer: Option<PrivateKeySigner>,
    ) -> Self {
        Self {
            url: connection.url.clone(),
            address,
            token_address,
            signer,
        }
    }

    fn reader(&self) -> impl Provider {
        ProviderBuilder::new().connect_http(self.url.clone())
    }

    fn writer(&self) -> Result<impl Provider, WriteError> {
        let signer = self.signer.clone().ok_or(WriteError::ReadOnly)?;
        let wallet = EthereumWallet::from(signer);
        Ok(ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(self.url.clone()))
    }
}

fn timestamp(value: U256) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

#[async_trait]
impl ShareContract for RpcShareContract {
    fn address(&self) -> Address {
        self.address
    }

    fn token_address(&self) -> Address {
        self.token_address
    }

    fn account(&self) -> Option<Address> {
        self.signer.as_ref().map(PrivateKeySigner::address)
    }

    async fn validate(&self) -> Result<(), ConnectionError> {
        let provider = self.reader();
        let code = provider
            .get_code_at(self.address)
            .await
            .map_err(|e| ConnectionError::ContractUnreachable {
                address: self.address,
                reason: UnreachableReason::Rpc(e.to_string()),
            })?;
        if code.is_empty() {
            return Err(ConnectionError::ContractUnreachable {
                address: self.address,
                reason: UnreachableReason::NoCode,
            });
        }
        debug!(address = %self.address, code_len = code.len(), "Contract code found");
        Ok(())
    }

    async fn contract_info(&self) -> Result<ContractInfo, ReadError> {
        let provider = self.reader();
        let plstr = IPulseStrategy::new(self.address, &provider);
        let info = plstr
            .getContractInfo()
            .call()
            .await
            .map_err(|e| ReadError::rpc("getContractInfo", e))?;
        Ok(ContractInfo {
            balance: Amount::from_raw(info.contractBalance),
            remaining_issuance_period: timestamp(info.remainingIssuancePeriod),
        })
    }

    async fn balance_of(&self, account: Address) -> Result<Amount, ReadError> {
        let provider = self.reader();
        let plstr = IPulseStrategy::new(self.address, &provider);
        plstr
            .balanceOf(account)
            .call()
            .await
            .map(Amount::from_raw)
            .map_err(|e| ReadError::rpc("balanceOf", e))
    }

    async fn backing_ratio(&self) -> Result<Amount, ReadError> {
        let provider = self.reader();
        let plstr = IPulseStrategy::new(self.address, &provider);
        plstr
            .getVPLSBackingRatio()
            .call()
            .await
            .map(Amount::from_raw)
            .map_err(|e| ReadError::rpc("getVPLSBackingRatio", e))
    }

    async fn redeemable_staked_pls(
        &self,
        account: Address,
        shares: Amount,
    ) -> Result<Amount, ReadError> {
        let provider = self.reader();
        let plstr = IPulseStrategy::new(self.address, &provider);
        plstr
            .getRedeemableStakedPLS(account, shares.raw())
            .call()
            .await
            .map(Amount::from_raw)
            .map_err(|e| ReadError::rpc("getRedeemableStakedPLS", e))
    }

    async fn redeemable_vpls(&self, account: Address) -> Result<Amount, ReadError> {
        let provider = self.reader();
        let plstr = IPulseStrategy::new(self.address, &provider);
        plstr
            .redeemableVPLS(account)
            .call()
            .await
            .map(Amount::from_raw)
            .map_err(|e| ReadError::rpc("redeemableVPLS", e))
    }

    async fn owner(&self) -> Result<Address, ReadError> {
        let provider = self.reader();
        let plstr = IPulseStrategy::new(self.address, &provider);
        plstr
            .owner()
            .call()
            .await
            .map_err(|e| ReadError::rpc("owner", e))
    }

    async fn owner_mint_info(&self) -> Result<OwnerMintInfo, ReadError> {
        let provider = self.reader();
        let plstr = IPulseStrategy::new(self.address, &provider);
        let next = plstr
            .getOwnerMintInfo()
            .call()
            .await
            .map_err(|e| ReadError::rpc("getOwnerMintInfo", e))?;
        Ok(OwnerMintInfo {
            next_mint_time: timestamp(next),
        })
    }

    async fn user_share_info(&self, account: Address) -> Result<Amount, ReadError> {
        let provider = self.reader();
        let plstr = IPulseStrategy::new(self.address, &provider);
        plstr
            .getUserShareInfo(account)
            .call()
            .await
            .map(Amount::from_raw)
            .map_err(|e| ReadError::rpc("getUserShareInfo", e))
    }

    async fn token_balance_of(&self, account: Address) -> Result<Amount, ReadError> {
        let provider = self.reader();
        let token = IERC20::new(self.token_address, &provider);
        token
            .balanceOf(account)
            .call()
            .await
            .map(Amount::from_raw)
            .map_err(|e| ReadError::rpc("balanceOf", e))
    }

    async fn token_allowance(
        &self,
        owner: Address,
        spender: Address,
    ) -> Result<Amount, ReadError> {
        let provider = self.reader();
        let token = IERC20::new(self.token_address, &provider);
        token
            .allowance(owner, spender)
            .call()
            .await
            .map(Amount::from_raw)
            .map_err(|e| ReadError::rpc("allowance", e))
    }

    async fn submit(&self, call: WriteCall) -> Result<TxReceipt, WriteError> {
        let provider = self.writer()?;
        let method = call.method();
        let plstr = IPulseStrategy::new(self.address, &provider);
        let token = IERC20::new(self.token_address, &provider);

        let target = if call.targets_token() {
            self.token_address
        } else {
            self.address
        };
        info!(call = %call, to = %target, "Sending transaction");

        let sent = match call {
            WriteCall::ApproveToken { spender, amount } => {
                token.approve(spender, amount.raw()).send().await
            }
            WriteCall::IssueShares { amount } => plstr.issueShares(amount.raw()).send().await,
            WriteCall::RedeemShares { amount } => plstr.redeemShares(amount.raw()).send().await,
            WriteCall::DepositStakedPls { amount } => {
                plstr.depositStakedPLS(amount.raw()).send().await
            }
            WriteCall::MintShares { amount } => plstr.mintShares(amount.raw()).send().await,
            WriteCall::RecoverTokens {
                token: recovered,
                recipient,
                amount,
            } => {
                plstr
                    .recoverTokens(recovered, recipient, amount.raw())
                    .send()
                    .await
            }
            WriteCall::TransferOwnership { new_owner } => {
                plstr.transferOwnership(new_owner).send().await
            }
        };
        let pending = sent.map_err(|e| classify_send_error(method, &e.to_string()))?;

        let tx_hash = format!("{:?}", pending.tx_hash());
        debug!(method, tx_hash = %tx_hash, "Transaction submitted, awaiting receipt");

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| WriteError::RpcFailure {
                method,
                reason: format!("failed to get receipt: {e}"),
            })?;

        if !receipt.status() {
            return Err(WriteError::Reverted {
                reason: None,
                tx_hash: Some(tx_hash),
            });
        }

        info!(method, tx_hash = %tx_hash, "Transaction confirmed");

        Ok(TxReceipt {
            tx_hash,
            block_number: receipt.block_number(),
        })
    }
}

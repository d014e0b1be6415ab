//! In-memory [`ShareContract`] for executor, dashboard and retry tests.
//!
//! Every read and write is appended to an event log so tests can assert call
//! order (approval settled before the primary write, no write after a failed
//! validation, number of retried reads).

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use alloy_primitives::Address;
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use super::domain::{addr, receipt, tokens};
use crate::domain::{Amount, ContractInfo, OwnerMintInfo, TxReceipt, WriteCall};
use crate::error::{ConnectionError, ReadError, WriteError};
use crate::port::ShareContract;

/// One observed interaction with the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractEvent {
    Read(&'static str),
    Sent(WriteCall),
    /// The write's receipt was returned to the caller.
    Settled(&'static str),
}

/// Values returned by successful reads.
#[derive(Debug, Clone)]
pub struct MockState {
    pub contract_info: ContractInfo,
    pub backing_ratio: Amount,
    pub owner: Address,
    pub owner_mint_info: OwnerMintInfo,
    pub plstr_balance: Amount,
    pub vpls_balance: Amount,
    pub allowance: Amount,
    pub share_info: Amount,
    pub redeemable_vpls: Amount,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            contract_info: ContractInfo {
                balance: tokens(1_000_000),
                remaining_issuance_period: 30 * 86_400,
            },
            backing_ratio: tokens(1),
            owner: addr(0xAA),
            owner_mint_info: OwnerMintInfo { next_mint_time: 0 },
            plstr_balance: tokens(2_000),
            vpls_balance: tokens(5_000),
            allowance: Amount::ZERO,
            share_info: tokens(2_000),
            redeemable_vpls: tokens(2_000),
        }
    }
}

pub struct MockShareContract {
    address: Address,
    token_address: Address,
    account: Option<Address>,
    state: Mutex<MockState>,
    read_failures: Mutex<HashMap<&'static str, u32>>,
    write_results: Mutex<HashMap<&'static str, VecDeque<Result<TxReceipt, WriteError>>>>,
    validate_result: Result<(), ConnectionError>,
    gate: Option<Arc<Notify>>,
    events: Mutex<Vec<ContractEvent>>,
    tx_counter: AtomicU64,
}

impl MockShareContract {
    /// A signing mock whose account is [`MockShareContract::ACCOUNT`].
    pub fn new() -> Self {
        Self {
            address: Self::CONTRACT,
            token_address: Self::TOKEN,
            account: Some(Self::ACCOUNT),
            state: Mutex::new(MockState::default()),
            read_failures: Mutex::new(HashMap::new()),
            write_results: Mutex::new(HashMap::new()),
            validate_result: Ok(()),
            gate: None,
            events: Mutex::new(Vec::new()),
            tx_counter: AtomicU64::new(0),
        }
    }

    pub const CONTRACT: Address = Address::new([0x6c; 20]);
    pub const TOKEN: Address = Address::new([0x01; 20]);
    pub const ACCOUNT: Address = Address::new([0x11; 20]);

    /// No signing account.
    pub fn read_only(mut self) -> Self {
        self.account = None;
        self
    }

    /// Make the signing account the contract owner.
    pub fn as_owner(self) -> Self {
        self.state.lock().owner = Self::ACCOUNT;
        self
    }

    pub fn with_state(self, update: impl FnOnce(&mut MockState)) -> Self {
        update(&mut self.state.lock());
        self
    }

    /// Fail the next `times` calls of the read `method`.
    pub fn fail_reads(self, method: &'static str, times: u32) -> Self {
        self.read_failures.lock().insert(method, times);
        self
    }

    /// Queue a result for the next write of `method`. Unscripted writes succeed.
    pub fn with_write_result(
        self,
        method: &'static str,
        result: Result<TxReceipt, WriteError>,
    ) -> Self {
        self.write_results
            .lock()
            .entry(method)
            .or_default()
            .push_back(result);
        self
    }

    pub fn with_validate_result(mut self, result: Result<(), ConnectionError>) -> Self {
        self.validate_result = result;
        self
    }

    /// Hold every write until the gate is notified.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn events(&self) -> Vec<ContractEvent> {
        self.events.lock().clone()
    }

    /// Writes sent, in order.
    pub fn writes(&self) -> Vec<WriteCall> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                ContractEvent::Sent(call) => Some(call.clone()),
                _ => None,
            })
            .collect()
    }

    /// How many times the read `method` was attempted.
    pub fn read_count(&self, method: &'static str) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| **event == ContractEvent::Read(method))
            .count()
    }

    fn read<T>(&self, method: &'static str, value: impl FnOnce(&MockState) -> T) -> Result<T, ReadError> {
        self.events.lock().push(ContractEvent::Read(method));
        {
            let mut failures = self.read_failures.lock();
            if let Some(remaining) = failures.get_mut(method) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(ReadError::rpc(method, "scripted failure"));
                }
            }
        }
        Ok(value(&self.state.lock()))
    }
}

impl Default for MockShareContract {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShareContract for MockShareContract {
    fn address(&self) -> Address {
        self.address
    }

    fn token_address(&self) -> Address {
        self.token_address
    }

    fn account(&self) -> Option<Address> {
        self.account
    }

    async fn validate(&self) -> Result<(), ConnectionError> {
        self.events.lock().push(ContractEvent::Read("eth_getCode"));
        self.validate_result.clone()
    }

    async fn contract_info(&self) -> Result<ContractInfo, ReadError> {
        self.read("getContractInfo", |s| s.contract_info)
    }

    async fn balance_of(&self, _account: Address) -> Result<Amount, ReadError> {
        self.read("balanceOf", |s| s.plstr_balance)
    }

    async fn backing_ratio(&self) -> Result<Amount, ReadError> {
        self.read("getVPLSBackingRatio", |s| s.backing_ratio)
    }

    async fn redeemable_staked_pls(
        &self,
        _account: Address,
        shares: Amount,
    ) -> Result<Amount, ReadError> {
        self.read("getRedeemableStakedPLS", |s| {
            Amount::from_raw(shares.raw() * s.backing_ratio.raw() / tokens(1).raw())
        })
    }

    async fn redeemable_vpls(&self, _account: Address) -> Result<Amount, ReadError> {
        self.read("redeemableVPLS", |s| s.redeemable_vpls)
    }

    async fn owner(&self) -> Result<Address, ReadError> {
        self.read("owner", |s| s.owner)
    }

    async fn owner_mint_info(&self) -> Result<OwnerMintInfo, ReadError> {
        self.read("getOwnerMintInfo", |s| s.owner_mint_info)
    }

    async fn user_share_info(&self, _account: Address) -> Result<Amount, ReadError> {
        self.read("getUserShareInfo", |s| s.share_info)
    }

    async fn token_balance_of(&self, _account: Address) -> Result<Amount, ReadError> {
        self.read("token.balanceOf", |s| s.vpls_balance)
    }

    async fn token_allowance(
        &self,
        _owner: Address,
        _spender: Address,
    ) -> Result<Amount, ReadError> {
        self.read("allowance", |s| s.allowance)
    }

    async fn submit(&self, call: WriteCall) -> Result<TxReceipt, WriteError> {
        if self.account.is_none() {
            return Err(WriteError::ReadOnly);
        }
        let method = call.method();
        self.events.lock().push(ContractEvent::Sent(call.clone()));

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let scripted = self
            .write_results
            .lock()
            .get_mut(method)
            .and_then(VecDeque::pop_front);
        let result = scripted.unwrap_or_else(|| {
            Ok(receipt(self.tx_counter.fetch_add(1, Ordering::SeqCst) + 1))
        });

        if result.is_ok() {
            if let WriteCall::ApproveToken { amount, .. } = &call {
                self.state.lock().allowance = *amount;
            }
            self.events.lock().push(ContractEvent::Settled(method));
        }
        result
    }
}

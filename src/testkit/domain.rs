//! Builders for domain primitives used across tests.

use alloy_primitives::Address;

use crate::domain::{Amount, TxReceipt};

/// Deterministic address whose last byte is `n`.
pub fn addr(n: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[19] = n;
    Address::from(bytes)
}

/// Whole-token [`Amount`].
pub fn tokens(whole: u64) -> Amount {
    Amount::from_tokens(whole)
}

/// Receipt with a hash derived from `n`.
pub fn receipt(n: u64) -> TxReceipt {
    TxReceipt {
        tx_hash: format!("0x{n:064x}"),
        block_number: Some(n),
    }
}

//! Wallet CLI handlers.

pub mod address;
pub mod status;

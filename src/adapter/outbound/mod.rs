//! Outbound adapters (driven side).

pub mod retrying;
pub mod rpc;

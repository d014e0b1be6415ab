//! JSON-RPC adapters built on alloy.

pub mod bindings;
pub mod classify;
pub mod contract;
pub mod probe;

pub use contract::RpcShareContract;
pub use probe::RpcProbe;

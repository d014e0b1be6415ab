//! Ports implemented by the RPC adapters and the test kit.

pub mod contract;
pub mod probe;

pub use contract::ShareContract;
pub use probe::ChainProbe;

//! Network-agnostic types: amounts, estimates, actions and contract descriptors.

pub mod action;
pub mod amount;
pub mod connection;
pub mod contract;
pub mod estimate;

pub use action::{ActionKind, ActionLimits, ActionRequest, ActionState, PreparedAction};
pub use amount::Amount;
pub use connection::{ConnectionHandle, ProviderKind};
pub use contract::{ContractInfo, OwnerMintInfo, TxReceipt, WriteCall};
pub use estimate::{estimate, EstimateResult, FeeSchedule};

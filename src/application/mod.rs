//! Application layer: connection acquisition, read refresh, quotes and actions.

pub mod connection;
pub mod dashboard;
pub mod executor;
pub mod quote;

pub use connection::{ConnectionProvider, WalletIdentity};
pub use dashboard::{AccountSnapshot, DashboardSnapshot};
pub use executor::{ActionExecutor, ActionOutcome};
pub use quote::{issue_estimate, redeem_quote, RedeemQuote};

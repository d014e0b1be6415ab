//! Client for the PLSTR share contract.
//!
//! PLSTR is issued against deposited vPLS and redeemed for it at the
//! contract's backing ratio. This crate connects to an Ethereum JSON-RPC
//! endpoint (through a local signing wallet when one is configured), reads
//! contract and account state, produces fee estimates, and submits the
//! user and owner actions.
//!
//! # Architecture
//!
//! - [`domain`] - Amounts, estimates, write descriptors and action state
//! - [`port`] - The `ShareContract` and `ChainProbe` seams
//! - [`adapter`] - alloy-backed RPC adapters, the retrying decorator, the CLI
//! - [`application`] - Connection acquisition, read refresh, quotes, actions
//! - [`infrastructure`] - Configuration, wallet loading, session wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - Expose mock contract and probe implementations for integration tests
//!
//! # Example
//!
//! ```
//! use plstr::application::issue_estimate;
//! use plstr::infrastructure::config::FeesConfig;
//!
//! let quote = issue_estimate(&FeesConfig::default(), "1000").rounded(3);
//! assert_eq!(quote.fee.to_string(), "5");
//! assert_eq!(quote.net.to_string(), "995");
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

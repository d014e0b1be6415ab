//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`contract`] - `MockShareContract`, an in-memory contract with an event log.
//! - [`probe`] - `ScriptedProbe`, fixed per-URL endpoint answers.
//! - [`domain`] - Builders for addresses, amounts and receipts.
//! - [`config`] - Canonical test configurations.

pub mod config;
pub mod contract;
pub mod domain;
pub mod probe;

pub use contract::{ContractEvent, MockShareContract, MockState};
pub use probe::ScriptedProbe;

//! Miette diagnostics for errors that reach the top of the CLI.
//!
//! Each crate error is mapped to a diagnostic with a code and, where there
//! is a concrete next step, a help line.

use std::fmt::Display;

use miette::Diagnostic;
use thiserror::Error;

use crate::error::{ConfigError, ConnectionError, Error, ValidationError, WriteError};

/// A rendered CLI failure.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliDiagnostic {
    pub message: String,
    pub code: &'static str,
    pub help: Option<String>,
}

impl Diagnostic for CliDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn Display + 'a>)
    }
}

impl CliDiagnostic {
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Map a crate error to a diagnostic with a suggestion where one exists.
#[must_use]
pub fn diagnose(error: &Error) -> CliDiagnostic {
    let message = error.to_string();
    match error {
        Error::Config(e) => {
            let diagnostic = CliDiagnostic::new("plstr::config", message);
            match e {
                ConfigError::MissingField { field }
                    if field.starts_with("PLSTR_KEYSTORE_PASSWORD") =>
                {
                    diagnostic.with_help(
                        "set PLSTR_KEYSTORE_PASSWORD or PLSTR_KEYSTORE_PASSWORD_FILE to unlock the keystore",
                    )
                }
                _ => diagnostic.with_help("run `plstr check config` to validate the file"),
            }
        }
        Error::Connection(e) => {
            let diagnostic = CliDiagnostic::new("plstr::connection", message);
            match e {
                ConnectionError::NoProvider { .. } => diagnostic
                    .with_help("check your network, or add endpoints under [network] rpc_urls"),
                ConnectionError::ContractUnreachable { .. } => diagnostic.with_help(
                    "verify [contract] address and that the endpoint serves the configured chain",
                ),
                ConnectionError::Wallet { .. } => {
                    diagnostic.with_help("check [wallet] rpc_url or unset it to use the fallback endpoints")
                }
            }
        }
        Error::Read(_) => CliDiagnostic::new("plstr::read", message)
            .with_help("the endpoint may be rate limiting; retry or raise [retry] max_attempts"),
        Error::Write(e) => {
            let diagnostic = CliDiagnostic::new("plstr::transaction", message);
            match e {
                WriteError::ReadOnly => diagnostic.with_help(
                    "set WALLET_PRIVATE_KEY or [wallet] keystore_path to send transactions",
                ),
                WriteError::Reverted {
                    tx_hash: Some(hash),
                    ..
                } => diagnostic.with_help(format!("transaction {hash}")),
                _ => diagnostic,
            }
        }
        Error::Validation(e) => {
            let diagnostic = CliDiagnostic::new("plstr::input", message);
            match e {
                ValidationError::NotOwner { .. } => {
                    diagnostic.with_help("admin commands must be signed by the contract owner")
                }
                ValidationError::BelowMinimum { minimum, .. } => {
                    diagnostic.with_help(format!("issue at least {minimum} vPLS"))
                }
                ValidationError::InvalidAmount { .. } => {
                    diagnostic.with_help("amounts are decimal token units with up to 18 places, e.g. 1005.5")
                }
                _ => diagnostic,
            }
        }
        Error::Io(_) => CliDiagnostic::new("plstr::io", message)
            .with_help("pass --yes to skip the confirmation prompt when not running in a terminal"),
        Error::Json(_) | Error::Url(_) => CliDiagnostic::new("plstr::internal", message),
    }
}

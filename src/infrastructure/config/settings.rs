//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for sensitive values like `WALLET_PRIVATE_KEY`. Every section has defaults,
//! so an empty file (or no file at all) targets the mainnet deployment.
//!
//! # Example
//!
//! ```no_run
//! use plstr::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::logging::LoggingConfig;
use super::network::{ContractConfig, FeesConfig, NetworkConfig, RetryConfig};
use super::wallet::WalletConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Chain ID and fallback RPC endpoints.
    #[serde(default)]
    pub network: NetworkConfig,

    /// PLSTR contract and vPLS token addresses.
    #[serde(default)]
    pub contract: ContractConfig,

    /// Fee rates and issuance minimum for local estimates.
    #[serde(default)]
    pub fees: FeesConfig,

    /// Backoff policy applied to every read.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Wallet configuration for transaction signing.
    ///
    /// Private key is loaded from `WALLET_PRIVATE_KEY` environment variable.
    #[serde(default)]
    pub wallet: WalletConfig,
}

fn read_keystore_password() -> Result<String> {
    if let Ok(password) = std::env::var("PLSTR_KEYSTORE_PASSWORD") {
        return Ok(password);
    }
    if let Ok(path) = std::env::var("PLSTR_KEYSTORE_PASSWORD_FILE") {
        let contents = fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let password = contents.trim().to_string();
        if password.is_empty() {
            return Err(ConfigError::MissingField {
                field: "PLSTR_KEYSTORE_PASSWORD_FILE",
            }
            .into());
        }
        return Ok(password);
    }

    Err(ConfigError::MissingField {
        field: "PLSTR_KEYSTORE_PASSWORD",
    }
    .into())
}

fn decrypt_keystore_private_key(path: &str, password: &str) -> Result<String> {
    use alloy_signer_local::PrivateKeySigner;

    let signer = PrivateKeySigner::decrypt_keystore(path, password).map_err(|e| {
        ConfigError::InvalidValue {
            field: "keystore_path",
            reason: e.to_string(),
        }
    })?;
    Ok(format!("{:x}", signer.to_bytes()))
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Loads the private key from the `WALLET_PRIVATE_KEY` environment variable
    /// or decrypts it from a keystore file if `keystore_path` is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., no RPC endpoints, fee out of range)
    /// - Keystore decryption fails when using keystore authentication
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        // Load private key from environment variable (never from config file for security)
        config.wallet.private_key = std::env::var("WALLET_PRIVATE_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        if config.wallet.private_key.is_none() {
            if let Some(ref keystore_path) = config.wallet.keystore_path {
                let password = read_keystore_password()?;
                config.wallet.private_key =
                    Some(decrypt_keystore_private_key(keystore_path, &password)?);
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load the file if it exists, otherwise use built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file is unreadable or invalid.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are present and values are within
    /// acceptable ranges.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.network.rpc_urls.is_empty() {
            return Err(ConfigError::MissingField { field: "rpc_urls" }.into());
        }
        let endpoints = self
            .network
            .rpc_urls
            .iter()
            .chain(self.wallet.rpc_url.iter());
        for url in endpoints {
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidValue {
                    field: "rpc_urls",
                    reason: format!("{url} must use http or https"),
                }
                .into());
            }
        }
        if self.network.probe_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "probe_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        for (field, fee) in [
            ("issue_fee", self.fees.issue_fee),
            ("redeem_fee", self.fees.redeem_fee),
        ] {
            if fee < Decimal::ZERO || fee >= Decimal::ONE {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be at least 0 and below 1".to_string(),
                }
                .into());
            }
        }
        if self.fees.display_decimals > 18 {
            return Err(ConfigError::InvalidValue {
                field: "display_decimals",
                reason: "must be 18 or fewer".to_string(),
            }
            .into());
        }

        if self.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_attempts",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.retry.base_delay_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "base_delay_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.retry.max_delay_ms < self.retry.base_delay_ms {
            return Err(ConfigError::InvalidValue {
                field: "max_delay_ms",
                reason: "must be >= base_delay_ms".to_string(),
            }
            .into());
        }
        if self.retry.backoff_multiplier < 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "backoff_multiplier",
                reason: "must be >= 1.0".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Amount;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_config_uses_mainnet_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.network.chain_id, 1);
        assert_eq!(config.network.rpc_urls.len(), 3);
        assert_eq!(config.fees.issue_fee, dec!(0.005));
        assert_eq!(config.fees.min_issue, Amount::from_tokens(1005));
        assert_eq!(
            config.contract.address.to_string(),
            "0x6c1dA678A1B615f673208e74AB3510c22117090e"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_fee_overrides() {
        let config: Config = toml::from_str(
            r#"
[fees]
issue_fee = "0.01"
min_issue = "10.5"
"#,
        )
        .unwrap();
        assert_eq!(config.fees.issue_fee, dec!(0.01));
        assert_eq!(config.fees.min_issue, Amount::parse("10.5").unwrap());
    }
}

//! Infrastructure configuration modules.

pub mod logging;
pub mod network;
pub mod settings;
pub mod wallet;

pub use logging::LoggingConfig;
pub use network::{ContractConfig, FeesConfig, NetworkConfig, RetryConfig};
pub use settings::Config;
pub use wallet::WalletConfig;

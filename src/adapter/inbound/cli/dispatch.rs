//! Routes parsed commands to their handlers.

use std::path::Path;

use super::command::{CheckCommand, Cli, Commands, QuoteCommand, WalletCommand};
use super::{action, check, info, quote, wallet};
use crate::domain::ActionRequest;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Run one parsed command to completion.
///
/// The configuration is loaded per arm so `check config` can report on a file
/// that does not load.
pub async fn execute(cli: Cli) -> Result<()> {
    let path = cli.config_path();
    let verbose = cli.verbose;
    let config = || load(&path, verbose);

    match cli.command {
        Commands::Info => info::execute(&config()?).await,
        Commands::Quote(QuoteCommand::Issue { amount }) => {
            quote::execute_issue(&config()?, &amount);
            Ok(())
        }
        Commands::Quote(QuoteCommand::Redeem { amount }) => {
            quote::execute_redeem(&config()?, &amount).await
        }
        Commands::Issue(args) => {
            let request = ActionRequest::Issue { amount: args.amount };
            action::execute(&config()?, request, args.yes).await
        }
        Commands::Redeem(args) => {
            let request = ActionRequest::Redeem { amount: args.amount };
            action::execute(&config()?, request, args.yes).await
        }
        Commands::Admin(admin) => {
            let (request, yes) = admin.into_request();
            action::execute(&config()?, request, yes).await
        }
        Commands::Check(CheckCommand::Config) => {
            init_default_logging(verbose);
            check::config::execute_config(&path)
        }
        Commands::Check(CheckCommand::Connection) => {
            check::connection::execute_connection(&config()?).await
        }
        Commands::Wallet(WalletCommand::Address) => {
            wallet::address::execute_address(&config()?)
        }
        Commands::Wallet(WalletCommand::Status) => {
            wallet::status::execute_status(&config()?).await
        }
    }
}

fn load(path: &Path, verbose: u8) -> Result<Config> {
    let mut config = Config::load_or_default(path)?;
    config.logging.apply_verbosity(verbose);
    config.init_logging();
    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

fn init_default_logging(verbose: u8) {
    let mut logging = crate::infrastructure::config::LoggingConfig::default();
    logging.apply_verbosity(verbose);
    logging.init();
}

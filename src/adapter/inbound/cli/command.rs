//! Command-line interface definitions.
//!
//! Read commands (`info`, `quote`, `check`) work without a wallet. Write
//! commands need `WALLET_PRIVATE_KEY` or a configured keystore, and ask for
//! confirmation unless `--yes` is given.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::paths;
use crate::domain::ActionRequest;

/// Client for the PLSTR share contract
#[derive(Parser, Debug)]
#[command(name = "plstr")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file [default: ~/.plstr/config.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The config path, falling back to the default location.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(paths::default_config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show contract, owner and account state
    Info,

    /// Estimate fees and proceeds without sending anything
    #[command(subcommand)]
    Quote(QuoteCommand),

    /// Issue PLSTR by depositing vPLS (approves the exact amount first)
    Issue(AmountArgs),

    /// Redeem PLSTR for vPLS
    Redeem(AmountArgs),

    /// Owner-only contract administration
    #[command(subcommand)]
    Admin(AdminCommand),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),

    /// Inspect the configured wallet
    #[command(subcommand)]
    Wallet(WalletCommand),
}

#[derive(Subcommand, Debug)]
pub enum QuoteCommand {
    /// Fee and PLSTR received for issuing from an amount of vPLS
    Issue {
        /// vPLS amount, e.g. 1000 or 1000.5
        amount: String,
    },
    /// vPLS received for redeeming an amount of PLSTR
    Redeem {
        /// PLSTR amount
        amount: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Deposit vPLS into the contract (approves the exact amount first)
    Deposit(AmountArgs),
    /// Mint PLSTR to the owner
    Mint(AmountArgs),
    /// Recover tokens held by the contract
    Recover(RecoverArgs),
    /// Hand contract ownership to another address
    TransferOwnership(TransferOwnershipArgs),
}

#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file
    Config,
    /// Acquire a connection and verify the contract is deployed
    Connection,
}

#[derive(Subcommand, Debug)]
pub enum WalletCommand {
    /// Show the signing address
    Address,
    /// Show vPLS and PLSTR balances and the current vPLS allowance
    Status,
}

#[derive(Args, Debug)]
pub struct AmountArgs {
    /// Token amount, e.g. 1005 or 0.25
    pub amount: String,

    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct RecoverArgs {
    /// Token contract to recover
    #[arg(long)]
    pub token: String,

    /// Address receiving the tokens
    #[arg(long)]
    pub recipient: String,

    /// Token amount
    #[arg(long)]
    pub amount: String,

    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct TransferOwnershipArgs {
    /// New owner address
    pub new_owner: String,

    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

impl AdminCommand {
    /// The action to run and whether confirmation was pre-approved.
    #[must_use]
    pub fn into_request(self) -> (ActionRequest, bool) {
        match self {
            Self::Deposit(args) => (ActionRequest::Deposit { amount: args.amount }, args.yes),
            Self::Mint(args) => (ActionRequest::Mint { amount: args.amount }, args.yes),
            Self::Recover(args) => (
                ActionRequest::Recover {
                    token: args.token,
                    recipient: args.recipient,
                    amount: args.amount,
                },
                args.yes,
            ),
            Self::TransferOwnership(args) => (
                ActionRequest::TransferOwnership {
                    new_owner: args.new_owner,
                },
                args.yes,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_admin_recover() {
        let cli = Cli::try_parse_from([
            "plstr",
            "admin",
            "recover",
            "--token",
            "0x0181e249c507d3b454dE2444444f0Bf5dBE72d09",
            "--recipient",
            "0x0000000000000000000000000000000000000001",
            "--amount",
            "5",
            "--yes",
        ])
        .unwrap();
        let Commands::Admin(admin) = cli.command else {
            panic!("expected admin command");
        };
        let (request, yes) = admin.into_request();
        assert!(yes);
        assert_eq!(request.kind(), crate::domain::ActionKind::Recover);
    }

    #[test]
    fn global_flags_apply_after_subcommand() {
        let cli = Cli::try_parse_from(["plstr", "quote", "issue", "1000", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(cli.config_path().ends_with("config.toml"));
    }
}

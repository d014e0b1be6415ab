use clap::Parser;

use plstr::adapter::inbound::cli::command::Cli;
use plstr::adapter::inbound::cli::output::{self, OutputConfig};
use plstr::adapter::inbound::cli::{diagnostic, dispatch};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    let json = cli.json;

    if let Err(e) = dispatch::execute(cli).await {
        if json {
            output::error(&e.to_string());
        } else {
            eprintln!("{:?}", miette::Report::new(diagnostic::diagnose(&e)));
        }
        std::process::exit(1);
    }
}

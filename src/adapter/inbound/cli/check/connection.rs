use crate::adapter::inbound::cli::{info, output};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;
use crate::port::ShareContract;

/// Acquire a connection and check that contract code exists.
pub async fn execute_connection(config: &Config) -> Result<()> {
    output::section("Connection Check");
    output::field("Candidates", config.network.rpc_urls.len());

    let pb = output::spinner("Probing endpoints...");
    let session = match bootstrap::connect(config).await {
        Ok(session) => {
            output::spinner_success(&pb, "Contract reachable");
            session
        }
        Err(e) => {
            output::spinner_fail(&pb, "Connection failed");
            return Err(e);
        }
    };

    info::render_connection(&session.connection, session.contract.address());
    output::success("Connection checks passed");
    Ok(())
}

//! Session check runner.
//!
//! Loads the client configuration, makes sure the organisation has a valid
//! API session (creating one when needed), prints the outcome and destroys
//! the session again.
//!
//! ```text
//! TRADELINK_ORG_ID=... TRADELINK_API_KEY=... TRADELINK_API_PASSWORD=... \
//!     session-check [path/to/client.toml]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tradelink_client::{ClientConfig, OrgSession};

fn main() -> ExitCode {
    init_tracing();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = match ClientConfig::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Could not load client configuration");
            return ExitCode::FAILURE;
        }
    };

    let mut session = match OrgSession::from_config(&config) {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "Could not set up organisation session");
            return ExitCode::FAILURE;
        }
    };

    info!(base_url = %config.api.base_url, org_id = %config.organisation.id, "Checking organisation session");

    let envelope = session.validate_or_create();
    println!("result:      {}", envelope.result.as_str());
    println!("result_code: {}", envelope.result_code);
    println!("message:     {}", envelope.result_message);

    if !session.session_exists() {
        return ExitCode::FAILURE;
    }

    println!("api_version: {}", session.api_version());
    let destroyed = session.destroy();
    info!(result_code = %destroyed.result_code, "Session destroyed");

    ExitCode::SUCCESS
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tradelink=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

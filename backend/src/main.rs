//! Main entry point for the profile service.
//!
//! Initializes logging and hands over to `devprofile::start_server`.

use std::process::ExitCode;

use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    devprofile::init_tracing();

    match devprofile::start_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "server stopped");
            ExitCode::FAILURE
        }
    }
}

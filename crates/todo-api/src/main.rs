//! Todo API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p todo-api
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env` file.

use todo_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Configuration decides the log format, so it is loaded first.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            if try_init_tracing().is_err() {
                eprintln!("Failed to load configuration: {e}");
            }
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        name = %config.app.name,
        env = ?config.app.env,
        port = config.api.port,
        "Starting Todo API Server"
    );

    todo_api::run(config).await?;

    Ok(())
}

//! Rate-card API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p ratecard-api
//! ```
//!
//! Configuration is read from environment variables (and `.env` if present).

use ratecard_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            if let Err(tracing_err) = try_init_tracing() {
                eprintln!("Warning: Failed to initialize tracing: {tracing_err}");
            }
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        address = %config.api.address(),
        "Starting rate-card API server"
    );

    if let Err(e) = ratecard_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

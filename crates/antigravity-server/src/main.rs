use anyhow::{Context, Result};
use antigravity_server::{logging, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    logging::init_from_env().context("Failed to initialize logging")?;

    // Load configuration from environment variables
    let config = ServerConfig::load().context("Failed to load configuration")?;

    // Run the server using the library's run function
    antigravity_server::run(config)
        .await
        .context("Server error")?;

    Ok(())
}

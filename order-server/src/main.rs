use anyhow::Context;
use order_server::{Config, Server, ServerState, init_logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env is optional)
    dotenv::dotenv().ok();

    // 2. Configuration
    let config = Config::from_env().context("failed to load configuration")?;

    // 3. Logging (the guard must live until exit)
    let _log_guard = init_logger(&config.log_level, config.log_dir.as_deref())
        .context("failed to initialize logging")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        "Order server starting"
    );

    // 4. Server state
    let state = ServerState::initialize(&config).context("failed to open storage")?;

    // 5. HTTP server
    Server::with_state(config, state)
        .run()
        .await
        .context("server stopped with an error")?;

    Ok(())
}

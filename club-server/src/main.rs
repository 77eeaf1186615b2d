use club_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. dotenv + logging
    setup_environment();

    tracing::info!("Club registration server starting...");

    // 2. Configuration
    let config = Config::from_env().inspect_err(|e| tracing::error!("{e}"))?;

    // 3. State (database + migrations)
    let state = ServerState::initialize(&config)
        .await
        .inspect_err(|e| tracing::error!("Startup failed: {e}"))?;

    // 4. HTTP server
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

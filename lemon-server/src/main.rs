use lemon_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. dotenv and logging
    setup_environment();

    print_banner();

    tracing::info!("Little Lemon server starting...");

    // 2. Configuration
    let config = Config::from_env()?;

    // 3. Database, groups, bootstrap admin
    let state = ServerState::initialize(&config).await?;

    // 4. Serve until ctrl-c
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}

use comanda_server::{Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env, logging) and configuration
    let config = setup_environment();

    print_banner();
    tracing::info!(
        port = config.http_port,
        environment = %config.environment,
        timezone = %config.timezone,
        "ComandaGo server starting..."
    );

    // 2. Database and services
    let state = ServerState::initialize(&config).await?;

    // 3. HTTP server until Ctrl+C / SIGTERM
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

use print_server::{Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. dotenv, configuration and logging
    let config = setup_environment()?;

    print_banner();

    tracing::info!(environment = %config.environment, "Markit print server starting...");

    // 2. Printer gateway and renderers
    let state = ServerState::initialize(&config);

    // 3. HTTP server until ctrl-c
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

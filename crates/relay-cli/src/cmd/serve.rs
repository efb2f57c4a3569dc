use anyhow::Result;
use relay_core::Orchestrator;
use relay_gateway::GatewayClient;
use relay_server::AppState;
use std::path::Path;
use std::sync::Arc;

pub fn run(root: &Path, port: Option<u16>) -> Result<()> {
    let (config, db) = super::open_store(root)?;
    let client = GatewayClient::from_config(&config.gateway)?;
    let port = port.unwrap_or(config.server.port);

    let orchestrator = Orchestrator::new(Arc::new(db), Arc::new(client), config.gateway);
    let state = AppState::new(orchestrator);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
        let actual_port = listener.local_addr()?.port();
        println!("studio relay → http://localhost:{actual_port}");

        tokio::select! {
            res = relay_server::serve_on(state, listener) => res,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                Ok(())
            }
        }
    })
}

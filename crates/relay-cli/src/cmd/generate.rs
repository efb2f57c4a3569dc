use anyhow::{Context, Result};
use relay_core::config::RelayConfig;
use relay_core::store::MemoryStore;
use relay_core::Orchestrator;
use relay_gateway::GatewayClient;
use std::path::Path;
use std::sync::Arc;

use crate::output::print_json;

/// One-shot generation: nothing is written to the database.
pub fn run(root: &Path, prompt: &str, context_file: Option<&Path>) -> Result<()> {
    let context = match context_file {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let value: serde_json::Value = serde_json::from_str(&data)
                .with_context(|| format!("{} is not valid JSON", path.display()))?;
            Some(value)
        }
        None => None,
    };

    // Generation never writes, so no database is opened.
    let config = RelayConfig::load(root).context("failed to load .relay/config.yaml")?;
    let client = GatewayClient::from_config(&config.gateway)?;
    let orchestrator = Orchestrator::new(
        Arc::new(MemoryStore::new()),
        Arc::new(client),
        config.gateway,
    );

    let rt = tokio::runtime::Runtime::new()?;
    let action = rt.block_on(orchestrator.generate(prompt, context.as_ref()))?;
    print_json(&action)
}

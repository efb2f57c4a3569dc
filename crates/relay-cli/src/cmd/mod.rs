pub mod generate;
pub mod history;
pub mod init;
pub mod pending;
pub mod serve;

use anyhow::{Context, Result};
use relay_core::config::RelayConfig;
use relay_core::store::RelayDb;
use std::path::Path;

/// Load config and open the database it points at.
pub(crate) fn open_store(root: &Path) -> Result<(RelayConfig, RelayDb)> {
    let config = RelayConfig::load(root).context("failed to load .relay/config.yaml")?;
    let db_path = config.db_path(root);
    let db = RelayDb::open(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    Ok((config, db))
}

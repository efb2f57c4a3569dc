use anyhow::{bail, Result};
use relay_core::config::RelayConfig;
use relay_core::paths;
use std::path::Path;

pub fn run(root: &Path, force: bool) -> Result<()> {
    let path = paths::config_path(root);
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    RelayConfig::default().save(root)?;
    println!("wrote {}", path.display());
    Ok(())
}

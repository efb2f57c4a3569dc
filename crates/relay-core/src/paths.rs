use std::path::{Path, PathBuf};

pub const RELAY_DIR: &str = ".relay";
pub const CONFIG_FILE: &str = "config.yaml";
pub const DB_FILE: &str = "relay.db";

pub fn relay_dir(root: &Path) -> PathBuf {
    root.join(RELAY_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    relay_dir(root).join(CONFIG_FILE)
}

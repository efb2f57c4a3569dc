use crate::error::{RelayError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// GatewayConfig
// ---------------------------------------------------------------------------

/// Settings for the chat-completion gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Name of the environment variable holding the bearer token.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://ai.gateway.lovable.dev/v1".to_string()
}

fn default_model() -> String {
    "google/gemini-2.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_api_key_env() -> String {
    "AI_GATEWAY_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GatewayConfig {
    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(RelayError::Config(format!(
                "{} not configured",
                self.api_key_env
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// StorageConfig / ServerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database file, relative to the project root unless absolute.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

fn default_db_path() -> PathBuf {
    PathBuf::from(paths::RELAY_DIR).join(paths::DB_FILE)
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    3141
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

// ---------------------------------------------------------------------------
// RelayConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl RelayConfig {
    /// Load `.relay/config.yaml` under `root`; a missing file yields defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let config: RelayConfig = serde_yaml::from_str(&data)?;
        Ok(config)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        let path = paths::config_path(root);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Absolute location of the database for a project rooted at `root`.
    pub fn db_path(&self, root: &Path) -> PathBuf {
        if self.storage.path.is_absolute() {
            self.storage.path.clone()
        } else {
            root.join(&self.storage.path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = RelayConfig::load(dir.path()).unwrap();
        assert_eq!(config, RelayConfig::default());
        assert_eq!(config.gateway.model, "google/gemini-2.5-flash");
        assert_eq!(config.server.port, 3141);
        assert_eq!(
            config.db_path(dir.path()),
            dir.path().join(".relay").join("relay.db")
        );
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".relay")).unwrap();
        std::fs::write(
            dir.path().join(".relay/config.yaml"),
            "gateway:\n  model: openai/gpt-4o-mini\n  temperature: 0.2\n",
        )
        .unwrap();

        let config = RelayConfig::load(dir.path()).unwrap();
        assert_eq!(config.gateway.model, "openai/gpt-4o-mini");
        assert!((config.gateway.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.gateway.base_url, "https://ai.gateway.lovable.dev/v1");
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = TempDir::new().unwrap();
        let mut config = RelayConfig::default();
        config.server.port = 8080;
        config.storage.path = PathBuf::from("/var/lib/relay.db");
        config.save(dir.path()).unwrap();

        let loaded = RelayConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.db_path(dir.path()), PathBuf::from("/var/lib/relay.db"));
    }

    #[test]
    fn missing_api_key_is_config_error() {
        let gateway = GatewayConfig {
            api_key_env: "RELAY_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..GatewayConfig::default()
        };
        assert!(matches!(gateway.api_key(), Err(RelayError::Config(_))));
    }
}

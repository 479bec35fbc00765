use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

/// Environment variable overriding `storage.root_path`.
pub const STORAGE_ROOT_ENV: &str = "LOCAL_STORAGE_ROOT_PATH";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory every storage key resolves under.
    #[serde(default = "default_root_path")]
    pub root_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { root_path: default_root_path() }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

fn default_root_path() -> String { "storage".to_string() }

/// Load from `CONFIG_PATH` (or `config.toml`). A missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_or_default(&path)
}

/// Like `load_from_file`, but a file that does not exist yields defaults.
pub fn load_or_default(path: &str) -> Result<AppConfig> {
    match load_from_file(path) {
        Err(e) if e.downcast_ref::<std::io::Error>().is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound) => {
            Ok(AppConfig::default())
        }
        other => other,
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).with_context(|| format!("cannot read {path}"))?;
    from_toml_str(&content).with_context(|| format!("parse {path}"))
}

pub fn from_toml_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.storage.normalize_from_env();
        self.storage.validate()?;
        Ok(())
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        self.apply_root_override(std::env::var(STORAGE_ROOT_ENV).ok());
    }

    /// A non-blank override wins over the file value.
    pub fn apply_root_override(&mut self, root: Option<String>) {
        if let Some(root) = root.filter(|r| !r.trim().is_empty()) {
            self.root_path = root;
        }
        self.root_path = self.root_path.trim().to_string();
    }

    pub fn validate(&self) -> Result<()> {
        if self.root_path.is_empty() {
            return Err(anyhow!("storage.root_path is empty; set it in config.toml or {STORAGE_ROOT_ENV}"));
        }
        Ok(())
    }
}

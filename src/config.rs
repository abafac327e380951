use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Directory where generated QR images are written and served from.
    pub static_path: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/outpass.db".to_string(),
            log_level: "info".to_string(),
            static_path: "static".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen port. Overridden by the `PORT` environment variable.
    pub port: u16,

    /// External base address used when building verification URLs
    /// embedded in QR payloads.
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 10000,
            base_url: "http://localhost:10000".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        let mut config = None;
        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                config = Some(Self::load_from_path(path)?);
                break;
            }
        }

        let mut config = config.unwrap_or_default();

        if let Some(port) = parse_port(std::env::var("PORT").ok())? {
            config.server.port = port;
        }
        config.server.base_url = config.server.base_url.trim_end_matches('/').to_string();

        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("outpass").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".outpass").join("config.toml"));
        }

        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        if self.server.base_url.is_empty() {
            anyhow::bail!("Base URL cannot be empty");
        }

        Ok(())
    }
}

/// Parse an optional `PORT` environment value, failing loudly on garbage
/// rather than silently falling back to the default.
fn parse_port(value: Option<String>) -> Result<Option<u16>> {
    match value {
        Some(raw) => {
            let port = raw
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT value: {raw}"))?;
            Ok(Some(port))
        }
        None => Ok(None),
    }
}

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Location of the spot collection document.
    #[serde(default = "default_storage_path")]
    pub path: String,
    /// Write through `<path>.tmp` and rename over the target.
    #[serde(default = "default_true")]
    pub atomic_writes: bool,
    /// Seed an empty collection at startup when the file is absent.
    #[serde(default = "default_true")]
    pub create_if_missing: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { path: default_storage_path(), atomic_writes: true, create_if_missing: true }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 8080 }
fn default_storage_path() -> String { "spot.json".into() }
fn default_true() -> bool { true }

fn default_config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    parse(&content).with_context(|| format!("parsing {path}"))
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Build from `SERVER_HOST`, `SERVER_PORT`, `SPOTS_FILE` and `TOKIO_WORKER_THREADS`,
    /// falling back to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Ok(path) = std::env::var("SPOTS_FILE") {
            cfg.storage.path = path;
        }
        cfg
    }

    /// `CONFIG_PATH` (or `config.toml`) when present, environment otherwise.
    pub fn load_or_env() -> Result<Self> {
        Self::load_or_env_at(&default_config_path())
    }

    /// Only a missing file falls back to the environment. A file that exists
    /// but cannot be read or parsed is an error.
    pub fn load_or_env_at(path: &str) -> Result<Self> {
        let mut cfg = if Path::new(path).exists() { load_from_file(path)? } else { Self::from_env() };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(anyhow!("storage.path must not be empty"));
        }
        Ok(())
    }
}

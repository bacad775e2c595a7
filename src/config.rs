//! Configuration for the registration transport

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment override for the backend base URL
pub const API_BASE_ENV: &str = "SENIOR_REGISTRATION_API_BASE";

/// Default backend base URL
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Settings for the registration backend
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TransportConfig {
    /// Backend base URL
    pub api_base: Option<String>,
}

impl TransportConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("in", "niat", "senior-registration")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the platform config directory
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`, falling back to defaults when absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to the platform config directory
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Base URL to use: environment, then file, then default
    pub fn resolved_api_base(&self) -> String {
        let env = std::env::var(API_BASE_ENV).ok();
        resolve_api_base(env.as_deref(), self.api_base.as_deref())
    }
}

fn resolve_api_base(env: Option<&str>, file: Option<&str>) -> String {
    env.filter(|v| !v.trim().is_empty())
        .or(file.filter(|v| !v.trim().is_empty()))
        .unwrap_or(DEFAULT_API_BASE)
        .trim()
        .trim_end_matches('/')
        .to_string()
}

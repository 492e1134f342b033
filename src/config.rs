use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

pub const CONFIG_ENV_VAR: &str = "EXPLORER_REVEAL_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_launcher")]
    pub launcher: String,
    #[serde(default = "default_path_converter")]
    pub path_converter: String,
    #[serde(default = "default_remote_scheme")]
    pub remote_scheme: String,
    #[serde(default = "default_wsl_authority_prefix")]
    pub wsl_authority_prefix: String,
    #[serde(default = "default_unc_host")]
    pub unc_host: String,
}

fn default_launcher() -> String {
    "explorer.exe".to_string()
}

fn default_path_converter() -> String {
    "wslpath".to_string()
}

fn default_remote_scheme() -> String {
    "vscode-remote".to_string()
}

fn default_wsl_authority_prefix() -> String {
    "wsl+".to_string()
}

fn default_unc_host() -> String {
    "wsl.localhost".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            launcher: default_launcher(),
            path_converter: default_path_converter(),
            remote_scheme: default_remote_scheme(),
            wsl_authority_prefix: default_wsl_authority_prefix(),
            unc_host: default_unc_host(),
        }
    }
}

impl Config {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid config: {}", path.as_ref().display()))
    }

    /// Loads `path` if given, then `$EXPLORER_REVEAL_CONFIG`, else the defaults.
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path).await;
        }
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(env_path) if !env_path.is_empty() => Self::load(env_path).await,
            _ => Ok(Self::default()),
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;

        if config.launcher.trim().is_empty() {
            anyhow::bail!("config: launcher missing");
        }
        if config.path_converter.trim().is_empty() {
            anyhow::bail!("config: path_converter missing");
        }
        if config.remote_scheme.trim().is_empty() {
            anyhow::bail!("config: remote_scheme missing");
        }
        if config.unc_host.trim().is_empty() {
            anyhow::bail!("config: unc_host missing");
        }

        Ok(config)
    }
}

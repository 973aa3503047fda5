//! Configuration loading and data folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Service configuration loaded from the TOML config file.
///
/// Missing sections fall back to defaults, so a config file is optional:
/// the service starts with a usable configuration out of the box.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    /// Data folder override (`data_dir = "/var/lib/tryline"`)
    pub data_dir: Option<String>,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub balancing: BalancingConfig,
}

/// HTTP server bind settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5850
}

/// Remote balancing service settings
///
/// The player-balancing procedure runs in a separate service; only its
/// endpoint location and call timeout are configured here.
#[derive(Debug, Clone, Deserialize)]
pub struct BalancingConfig {
    #[serde(default = "default_balancing_url")]
    pub base_url: String,
    #[serde(default = "default_balancing_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BalancingConfig {
    fn default() -> Self {
        Self {
            base_url: default_balancing_url(),
            timeout_secs: default_balancing_timeout_secs(),
        }
    }
}

fn default_balancing_url() -> String {
    "http://127.0.0.1:5860".to_string()
}

fn default_balancing_timeout_secs() -> u64 {
    30
}

/// Load the TOML config file, if one exists.
///
/// Looks for `~/.config/tryline/config.toml`, then
/// `/etc/tryline/config.toml` on Linux. Absence is not an error.
pub fn load_toml_config() -> Result<TomlConfig> {
    let path = match config_file_path() {
        Some(p) => p,
        None => return Ok(TomlConfig::default()),
    };

    let content = std::fs::read_to_string(&path)?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
    info!("Loaded config file: {}", path.display());
    Ok(config)
}

fn config_file_path() -> Option<PathBuf> {
    if let Some(user_config) = dirs::config_dir().map(|d| d.join("tryline").join("config.toml")) {
        if user_config.exists() {
            return Some(user_config);
        }
    }
    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/tryline/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }
    None
}

/// Data folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. `TRYLINE_DATA_DIR` environment variable
/// 3. TOML config file (`data_dir` key)
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_data_dir(cli_arg: Option<&Path>, toml_config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var("TRYLINE_DATA_DIR") {
        return PathBuf::from(path);
    }

    if let Some(path) = &toml_config.data_dir {
        return PathBuf::from(path);
    }

    default_data_dir()
}

/// Get OS-dependent default data folder path
fn default_data_dir() -> PathBuf {
    if cfg!(target_os = "linux") {
        dirs::data_local_dir()
            .map(|d| d.join("tryline"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/tryline"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("tryline"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/tryline"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("tryline"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\tryline"))
    } else {
        PathBuf::from("./tryline_data")
    }
}

/// Ensure the data folder exists and return the database path inside it
pub fn prepare_data_dir(data_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("tryline.db"))
}

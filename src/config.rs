//! Configuration primitives for the persona profiler.
//!
//! Stored in a machine-readable TOML file located at:
//!   %APPDATA%/PersonaProfiler/config/config.toml on Windows
//!   $XDG_DATA_HOME/PersonaProfiler/config/config.toml on Linux
//!   ~/Library/Application Support/PersonaProfiler/config/config.toml on macOS
//!
//! Every section and field is optional; missing values fall back to the
//! defaults below so an empty or absent file is a valid configuration.

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides the workspace root.
pub const HOME_ENV_VAR: &str = "PERSONAPROFILER_HOME";

/// Standard relative path to the config file (resolved per OS at runtime).
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Name of the durable history record inside the workspace root.
pub const HISTORY_FILE_NAME: &str = "history.json";

/// Root configuration persisted per installation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Where the scrape and persona collaborators live.
    #[serde(default)]
    pub service: ServiceSettings,
    /// Transient status message behaviour.
    #[serde(default)]
    pub notifications: NotificationSettings,
    /// Export artifact placement and print hand-off.
    #[serde(default)]
    pub export: ExportSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Base URL hosting `/scrape` and `/generate_persona`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// How long a notification stays visible before it clears itself (ms).
    #[serde(default = "default_display_ms")]
    pub display_ms: u64,
}

impl NotificationSettings {
    pub fn display_duration(&self) -> Duration {
        Duration::from_millis(self.display_ms)
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            display_ms: default_display_ms(),
        }
    }
}

const fn default_display_ms() -> u64 {
    3_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Directory for exported reports. Defaults to `<workspace>/exports`.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    /// Delay before the printable document asks for the print dialog (ms).
    #[serde(default = "default_print_delay_ms")]
    pub print_delay_ms: u64,
    /// Whether printable documents are handed to the system viewer after writing.
    #[serde(default = "default_open_documents")]
    pub open_documents: bool,
}

impl ExportSettings {
    pub fn print_delay(&self) -> Duration {
        Duration::from_millis(self.print_delay_ms)
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            directory: None,
            print_delay_ms: default_print_delay_ms(),
            open_documents: default_open_documents(),
        }
    }
}

const fn default_print_delay_ms() -> u64 {
    500
}

const fn default_open_documents() -> bool {
    true
}

/// Returns the root directory where the profiler stores data.
///
/// Order of precedence:
/// 1. `PERSONAPROFILER_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    resolve_workspace_root(env::var_os(HOME_ENV_VAR).map(PathBuf::from))
}

fn resolve_workspace_root(home_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = home_override {
        return Ok(path);
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("PersonaProfiler"))
}

/// Path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_file_in(&workspace_root()?))
}

/// Config file location for an explicit workspace root.
pub fn config_file_in(workspace: &Path) -> PathBuf {
    workspace.join("config").join(CONFIG_FILE_NAME)
}

/// Path to the persisted analysis history inside `workspace`.
pub fn history_file_path(workspace: &Path) -> PathBuf {
    workspace.join(HISTORY_FILE_NAME)
}

/// Resolved export directory, honouring the configured override.
pub fn export_dir(config: &AppConfig, workspace: &Path) -> PathBuf {
    match &config.export.directory {
        Some(dir) => dir.clone(),
        None => workspace.join("exports"),
    }
}

/// Loads the configuration from disk or returns defaults.
pub fn load_or_default() -> Result<AppConfig> {
    load_from(&config_file_path()?)
}

/// Reads `path`, or returns defaults when it does not exist.
pub fn load_from(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let cfg: AppConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(cfg)
    } else {
        Ok(AppConfig::default())
    }
}

/// Persists the configuration to disk.
pub fn save(config: &AppConfig) -> Result<()> {
    save_to(config, &config_file_path()?)
}

pub fn save_to(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;
    }
    let data = toml::to_string_pretty(config)?;
    fs::write(path, data).with_context(|| format!("Failed to write config file {:?}", path))?;
    Ok(())
}

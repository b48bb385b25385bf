//! Configuration file loading with precedence handling.

use crate::view_state::{CellGeometry, InvalidGeometry};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "WIDGRID_CONFIG";
/// Environment override for the scroll settle delay.
pub const ENV_SETTLE_DELAY_MS: &str = "WIDGRID_SETTLE_DELAY_MS";
/// Environment override for the simulator interval.
pub const ENV_UPDATE_INTERVAL_MS: &str = "WIDGRID_UPDATE_INTERVAL_MS";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// An override variable is set but not a non-negative integer.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },

    /// Resolved cell sizes are unusable.
    #[error(transparent)]
    Geometry(#[from] InvalidGeometry),
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/widgrid/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Cell width in terminal columns.
    #[serde(default)]
    pub cell_width: Option<u32>,

    /// Cell height in terminal rows.
    #[serde(default)]
    pub cell_height: Option<u32>,

    /// Gap between cells, both axes.
    #[serde(default)]
    pub spacing: Option<u32>,

    /// Scroll settle delay in milliseconds.
    #[serde(default)]
    pub settle_delay_ms: Option<u64>,

    /// Simulator tick interval in milliseconds.
    #[serde(default)]
    pub update_interval_ms: Option<u64>,

    /// Number of generated widgets when no widgets file is given.
    #[serde(default)]
    pub widget_count: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Cell width in terminal columns.
    pub cell_width: u32,
    /// Cell height in terminal rows.
    pub cell_height: u32,
    /// Gap between cells, in both directions.
    pub spacing: u32,
    /// Scroll settle delay in milliseconds.
    pub settle_delay_ms: u64,
    /// Simulator tick interval in milliseconds.
    pub update_interval_ms: u64,
    /// Number of widgets generated when no widget file is given.
    pub widget_count: usize,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            cell_width: 14,
            cell_height: 4,
            spacing: 1,
            settle_delay_ms: 16,
            update_interval_ms: 1000,
            widget_count: 10_000,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Validated cell geometry.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGeometry` if any dimension is zero.
    pub fn geometry(&self) -> Result<CellGeometry, InvalidGeometry> {
        CellGeometry::new(self.cell_width, self.cell_height, self.spacing)
    }

    /// Scroll settle delay.
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Simulator tick interval.
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/widgrid/widgrid.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("widgrid").join("widgrid.log")
    } else {
        PathBuf::from("widgrid.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/widgrid/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("widgrid").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `WIDGRID_CONFIG` environment variable
/// 3. Default path `~/.config/widgrid/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

fn env_millis(var: &'static str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
        Err(_) => Ok(None),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `WIDGRID_SETTLE_DELAY_MS`: Override settle delay
/// - `WIDGRID_UPDATE_INTERVAL_MS`: Override simulator interval
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnv` if a variable is set to a non-integer.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Some(ms) = env_millis(ENV_SETTLE_DELAY_MS)? {
        config.settle_delay_ms = ms;
    }
    if let Some(ms) = env_millis(ENV_UPDATE_INTERVAL_MS)? {
        config.update_interval_ms = ms;
    }
    Ok(config)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        cell_width: config.cell_width.unwrap_or(defaults.cell_width),
        cell_height: config.cell_height.unwrap_or(defaults.cell_height),
        spacing: config.spacing.unwrap_or(defaults.spacing),
        settle_delay_ms: config.settle_delay_ms.unwrap_or(defaults.settle_delay_ms),
        update_interval_ms: config
            .update_interval_ms
            .unwrap_or(defaults.update_interval_ms),
        widget_count: config.widget_count.unwrap_or(defaults.widget_count),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
///
/// # Arguments
///
/// * `config` - Base resolved config (already merged with defaults, file, and env vars)
/// * `count_override` - Optional widget count from `--count`
/// * `interval_override` - Optional interval from `--update-interval-ms`
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    count_override: Option<usize>,
    interval_override: Option<u64>,
) -> ResolvedConfig {
    if let Some(count) = count_override {
        config.widget_count = count;
    }

    if let Some(ms) = interval_override {
        config.update_interval_ms = ms;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

//! Configuration file loading with precedence handling.

use super::record::ConfigurationRecord;
use serde::Deserialize;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "NOTIFICATION_APP_CONFIG";

/// Environment variable overriding the log file path.
pub const LOG_FILE_ENV_VAR: &str = "NOTIFICATION_APP_LOG_FILE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or JSON syntax.
    #[error("Invalid config in {path}: {reason}")]
    ParseError {
        /// Path with invalid contents.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/notification-app/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Deployment parameters.
    #[serde(default)]
    pub deployment: Option<ConfigurationRecord>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Route shown at startup.
    #[serde(default)]
    pub initial_path: Option<String>,

    /// Settings for the in-process capabilities.
    #[serde(default)]
    pub local: Option<LocalSection>,
}

/// `[local]` section from TOML.
///
/// A relative `notifications_file` is resolved against the config file's directory.
/// `token_ttl_secs` must be positive.
///
/// ```toml
/// [local]
/// notifications_file = "notifications.json"
/// token_ttl_secs = 3600
///
/// [[local.users]]
/// username = "demo"
/// password = "demo-password"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct LocalSection {
    #[serde(default)]
    pub notifications_file: Option<PathBuf>,

    #[serde(default)]
    pub token_ttl_secs: Option<NonZeroU64>,

    #[serde(default)]
    pub users: Vec<LocalUser>,
}

/// A user the local identity provider accepts.
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LocalUser {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LocalUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalUser")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Resolved settings for the in-process capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSettings {
    pub notifications_file: Option<PathBuf>,
    pub token_ttl_secs: NonZeroU64,
    pub users: Vec<LocalUser>,
}

impl Default for LocalSettings {
    fn default() -> Self {
        Self {
            notifications_file: None,
            token_ttl_secs: NonZeroU64::new(3600).unwrap_or(NonZeroU64::MIN),
            users: Vec::new(),
        }
    }
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Deployment record; not yet validated.
    pub deployment: ConfigurationRecord,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Route shown at startup.
    pub initial_path: String,
    /// In-process capability settings.
    pub local: LocalSettings,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            deployment: ConfigurationRecord::default(),
            log_file_path: default_log_path(),
            initial_path: "/".to_string(),
            local: LocalSettings::default(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/notification-app/notification-app.log` on Unix-like
/// systems, or the appropriate platform path elsewhere.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("notification-app").join("notification-app.log")
    } else {
        PathBuf::from("notification-app.log")
    }
}

/// Load configuration file from a specific path.
///
/// Files ending in `.json` are read as `aws-exports` documents and only populate
/// the deployment record. Everything else is parsed as TOML.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config = if is_json {
        let record = ConfigurationRecord::from_aws_exports_json(&contents).map_err(|e| {
            ConfigError::ParseError {
                path: path.clone(),
                reason: e.to_string(),
            }
        })?;
        ConfigFile {
            deployment: Some(record),
            ..ConfigFile::default()
        }
    } else {
        let mut config: ConfigFile =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        if let (Some(local), Some(dir)) = (config.local.as_mut(), path.parent()) {
            local.notifications_file = local
                .notifications_file
                .take()
                .map(|file| resolve_relative(dir, file));
        }
        config
    };

    Ok(Some(config))
}

fn resolve_relative(base: &Path, file: PathBuf) -> PathBuf {
    if file.is_relative() {
        base.join(file)
    } else {
        file
    }
}

/// Resolve default config file path.
///
/// Returns `~/.config/notification-app/config.toml` on Unix, appropriate path on
/// other platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("notification-app").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `NOTIFICATION_APP_CONFIG` environment variable
/// 3. Default path `~/.config/notification-app/config.toml`
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

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `NOTIFICATION_APP_LOG_FILE`: Override log file path
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(path) = std::env::var(LOG_FILE_ENV_VAR) {
        if !path.is_empty() {
            config.log_file_path = PathBuf::from(path);
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
/// A file without `[deployment]` resolves to the placeholder record, which fails
/// validation at startup.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let local = match config.local {
        Some(section) => LocalSettings {
            notifications_file: section.notifications_file,
            token_ttl_secs: section
                .token_ttl_secs
                .unwrap_or(defaults.local.token_ttl_secs),
            users: section.users,
        },
        None => defaults.local,
    };

    ResolvedConfig {
        deployment: config.deployment.unwrap_or(defaults.deployment),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        initial_path: config.initial_path.unwrap_or(defaults.initial_path),
        local,
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    path_override: Option<String>,
) -> ResolvedConfig {
    if let Some(path) = path_override {
        config.initial_path = path;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

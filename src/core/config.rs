//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.todolist/config.toml`. It is only ever read; the to-do
//! items themselves are never written anywhere.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::state::EmptySubmissions;
use crate::core::store::KeyAllocation;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TodoConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub title: Option<String>,
    pub key_allocation: Option<KeyAllocation>,
    pub empty_submissions: Option<EmptySubmissions>,
    pub allow_cancel_edit: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LogConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TITLE: &str = "Todo List";
pub const DEFAULT_LOG_FILE: &str = "todolist.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub title: String,
    pub key_allocation: KeyAllocation,
    pub empty_submissions: EmptySubmissions,
    pub allow_cancel_edit: bool,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

/// Values given on the command line. `None`/`false` = not specified.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub key_allocation: Option<KeyAllocation>,
    pub reject_empty: bool,
    pub allow_cancel_edit: bool,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.todolist/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".todolist").join("config.toml"))
}

/// Load config from `path`, or from `~/.todolist/config.toml` when `None`.
///
/// A missing file yields `TodoConfig::default()`. A file that exists but is
/// malformed returns `ConfigError::Parse`.
pub fn load_config(path: Option<&Path>) -> Result<TodoConfig, ConfigError> {
    let path = match path.map(Path::to_path_buf).or_else(config_path) {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TodoConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file at {}, using defaults", path.display());
        return Ok(TodoConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<TodoConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TodoConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |name| std::env::var(name).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &TodoConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Key allocation: CLI → env → config → default
    let key_allocation = cli
        .key_allocation
        .or_else(|| {
            env("TODOLIST_KEY_ALLOCATION").and_then(|v| {
                let parsed = KeyAllocation::from_name(&v);
                if parsed.is_none() {
                    warn!("Ignoring unknown TODOLIST_KEY_ALLOCATION value: {}", v);
                }
                parsed
            })
        })
        .or(config.general.key_allocation)
        .unwrap_or_default();

    // Empty submissions: --reject-empty → env → config → default
    let empty_submissions = if cli.reject_empty {
        EmptySubmissions::Reject
    } else {
        env("TODOLIST_EMPTY_SUBMISSIONS")
            .and_then(|v| {
                let parsed = EmptySubmissions::from_name(&v);
                if parsed.is_none() {
                    warn!("Ignoring unknown TODOLIST_EMPTY_SUBMISSIONS value: {}", v);
                }
                parsed
            })
            .or(config.general.empty_submissions)
            .unwrap_or_default()
    };

    let allow_cancel_edit =
        cli.allow_cancel_edit || config.general.allow_cancel_edit.unwrap_or(false);

    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| env("TODOLIST_LOG_LEVEL"))
        .or_else(|| config.log.level.clone())
        .and_then(|name| {
            let parsed = parse_level(&name);
            if parsed.is_none() {
                warn!("Ignoring unknown log level: {}", name);
            }
            parsed
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // Log file: CLI → env → config → default
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| env("TODOLIST_LOG_FILE").map(PathBuf::from))
        .or_else(|| config.log.file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    ResolvedConfig {
        title: config
            .general
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        key_allocation,
        empty_submissions,
        allow_cancel_edit,
        log_level,
        log_file,
    }
}

fn parse_level(name: &str) -> Option<LevelFilter> {
    match name.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.holocron/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::record::default_display_keys;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HolocronConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub connectivity: ConnectivityConfig,
    #[serde(default)]
    pub screens: Vec<ScreenEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub base_url: Option<String>,
    pub start_screen: Option<String>,
    pub layout: Option<Layout>,
    pub fetch_timeout_secs: Option<u64>,
    pub swipe_threshold: Option<u16>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConnectivityConfig {
    pub probe_url: Option<String>,
    pub probe_interval_secs: Option<u64>,
    pub reconnect: Option<ReconnectPolicy>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScreenEntry {
    pub title: String,
    pub path: String,
    pub display_keys: Option<Vec<String>>,
    pub disclosure: Option<DisclosureMode>,
    pub connectivity_gate: Option<bool>,
    pub unmount_on_blur: Option<bool>,
}

/// How screens are switched between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Screen titles in a bar across the top.
    #[default]
    Tabs,
    /// Screen titles in a panel down the left side.
    Drawer,
}

/// What activating a row's Open action does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisclosureMode {
    /// Show the display value in a modal over the list.
    #[default]
    Modal,
    /// Push a detail screen carrying the full record.
    Navigate,
}

/// Whether a gated screen fetches again when connectivity comes back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconnectPolicy {
    /// Reconnection never triggers a fetch.
    Never,
    /// Fetch on reconnect only while the screen has nothing loaded.
    #[default]
    IfEmpty,
    /// Fetch on every offline → online transition.
    Always,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SWIPE_THRESHOLD: u16 = 6;
pub const DEFAULT_PROBE_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_LOG_LEVEL: &str = "debug";

fn default_screens() -> Vec<ScreenEntry> {
    vec![
        ScreenEntry {
            title: "Planets".to_string(),
            path: "planets/".to_string(),
            display_keys: None,
            disclosure: Some(DisclosureMode::Modal),
            connectivity_gate: Some(true),
            unmount_on_blur: None,
        },
        ScreenEntry {
            title: "Films".to_string(),
            path: "films/".to_string(),
            display_keys: None,
            disclosure: Some(DisclosureMode::Navigate),
            connectivity_gate: None,
            unmount_on_blur: None,
        },
        ScreenEntry {
            title: "Starships".to_string(),
            path: "starships/".to_string(),
            display_keys: None,
            disclosure: Some(DisclosureMode::Navigate),
            connectivity_gate: None,
            unmount_on_blur: None,
        },
    ]
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// Everything one list screen needs, fully resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenSpec {
    pub title: String,
    pub url: String,
    pub display_keys: Vec<String>,
    pub disclosure: DisclosureMode,
    pub connectivity_gate: bool,
    pub unmount_on_blur: bool,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub start_screen: usize,
    pub layout: Layout,
    pub fetch_timeout: Duration,
    pub swipe_threshold: u16,
    pub log_level: String,
    pub probe_url: String,
    pub probe_interval: Duration,
    pub reconnect: ReconnectPolicy,
    pub screens: Vec<ScreenSpec>,
}

/// Values taken from command-line flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub screen: Option<String>,
    pub base_url: Option<String>,
    pub layout: Option<Layout>,
    pub offline_gate: bool,
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

/// Returns the path to `~/.holocron/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".holocron").join("config.toml"))
}

/// Load config from `~/.holocron/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `HolocronConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<HolocronConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(HolocronConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(HolocronConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: HolocronConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Holocron Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# base_url = "https://swapi.dev/api"  # Or set HOLOCRON_BASE_URL
# start_screen = "Planets"             # Or set HOLOCRON_START_SCREEN
# layout = "tabs"                      # "tabs" or "drawer"
# fetch_timeout_secs = 10
# swipe_threshold = 6                  # Columns a row must be dragged to reveal Open
# log_level = "debug"                  # "error", "warn", "info", "debug", "trace"

# [connectivity]
# probe_url = "https://swapi.dev/api/"
# probe_interval_secs = 5
# reconnect = "if_empty"               # "never", "if_empty" or "always"

# [[screens]]
# title = "Planets"
# path = "planets/"
# display_keys = ["name", "title"]
# disclosure = "modal"                 # "modal" or "navigate"
# connectivity_gate = true
# unmount_on_blur = false

# [[screens]]
# title = "Films"
# path = "films/"
# disclosure = "navigate"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &HolocronConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], with environment lookup supplied by the caller.
pub fn resolve_with_env(
    config: &HolocronConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("HOLOCRON_BASE_URL"))
        .or_else(|| config.general.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let entries = if config.screens.is_empty() {
        default_screens()
    } else {
        config.screens.clone()
    };

    let screens: Vec<ScreenSpec> = entries
        .iter()
        .map(|entry| ScreenSpec {
            title: entry.title.clone(),
            url: join_url(&base_url, &entry.path),
            display_keys: entry
                .display_keys
                .clone()
                .filter(|keys| !keys.is_empty())
                .unwrap_or_else(default_display_keys),
            disclosure: entry.disclosure.unwrap_or_default(),
            connectivity_gate: cli.offline_gate || entry.connectivity_gate.unwrap_or(false),
            unmount_on_blur: entry.unmount_on_blur.unwrap_or(false),
        })
        .collect();

    // Start screen: CLI → env → config → first screen
    let start_name = cli
        .screen
        .clone()
        .or_else(|| env("HOLOCRON_START_SCREEN"))
        .or_else(|| config.general.start_screen.clone());
    let start_screen = start_name
        .and_then(|name| {
            let found = screens
                .iter()
                .position(|s| s.title.eq_ignore_ascii_case(&name));
            if found.is_none() {
                warn!("Unknown start screen '{}', using the first screen", name);
            }
            found
        })
        .unwrap_or(0);

    let probe_url = config
        .connectivity
        .probe_url
        .clone()
        .unwrap_or_else(|| format!("{}/", base_url.trim_end_matches('/')));

    ResolvedConfig {
        base_url,
        start_screen,
        layout: cli.layout.or(config.general.layout).unwrap_or_default(),
        fetch_timeout: Duration::from_secs(
            config
                .general
                .fetch_timeout_secs
                .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS),
        ),
        swipe_threshold: config
            .general
            .swipe_threshold
            .unwrap_or(DEFAULT_SWIPE_THRESHOLD)
            .max(1),
        log_level: config
            .general
            .log_level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        probe_url,
        probe_interval: Duration::from_secs(
            config
                .connectivity
                .probe_interval_secs
                .unwrap_or(DEFAULT_PROBE_INTERVAL_SECS)
                .max(1),
        ),
        reconnect: config.connectivity.reconnect.unwrap_or_default(),
        screens,
    }
}

/// Joins a screen path onto the base URL. Absolute URLs pass through.
pub fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.inkwell/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct InkwellConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub sample_library: Option<bool>,
    pub saved_indicator_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LayoutConfig {
    pub sidebar_collapsed_width: Option<u16>,
    pub sidebar_expanded_width: Option<u16>,
    pub drawer_width: Option<u16>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SAVED_INDICATOR_MS: u64 = 2000;
pub const DEFAULT_LOG_FILE: &str = "inkwell.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
pub const DEFAULT_SIDEBAR_COLLAPSED_WIDTH: u16 = 8;
pub const DEFAULT_SIDEBAR_EXPANDED_WIDTH: u16 = 26;
pub const DEFAULT_DRAWER_WIDTH: u16 = 34;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub sidebar_collapsed_width: u16,
    pub sidebar_expanded_width: u16,
    pub drawer_width: u16,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            sidebar_collapsed_width: DEFAULT_SIDEBAR_COLLAPSED_WIDTH,
            sidebar_expanded_width: DEFAULT_SIDEBAR_EXPANDED_WIDTH,
            drawer_width: DEFAULT_DRAWER_WIDTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub sample_library: bool,
    pub saved_indicator_ms: u64,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub layout: Layout,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&InkwellConfig::default(), &CliOverrides::default())
    }
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub empty: bool,
    pub log_level: Option<String>,
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

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.inkwell/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".inkwell").join("config.toml"))
}

/// Load config from `explicit` or `~/.inkwell/config.toml`.
///
/// A missing default file is generated (commented out) and yields
/// `InkwellConfig::default()`. A missing explicit file is an I/O error.
/// A malformed file returns `ConfigError::Parse`.
pub fn load_config(explicit: Option<&Path>) -> Result<InkwellConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(InkwellConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(InkwellConfig::default());
    }

    read_config(&path)
}

fn read_config(path: &Path) -> Result<InkwellConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: InkwellConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Inkwell Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# sample_library = true             # start with Personal / Work / Ideas
# saved_indicator_ms = 2000         # how long "Saved!" stays up

# [logging]
# level = "info"                    # Or set INKWELL_LOG_LEVEL env var
# file = "inkwell.log"              # Or set INKWELL_LOG_FILE env var

# [layout]
# sidebar_collapsed_width = 8
# sidebar_expanded_width = 26
# drawer_width = 34
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &InkwellConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("INKWELL_LOG_LEVEL").ok())
        .or_else(|| config.logging.level.clone())
        .and_then(|level| parse_level(&level))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // Log file: env → config → default
    let log_file = std::env::var("INKWELL_LOG_FILE")
        .ok()
        .or_else(|| config.logging.file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    let layout = Layout {
        sidebar_collapsed_width: config
            .layout
            .sidebar_collapsed_width
            .unwrap_or(DEFAULT_SIDEBAR_COLLAPSED_WIDTH),
        sidebar_expanded_width: config
            .layout
            .sidebar_expanded_width
            .unwrap_or(DEFAULT_SIDEBAR_EXPANDED_WIDTH),
        drawer_width: config.layout.drawer_width.unwrap_or(DEFAULT_DRAWER_WIDTH),
    };

    ResolvedConfig {
        sample_library: !cli.empty && config.general.sample_library.unwrap_or(true),
        saved_indicator_ms: config
            .general
            .saved_indicator_ms
            .unwrap_or(DEFAULT_SAVED_INDICATOR_MS),
        log_level,
        log_file: PathBuf::from(log_file),
        layout,
    }
}

/// Parses a level name ("debug", "INFO", ...). Unknown names yield None.
fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.parse() {
        Ok(filter) => Some(filter),
        Err(_) => {
            warn!("Unknown log level {:?}, using default", level);
            None
        }
    }
}

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings read from `~/.cge/config.toml`. Every key is optional; CLI flags win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CgeConfig {
    pub compiler_version: Option<String>,
    pub pretty_errors: bool,
    /// Forces colored output on or off.
    pub color: Option<bool>,
    /// env_logger filter used when neither RUST_LOG nor --debug is given.
    pub log_level: Option<String>,
    pub warnings_as_errors: bool,
}

pub fn default_config_path() -> Option<PathBuf> {
    // ~\Users\you\.cge\config.toml on Windows; ~/.cge/config.toml elsewhere
    dirs_next::home_dir().map(|h| h.join(".cge").join("config.toml"))
}

pub fn resolve_config_path(cli_path: &Option<PathBuf>) -> Option<PathBuf> {
    if let Some(p) = cli_path {
        return Some(p.clone());
    }
    default_config_path()
}

/// Loads the config. A missing default file yields defaults; an explicit
/// `--config` path must exist.
pub fn load_config(cli_path: &Option<PathBuf>) -> Result<CgeConfig> {
    let Some(path) = resolve_config_path(cli_path) else {
        return Ok(CgeConfig::default());
    };
    if cli_path.is_none() && !path.exists() {
        return Ok(CgeConfig::default());
    }
    parse_config_file(&path)
}

pub fn parse_config_file(path: &Path) -> Result<CgeConfig> {
    let text = std::fs::read_to_string(path).with_context(|| format!("Read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Parse config {}", path.display()))
}

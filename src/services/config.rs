use crate::domain::constants::{
    APP_DIR_NAME, CONFIG_FILE, DEFAULT_HOME_URL, DEFAULT_TICK_SECONDS,
};
use crate::domain::models::ConfigFile;
use crate::error::GuardError;
use crate::services::storage::DataDir;
use std::path::{Path, PathBuf};

/// Effective settings after merging flags, environment, config file and
/// defaults (in that order of precedence).
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: DataDir,
    pub home_url: String,
    pub tick_seconds: u64,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

pub fn app_config_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config").join(APP_DIR_NAME))
}

pub fn load_config(path: &Path) -> anyhow::Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

pub fn resolve_settings(overrides: Overrides) -> anyhow::Result<Settings> {
    let config_path = match overrides.config.clone() {
        Some(p) => p,
        None => app_config_dir()?.join(CONFIG_FILE),
    };
    let config = load_config(&config_path)?;
    merge(config, overrides)
}

fn merge(config: ConfigFile, overrides: Overrides) -> anyhow::Result<Settings> {
    let data_dir = match overrides.data_dir.or(config.general.data_dir) {
        Some(p) => p,
        None => app_config_dir()?,
    };

    let tick_seconds = config.general.tick_seconds.unwrap_or(DEFAULT_TICK_SECONDS);
    if tick_seconds == 0 {
        return Err(GuardError::Validation("tick_seconds must be at least 1".to_string()).into());
    }

    let log_level = overrides
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok().filter(|v| !v.is_empty()))
        .or(config.logging.level)
        .unwrap_or_else(|| "warn".to_string());

    Ok(Settings {
        data_dir: DataDir::new(data_dir),
        home_url: config
            .general
            .home_url
            .unwrap_or_else(|| DEFAULT_HOME_URL.to_string()),
        tick_seconds,
        log_level,
        log_file: config.logging.file,
    })
}

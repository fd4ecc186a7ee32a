use crate::config::ConfigError;
use std::path::PathBuf;

pub const GLOBAL_STATE_DIR: &str = ".promptstructure";
pub const GLOBAL_SETTINGS_FILE_NAME: &str = "config.yaml";
pub const EVENT_LOG_REL_PATH: &str = "logs/events.log";

pub const DEFAULT_TOKEN_FILE: &str = "prompt_token_library_wide_v2.csv";
pub const DEFAULT_PRESET_FILE: &str = "presets.json";

fn home_dir() -> Result<PathBuf, ConfigError> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .ok_or(ConfigError::HomeDirectoryUnavailable)
}

pub fn default_global_config_path() -> Result<PathBuf, ConfigError> {
    Ok(home_dir()?
        .join(GLOBAL_STATE_DIR)
        .join(GLOBAL_SETTINGS_FILE_NAME))
}

pub fn default_event_log_path() -> Result<PathBuf, ConfigError> {
    Ok(home_dir()?.join(GLOBAL_STATE_DIR).join(EVENT_LOG_REL_PATH))
}

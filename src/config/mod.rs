pub mod error;
pub mod load;
pub mod paths;
pub mod settings;

pub use error::ConfigError;
pub use load::{load_settings, LoadedSettings};
pub use paths::{
    default_event_log_path, default_global_config_path, DEFAULT_PRESET_FILE, DEFAULT_TOKEN_FILE,
    EVENT_LOG_REL_PATH, GLOBAL_SETTINGS_FILE_NAME, GLOBAL_STATE_DIR,
};
pub use settings::{LayoutSettings, Settings};

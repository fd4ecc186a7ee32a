use super::{default_event_log_path, default_global_config_path, ConfigError, Settings};
use std::path::{Path, PathBuf};

/// Settings plus the file they came from, if any.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub source: Option<PathBuf>,
}

impl LoadedSettings {
    /// Event log destination: the configured file, else the default under
    /// `$HOME`, else no logging.
    pub fn event_log_path(&self) -> Option<PathBuf> {
        self.settings
            .log_file
            .clone()
            .or_else(|| default_event_log_path().ok())
    }
}

/// Loads settings from `explicit` (which must exist) or from the default
/// global path (which may be absent, meaning built-in defaults).
pub fn load_settings(explicit: Option<&Path>) -> Result<LoadedSettings, ConfigError> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => match default_global_config_path() {
            Ok(path) => (path, false),
            Err(ConfigError::HomeDirectoryUnavailable) => {
                return Ok(LoadedSettings {
                    settings: Settings::default(),
                    source: None,
                })
            }
            Err(err) => return Err(err),
        },
    };

    if !required && !path.exists() {
        return Ok(LoadedSettings {
            settings: Settings::default(),
            source: None,
        });
    }

    let mut settings = Settings::from_path(&path)?;
    settings.validate()?;
    if let Some(base) = path.parent() {
        settings.resolve_relative_paths(base);
    }
    Ok(LoadedSettings {
        settings,
        source: Some(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempdir().expect("tempdir");
        let err = load_settings(Some(&dir.path().join("nope.yaml"))).expect_err("missing");
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn explicit_file_resolves_relative_paths() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");
        fs::write(&path, "token_file: tokens.csv\nlog_file: events.log\n").expect("write");

        let loaded = load_settings(Some(&path)).expect("load");
        assert_eq!(loaded.settings.token_file, dir.path().join("tokens.csv"));
        assert_eq!(loaded.event_log_path(), Some(dir.path().join("events.log")));
        assert_eq!(loaded.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn invalid_yaml_reports_parse_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");
        fs::write(&path, "layout: [unterminated\n").expect("write");
        let err = load_settings(Some(&path)).expect_err("parse error");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}

use super::{ConfigError, DEFAULT_PRESET_FILE, DEFAULT_TOKEN_FILE};
use crate::prompt::{CategoryConnector, EngineMode, PromptLayout};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
    #[serde(default = "default_preset_file")]
    pub preset_file: PathBuf,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub engine: EngineMode,
    #[serde(default)]
    pub layout: LayoutSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LayoutSettings {
    /// Replaces the built-in category order when non-empty.
    #[serde(default)]
    pub categories: Vec<CategoryConnector>,
}

fn default_token_file() -> PathBuf {
    PathBuf::from(DEFAULT_TOKEN_FILE)
}

fn default_preset_file() -> PathBuf {
    PathBuf::from(DEFAULT_PRESET_FILE)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
            preset_file: default_preset_file(),
            log_file: None,
            engine: EngineMode::default(),
            layout: LayoutSettings::default(),
        }
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token_file.as_os_str().is_empty() {
            return Err(ConfigError::Settings(
                "`token_file` must be non-empty".to_string(),
            ));
        }
        if self.preset_file.as_os_str().is_empty() {
            return Err(ConfigError::Settings(
                "`preset_file` must be non-empty".to_string(),
            ));
        }
        if self
            .log_file
            .as_ref()
            .is_some_and(|path| path.as_os_str().is_empty())
        {
            return Err(ConfigError::Settings(
                "`log_file` must be non-empty when set".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.layout.categories {
            let name = entry.name.trim();
            if name.is_empty() {
                return Err(ConfigError::Settings(
                    "`layout.categories` names must be non-empty".to_string(),
                ));
            }
            if !seen.insert(name.to_string()) {
                return Err(ConfigError::Settings(format!(
                    "`layout.categories` lists `{name}` more than once"
                )));
            }
        }
        Ok(())
    }

    pub fn prompt_layout(&self) -> PromptLayout {
        if self.layout.categories.is_empty() {
            return PromptLayout::default();
        }
        PromptLayout::new(
            self.layout
                .categories
                .iter()
                .map(|entry| CategoryConnector::new(entry.name.trim(), entry.connector.trim()))
                .collect(),
        )
    }

    /// Anchors relative file paths at `base`, the directory holding the
    /// settings file.
    pub fn resolve_relative_paths(&mut self, base: &Path) {
        for path in [&mut self.token_file, &mut self.preset_file] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        if let Some(path) = self.log_file.as_mut() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

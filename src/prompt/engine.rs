use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineMode {
    #[default]
    Plain,
    Midjourney,
    Niji,
}

const MIDJOURNEY_PARAMETERS: [&str; 6] = ["--ar", "--v", "--style", "--stylize", "--chaos", "--seed"];
const NIJI_PARAMETERS: [&str; 5] = ["--ar", "--niji", "--style", "--stylize", "--seed"];

impl EngineMode {
    pub const ALL: [EngineMode; 3] = [EngineMode::Plain, EngineMode::Midjourney, EngineMode::Niji];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Midjourney => "midjourney",
            Self::Niji => "niji",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "plain" | "none" | "" => Ok(Self::Plain),
            "midjourney" | "mj" => Ok(Self::Midjourney),
            "niji" | "nijijourney" => Ok(Self::Niji),
            _ => Err("engine must be one of: plain, midjourney, niji".to_string()),
        }
    }

    /// Parameter keys in the order they are appended to a prompt.
    pub fn parameter_keys(self) -> &'static [&'static str] {
        match self {
            Self::Plain => &[],
            Self::Midjourney => &MIDJOURNEY_PARAMETERS,
            Self::Niji => &NIJI_PARAMETERS,
        }
    }

    pub fn is_parameterized(self) -> bool {
        !self.parameter_keys().is_empty()
    }

    pub fn accepts(self, key: &str) -> bool {
        self.parameter_keys().contains(&key)
    }

    pub fn next(self) -> Self {
        match self {
            Self::Plain => Self::Midjourney,
            Self::Midjourney => Self::Niji,
            Self::Niji => Self::Plain,
        }
    }
}

impl std::fmt::Display for EngineMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `ar`, `-ar` and ` --AR ` all name the `--ar` parameter.
pub fn normalize_param_key(raw: &str) -> String {
    let bare = raw.trim().trim_start_matches('-').to_ascii_lowercase();
    format!("--{bare}")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub mode: EngineMode,
    params: BTreeMap<String, String>,
}

impl EngineConfig {
    pub fn new(mode: EngineMode) -> Self {
        Self {
            mode,
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.set_param(key, value);
        self
    }

    /// Stores a parameter value. Keys the current mode does not declare are
    /// kept so switching modes does not lose them.
    pub fn set_param(&mut self, key: &str, value: &str) {
        self.params
            .insert(normalize_param_key(key), value.trim().to_string());
    }

    pub fn remove_param(&mut self, key: &str) -> Option<String> {
        self.params.remove(&normalize_param_key(key))
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .get(&normalize_param_key(key))
            .map(String::as_str)
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn clear_params(&mut self) {
        self.params.clear();
    }

    /// `"<key> <value>"` pairs for the declared parameters that carry a value,
    /// space-joined in declaration order. `None` for plain mode or when every
    /// declared parameter is blank.
    pub fn parameter_suffix(&self) -> Option<String> {
        let tokens: Vec<String> = self
            .mode
            .parameter_keys()
            .iter()
            .filter_map(|key| {
                let value = self.params.get(*key)?;
                let value = value.split_whitespace().collect::<Vec<_>>().join(" ");
                if value.is_empty() {
                    None
                } else {
                    Some(format!("{key} {value}"))
                }
            })
            .collect();
        if tokens.is_empty() {
            None
        } else {
            Some(tokens.join(" "))
        }
    }
}

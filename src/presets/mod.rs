//! Named presets that pre-fill the form.

pub mod hydrate;
pub mod loader;

pub use crate::shared::errors::PresetLoadError;
pub use loader::{load_presets, load_presets_or_empty, parse_presets_json, parse_presets_yaml};

use crate::form::ScalarField;
use serde::Serialize;
use std::collections::BTreeMap;

/// Preset key that picks the engine mode.
pub const ENGINE_FIELD: &str = "Engine";

/// A field value after normalization. Whether a raw string became a scalar or
/// a list is decided once, at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PresetValue {
    Scalar(String),
    List(Vec<String>),
}

impl PresetValue {
    /// The value as one string; list items are joined with `separator`.
    pub fn joined(&self, separator: &str) -> String {
        match self {
            Self::Scalar(value) => value.clone(),
            Self::List(items) => items.join(separator),
        }
    }

    pub fn items(&self) -> Vec<String> {
        match self {
            Self::Scalar(value) if value.trim().is_empty() => Vec::new(),
            Self::Scalar(value) => vec![value.clone()],
            Self::List(items) => items.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Scalar,
    List,
}

impl FieldKind {
    pub(crate) fn of(field: &str) -> Self {
        let field = field.trim();
        if ScalarField::from_label(field).is_some()
            || field.starts_with("--")
            || field.eq_ignore_ascii_case(ENGINE_FIELD)
        {
            Self::Scalar
        } else {
            Self::List
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    name: String,
    fields: BTreeMap<String, PresetValue>,
}

impl Preset {
    pub fn new(name: impl Into<String>, fields: BTreeMap<String, PresetValue>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &BTreeMap<String, PresetValue> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&PresetValue> {
        self.fields.get(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetStore {
    presets: BTreeMap<String, Preset>,
}

impl PresetStore {
    pub fn new(presets: Vec<Preset>) -> Self {
        Self {
            presets: presets
                .into_iter()
                .map(|preset| (preset.name.clone(), preset))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.get(name).or_else(|| {
            self.presets
                .values()
                .find(|preset| preset.name.eq_ignore_ascii_case(name.trim()))
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn presets(&self) -> impl Iterator<Item = &Preset> {
        self.presets.values()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

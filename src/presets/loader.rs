use super::{FieldKind, Preset, PresetLoadError, PresetStore, PresetValue};
use crate::shared::logging::EventLog;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Reads a preset file. `.yaml`/`.yml` files are parsed as YAML, anything else
/// as JSON.
pub fn load_presets(path: &Path) -> Result<PresetStore, PresetLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| PresetLoadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let label = path.display().to_string();
    if is_yaml_path(path) {
        parse_presets_yaml(&label, &raw)
    } else {
        parse_presets_json(&label, &raw)
    }
}

/// Presets are optional: any load failure is logged and yields an empty store.
pub fn load_presets_or_empty(path: &Path, log: &EventLog) -> PresetStore {
    match load_presets(path) {
        Ok(store) => {
            log.info(
                "presets.loaded",
                &[
                    ("path", Value::from(path.display().to_string())),
                    ("presets", Value::from(store.len())),
                ],
            );
            store
        }
        Err(err) => {
            log.warn(
                "presets.unavailable",
                &[
                    ("path", Value::from(path.display().to_string())),
                    ("error", Value::from(err.to_string())),
                ],
            );
            PresetStore::default()
        }
    }
}

pub fn parse_presets_json(label: &str, raw: &str) -> Result<PresetStore, PresetLoadError> {
    let value: Value = serde_json::from_str(raw).map_err(|source| PresetLoadError::Json {
        path: label.to_string(),
        source,
    })?;
    store_from_value(label, value)
}

pub fn parse_presets_yaml(label: &str, raw: &str) -> Result<PresetStore, PresetLoadError> {
    if raw.trim().is_empty() {
        return Ok(PresetStore::default());
    }
    let value: Value = serde_yaml::from_str(raw).map_err(|source| PresetLoadError::Yaml {
        path: label.to_string(),
        source,
    })?;
    store_from_value(label, value)
}

fn is_yaml_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

fn store_from_value(label: &str, value: Value) -> Result<PresetStore, PresetLoadError> {
    let records = match value {
        Value::Object(records) => records,
        Value::Null => return Ok(PresetStore::default()),
        _ => {
            return Err(PresetLoadError::NotAMapping {
                path: label.to_string(),
            })
        }
    };

    let mut presets = Vec::with_capacity(records.len());
    for (name, record) in records {
        let name = name.trim().to_string();
        // Entries that are not field records are skipped, not fatal.
        let Value::Object(record) = record else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        let mut fields = BTreeMap::new();
        for (field, raw_value) in record {
            let field = field.trim().to_string();
            if field.is_empty() {
                continue;
            }
            if let Some(value) = normalize_value(FieldKind::of(&field), raw_value) {
                fields.insert(field, value);
            }
        }
        presets.push(Preset::new(name, fields));
    }
    Ok(PresetStore::new(presets))
}

fn normalize_value(kind: FieldKind, raw: Value) -> Option<PresetValue> {
    match raw {
        Value::Null | Value::Object(_) => None,
        Value::Array(items) => Some(PresetValue::List(
            items.into_iter().filter_map(scalar_text).collect(),
        )),
        other => {
            let text = scalar_text(other)?;
            Some(match kind {
                FieldKind::Scalar => PresetValue::Scalar(text),
                FieldKind::List => PresetValue::List(split_list(&text)),
            })
        }
    }
}

fn scalar_text(value: Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

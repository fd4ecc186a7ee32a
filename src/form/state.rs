use crate::catalog::Catalog;
use crate::prompt::{normalize_param_key, EngineConfig, EngineMode};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScalarField {
    Subject,
    Action,
    Environment,
    Notes,
}

impl ScalarField {
    pub const ALL: [ScalarField; 4] = [
        ScalarField::Subject,
        ScalarField::Action,
        ScalarField::Environment,
        ScalarField::Notes,
    ];

    /// Fields that open the prompt, in output order. Notes close it.
    pub const LEADING: [ScalarField; 3] = [
        ScalarField::Subject,
        ScalarField::Action,
        ScalarField::Environment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Subject => "Main subject",
            Self::Action => "Action",
            Self::Environment => "Environment",
            Self::Notes => "Extra notes",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Subject => &["main subject", "subject"],
            Self::Action => &["action"],
            Self::Environment => &["environment", "setting"],
            Self::Notes => &[
                "extra notes",
                "notes",
                "extra cinematic detail",
                "extra notes (optional)",
            ],
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.aliases().contains(&normalized.as_str()))
    }
}

impl std::fmt::Display for ScalarField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Engine changes made by the last preset, as `(before, applied)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PresetEngine {
    params: BTreeMap<String, (Option<String>, String)>,
    mode: Option<(EngineMode, EngineMode)>,
}

/// Everything one user has typed or picked. Selections only ever hold
/// selectable options of a known category, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    scalars: BTreeMap<ScalarField, String>,
    selections: BTreeMap<String, Vec<String>>,
    engine: EngineConfig,
    preset_engine: PresetEngine,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(mode: EngineMode) -> Self {
        Self {
            engine: EngineConfig::new(mode),
            ..Self::default()
        }
    }

    pub fn scalar(&self, field: ScalarField) -> &str {
        self.scalars.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set_scalar(&mut self, field: ScalarField, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            self.scalars.remove(&field);
        } else {
            self.scalars.insert(field, value);
        }
    }

    pub fn selection(&self, category: &str) -> &[String] {
        self.selections
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Non-empty selections keyed by category name.
    pub fn selections(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.selections
            .iter()
            .filter(|(_, options)| !options.is_empty())
            .map(|(name, options)| (name.as_str(), options.as_slice()))
    }

    /// Adds `option` to the category's selection. Returns whether the option is
    /// selected afterwards; unknown categories, headers and options outside the
    /// category are refused.
    pub fn select(&mut self, catalog: &Catalog, category: &str, option: &str) -> bool {
        let Some(known) = catalog.lookup(category) else {
            return false;
        };
        let Some(canonical) = known.canonical_option(option) else {
            return false;
        };
        let selected = self.selections.entry(known.name().to_string()).or_default();
        if !selected.iter().any(|existing| existing == canonical) {
            selected.push(canonical.to_string());
        }
        true
    }

    pub fn deselect(&mut self, category: &str, option: &str) -> bool {
        let Some(selected) = self.selections.get_mut(category) else {
            return false;
        };
        let before = selected.len();
        selected.retain(|existing| existing != option);
        let removed = selected.len() != before;
        if selected.is_empty() {
            self.selections.remove(category);
        }
        removed
    }

    /// Flips one option and returns its new state.
    pub fn toggle(&mut self, catalog: &Catalog, category: &str, option: &str) -> bool {
        if self.selection(category).iter().any(|existing| existing == option) {
            self.deselect(category, option);
            false
        } else {
            self.select(catalog, category, option)
        }
    }

    /// Replaces a category's selection with the valid subset of `options`,
    /// keeping their order.
    pub fn set_selection<I, S>(&mut self, catalog: &Catalog, category: &str, options: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(known) = catalog.lookup(category) else {
            return;
        };
        let name = known.name().to_string();
        self.selections.remove(&name);
        for option in options {
            self.select(catalog, &name, option.as_ref());
        }
    }

    pub fn clear_selection(&mut self, category: &str) {
        self.selections.remove(category);
    }

    pub(crate) fn set_sole_selection(&mut self, category: &str, option: &str) {
        self.selections
            .insert(category.to_string(), vec![option.to_string()]);
    }

    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut EngineConfig {
        &mut self.engine
    }

    /// Sets an engine parameter as the user's own value; a later Clear-All
    /// keeps it even if a preset wrote the same key first.
    pub fn set_param(&mut self, key: &str, value: &str) {
        self.preset_engine.params.remove(&normalize_param_key(key));
        self.engine.set_param(key, value);
    }

    pub(crate) fn set_preset_param(&mut self, key: &str, value: &str) {
        let key = normalize_param_key(key);
        let before = match self.preset_engine.params.get(&key) {
            Some((before, _)) => before.clone(),
            None => self.engine.param(&key).map(str::to_string),
        };
        self.engine.set_param(&key, value);
        let applied = self.engine.param(&key).unwrap_or_default().to_string();
        self.preset_engine.params.insert(key, (before, applied));
    }

    pub(crate) fn set_preset_mode(&mut self, mode: EngineMode) {
        let before = self
            .preset_engine
            .mode
            .map_or(self.engine.mode, |(before, _)| before);
        self.engine.mode = mode;
        self.preset_engine.mode = Some((before, mode));
    }

    /// Empties every scalar and every selection and undoes the engine changes
    /// a preset made. Engine settings the user chose survive.
    pub fn clear_all(&mut self) {
        self.scalars.clear();
        self.selections.clear();
        self.discard_preset_engine();
    }

    fn discard_preset_engine(&mut self) {
        let preset = std::mem::take(&mut self.preset_engine);
        for (key, (before, applied)) in preset.params {
            if self.engine.param(&key) != Some(applied.as_str()) {
                continue;
            }
            match before {
                Some(value) => self.engine.set_param(&key, &value),
                None => {
                    self.engine.remove_param(&key);
                }
            }
        }
        if let Some((before, applied)) = preset.mode {
            if self.engine.mode == applied {
                self.engine.mode = before;
            }
        }
    }

    /// True when nothing would contribute text to a prompt.
    pub fn is_blank(&self) -> bool {
        self.scalars.values().all(|value| value.trim().is_empty())
            && self.selections.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    fn catalog() -> Catalog {
        Catalog::from_categories(vec![
            Category::new(
                "Lighting",
                vec![
                    "— Natural —".to_string(),
                    "Golden-hour glow".to_string(),
                    "Neon".to_string(),
                ],
            ),
            Category::new("Aesthetics", vec!["Vaporwave".to_string()]),
        ])
    }

    #[test]
    fn scalar_labels_resolve_through_aliases() {
        assert_eq!(ScalarField::from_label("Main subject"), Some(ScalarField::Subject));
        assert_eq!(ScalarField::from_label(" subject "), Some(ScalarField::Subject));
        assert_eq!(
            ScalarField::from_label("Extra cinematic detail"),
            Some(ScalarField::Notes)
        );
        assert_eq!(ScalarField::from_label("Lighting"), None);
    }

    #[test]
    fn select_rejects_headers_unknown_options_and_unknown_categories() {
        let catalog = catalog();
        let mut state = FormState::new();
        assert!(!state.select(&catalog, "Lighting", "— Natural —"));
        assert!(!state.select(&catalog, "Lighting", "Candlelight"));
        assert!(!state.select(&catalog, "Weather", "Rain"));
        assert!(state.select(&catalog, "Lighting", "neon"));
        assert!(state.select(&catalog, "Lighting", "Neon"));
        assert_eq!(state.selection("Lighting"), &["Neon".to_string()]);
    }

    #[test]
    fn toggle_flips_and_drops_empty_category() {
        let catalog = catalog();
        let mut state = FormState::new();
        assert!(state.toggle(&catalog, "Aesthetics", "Vaporwave"));
        assert!(!state.toggle(&catalog, "Aesthetics", "Vaporwave"));
        assert!(state.selection("Aesthetics").is_empty());
        assert_eq!(state.selections().count(), 0);
    }

    #[test]
    fn set_selection_filters_and_dedupes_in_order() {
        let catalog = catalog();
        let mut state = FormState::new();
        state.set_selection(
            &catalog,
            "Lighting",
            ["Neon", "— Natural —", "Golden-hour glow", "Neon", "Strobe"],
        );
        assert_eq!(
            state.selection("Lighting"),
            &["Neon".to_string(), "Golden-hour glow".to_string()]
        );
    }

    #[test]
    fn clear_all_keeps_engine_choice() {
        let catalog = catalog();
        let mut state = FormState::with_engine(EngineMode::Midjourney);
        state.set_scalar(ScalarField::Subject, "a fox");
        state.select(&catalog, "Lighting", "Neon");
        assert!(!state.is_blank());

        state.clear_all();
        assert!(state.is_blank());
        assert_eq!(state.scalar(ScalarField::Subject), "");
        assert_eq!(state.engine().mode, EngineMode::Midjourney);
    }

    #[test]
    fn blank_scalar_is_not_stored() {
        let mut state = FormState::new();
        state.set_scalar(ScalarField::Notes, "   ");
        assert!(state.is_blank());
    }
}

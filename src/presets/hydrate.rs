use super::{Preset, ENGINE_FIELD};
use crate::catalog::Catalog;
use crate::form::{FormState, ScalarField};
use crate::prompt::EngineMode;

impl FormState {
    /// A fresh state pre-filled from `preset`.
    pub fn hydrate(preset: &Preset, catalog: &Catalog) -> Self {
        let mut state = Self::default();
        state.apply_preset(preset, catalog);
        state
    }

    /// Replaces scalars and selections with the preset's values, after undoing
    /// whatever an earlier preset did. Engine parameters named by the preset
    /// overwrite existing ones and an `Engine` field switches the mode, both
    /// recorded so Clear-All can revert them; fields matching nothing known are
    /// skipped.
    pub fn apply_preset(&mut self, preset: &Preset, catalog: &Catalog) {
        self.clear_all();
        for (key, value) in preset.fields() {
            if let Some(field) = ScalarField::from_label(key) {
                self.set_scalar(field, value.joined(", "));
            } else if key.starts_with("--") {
                self.set_preset_param(key, &value.joined(" "));
            } else if key.eq_ignore_ascii_case(ENGINE_FIELD) {
                if let Ok(mode) = EngineMode::parse(&value.joined(" ")) {
                    self.set_preset_mode(mode);
                }
            } else if catalog.lookup(key).is_some() {
                self.set_selection(catalog, key, value.items());
            }
        }
    }
}

use crate::catalog::{Catalog, CatalogLoadError};
use crate::config::LoadedSettings;
use crate::form::{random_fill, FormState};
use crate::presets::{load_presets_or_empty, PresetStore};
use crate::prompt::{assemble, PromptLayout};
use crate::shared::fs_atomic::export_prompt;
use crate::shared::logging::EventLog;
use rand::Rng;
use serde_json::Value;
use std::path::Path;

/// One user's form: shared read-only catalog and presets plus the session's
/// own selection state. Every mutation is recorded in the event log.
#[derive(Debug, Clone)]
pub struct FormSession {
    catalog: Catalog,
    presets: PresetStore,
    layout: PromptLayout,
    log: EventLog,
    pub state: FormState,
}

impl FormSession {
    /// Layout names are matched to the catalog's spelling of each category.
    pub fn new(catalog: Catalog, presets: PresetStore, layout: PromptLayout, log: EventLog) -> Self {
        Self {
            layout: layout.resolved_against(&catalog),
            catalog,
            presets,
            log,
            state: FormState::default(),
        }
    }

    /// Loads the catalog (required) and presets (optional) named by the
    /// settings.
    pub fn open(loaded: &LoadedSettings) -> Result<Self, CatalogLoadError> {
        let settings = &loaded.settings;
        let log = EventLog::new(loaded.event_log_path());

        let catalog = match Catalog::from_path(&settings.token_file) {
            Ok(catalog) => catalog,
            Err(err) => {
                log.error(
                    "catalog.load_failed",
                    &[
                        ("path", path_value(&settings.token_file)),
                        ("error", Value::from(err.to_string())),
                    ],
                );
                return Err(err);
            }
        };
        log.info(
            "catalog.loaded",
            &[
                ("path", path_value(&settings.token_file)),
                ("categories", Value::from(catalog.len())),
            ],
        );

        let layout = settings.prompt_layout();
        let unmatched: Vec<String> = layout
            .unmatched(&catalog)
            .into_iter()
            .map(str::to_string)
            .collect();
        // Only a configured layout is checked against the catalog.
        if !settings.layout.categories.is_empty() && !unmatched.is_empty() {
            log.warn(
                "layout.unmatched_categories",
                &[("categories", Value::from(unmatched))],
            );
        }

        let presets = load_presets_or_empty(&settings.preset_file, &log);
        let mut session = Self::new(catalog, presets, layout, log);
        session.state = FormState::with_engine(settings.engine);
        Ok(session)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn presets(&self) -> &PresetStore {
        &self.presets
    }

    pub fn layout(&self) -> &PromptLayout {
        &self.layout
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn apply_preset(&mut self, name: &str) -> Result<(), String> {
        let preset = self
            .presets
            .get(name)
            .ok_or_else(|| format!("unknown preset `{name}`"))?;
        self.state.apply_preset(preset, &self.catalog);
        self.log.info(
            "form.preset_applied",
            &[("preset", Value::from(preset.name()))],
        );
        Ok(())
    }

    /// Adds one option, naming the category or option that was refused.
    pub fn select(&mut self, category: &str, option: &str) -> Result<(), String> {
        let known = self
            .catalog
            .lookup(category)
            .ok_or_else(|| format!("unknown category `{category}`"))?;
        if self.state.select(&self.catalog, known.name(), option) {
            Ok(())
        } else {
            Err(format!(
                "option `{option}` is not available in category `{}`",
                known.name()
            ))
        }
    }

    /// Flips one option; returns whether it is selected afterwards.
    pub fn toggle(&mut self, category: &str, option: &str) -> bool {
        self.state.toggle(&self.catalog, category, option)
    }

    pub fn random_fill<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<String> {
        let filled = random_fill(&mut self.state, &self.catalog, rng);
        self.log.info(
            "form.random_fill",
            &[(
                "categories",
                Value::from(filled.iter().map(String::as_str).collect::<Vec<_>>()),
            )],
        );
        filled
    }

    pub fn clear_all(&mut self) {
        self.state.clear_all();
        self.log.info("form.clear_all", &[]);
    }

    /// Current prompt without logging; used for live previews.
    pub fn preview(&self) -> String {
        assemble(&self.state, &self.layout)
    }

    pub fn prompt(&self) -> String {
        let prompt = self.preview();
        self.log.info(
            "prompt.assembled",
            &[
                ("engine", Value::from(self.state.engine().mode.as_str())),
                ("chars", Value::from(prompt.chars().count())),
            ],
        );
        prompt
    }

    pub fn export(&self, path: &Path) -> Result<String, String> {
        let prompt = self.prompt();
        export_prompt(path, &prompt)
            .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
        self.log
            .info("prompt.exported", &[("path", path_value(path))]);
        Ok(prompt)
    }
}

fn path_value(path: &Path) -> Value {
    Value::from(path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::form::ScalarField;
    use crate::prompt::CategoryConnector;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::fs;
    use tempfile::tempdir;

    fn write_fixture(dir: &Path) -> LoadedSettings {
        fs::write(
            dir.join("tokens.csv"),
            "Lighting,Aesthetics\nNeon,Vaporwave\nOvercast,\n",
        )
        .expect("write tokens");
        fs::write(
            dir.join("presets.json"),
            r#"{"Night": {"Main subject": "city street", "Lighting": "Neon"}}"#,
        )
        .expect("write presets");
        LoadedSettings {
            settings: Settings {
                token_file: dir.join("tokens.csv"),
                preset_file: dir.join("presets.json"),
                log_file: Some(dir.join("events.log")),
                ..Settings::default()
            },
            source: None,
        }
    }

    #[test]
    fn open_loads_catalog_and_presets_and_logs_events() {
        let dir = tempdir().expect("tempdir");
        let loaded = write_fixture(dir.path());

        let mut session = FormSession::open(&loaded).expect("open session");
        session.apply_preset("night").expect("apply preset");
        assert_eq!(session.state.scalar(ScalarField::Subject), "city street");
        assert_eq!(session.prompt(), "city street, lit by Neon.");

        session.random_fill(&mut StdRng::seed_from_u64(1));
        assert_eq!(session.state.selection("Aesthetics"), &["Vaporwave".to_string()]);
        session.clear_all();
        assert_eq!(session.preview(), crate::prompt::EMPTY_PROMPT);

        let log = fs::read_to_string(dir.path().join("events.log")).expect("read log");
        for event in [
            "catalog.loaded",
            "presets.loaded",
            "form.preset_applied",
            "prompt.assembled",
            "form.random_fill",
            "form.clear_all",
        ] {
            assert!(log.contains(event), "missing {event} in:\n{log}");
        }
    }

    #[test]
    fn open_fails_without_catalog_and_logs_failure() {
        let dir = tempdir().expect("tempdir");
        let mut loaded = write_fixture(dir.path());
        loaded.settings.token_file = dir.path().join("missing.csv");

        assert!(FormSession::open(&loaded).is_err());
        let log = fs::read_to_string(dir.path().join("events.log")).expect("read log");
        assert!(log.contains("catalog.load_failed"));
    }

    #[test]
    fn unknown_preset_is_reported() {
        let dir = tempdir().expect("tempdir");
        let loaded = write_fixture(dir.path());
        let mut session = FormSession::open(&loaded).expect("open session");
        let err = session.apply_preset("Daylight").expect_err("unknown preset");
        assert_eq!(err, "unknown preset `Daylight`");
    }

    #[test]
    fn select_names_refused_category_or_option() {
        let dir = tempdir().expect("tempdir");
        let loaded = write_fixture(dir.path());
        let mut session = FormSession::open(&loaded).expect("open session");
        session.select("lighting", "overcast").expect("select");
        assert_eq!(session.state.selection("Lighting"), &["Overcast".to_string()]);
        assert_eq!(
            session.select("Weather", "Rain").expect_err("unknown category"),
            "unknown category `Weather`"
        );
        assert_eq!(
            session.select("Lighting", "Strobe").expect_err("unknown option"),
            "option `Strobe` is not available in category `Lighting`"
        );
    }

    #[test]
    fn configured_layout_names_match_catalog_case_insensitively() {
        let dir = tempdir().expect("tempdir");
        let mut loaded = write_fixture(dir.path());
        loaded.settings.layout.categories = vec![
            CategoryConnector::new("lighting", "lit by"),
            CategoryConnector::new("Weather", "in"),
        ];

        let mut session = FormSession::open(&loaded).expect("open session");
        session.select("Lighting", "Neon").expect("select");
        assert_eq!(session.preview(), "lit by Neon.");

        let log = fs::read_to_string(dir.path().join("events.log")).expect("read log");
        assert!(log.contains("layout.unmatched_categories"), "{log}");
        assert!(log.contains("Weather"), "{log}");
    }
}

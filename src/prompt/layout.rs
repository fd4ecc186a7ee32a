use crate::catalog::Catalog;
use serde::{Deserialize, Serialize};

/// Built-in output order for category clauses and the phrase that introduces
/// each one.
pub const DEFAULT_CATEGORY_CONNECTORS: [(&str, &str); 9] = [
    ("Materials & Textures", "featuring"),
    ("Composition & Framing", "composed with"),
    ("Lighting", "lit by"),
    ("Style & Realism", "in the style of"),
    ("Atmosphere / Extras", "with"),
    ("FX & Details / Overlays / Imperfections", "using"),
    ("Shot Type & Angle", "shot as"),
    ("Aesthetics", "evoking"),
    ("Technical / Output", "with an aspect ratio of"),
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CategoryConnector {
    pub name: String,
    #[serde(default)]
    pub connector: String,
}

impl CategoryConnector {
    pub fn new(name: &str, connector: &str) -> Self {
        Self {
            name: name.to_string(),
            connector: connector.to_string(),
        }
    }
}

/// The single ordering table the assembler reads. Category clauses come out in
/// this order no matter how the catalog or the selections are ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLayout {
    categories: Vec<CategoryConnector>,
}

impl PromptLayout {
    /// Later entries reusing a category name are dropped.
    pub fn new(categories: Vec<CategoryConnector>) -> Self {
        let mut unique: Vec<CategoryConnector> = Vec::with_capacity(categories.len());
        for entry in categories {
            if unique.iter().all(|existing| existing.name != entry.name) {
                unique.push(entry);
            }
        }
        Self { categories: unique }
    }

    pub fn categories(&self) -> &[CategoryConnector] {
        &self.categories
    }

    pub fn connector_for(&self, category: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|entry| entry.name == category)
            .map(|entry| entry.connector.as_str())
    }

    pub fn position_of(&self, category: &str) -> Option<usize> {
        self.categories
            .iter()
            .position(|entry| entry.name == category)
    }

    /// Renames entries to the catalog's spelling of the category they match,
    /// case-insensitively. Unmatched entries are kept as written.
    pub fn resolved_against(&self, catalog: &Catalog) -> Self {
        Self::new(
            self.categories
                .iter()
                .map(|entry| match catalog.lookup(&entry.name) {
                    Some(category) => CategoryConnector::new(category.name(), &entry.connector),
                    None => entry.clone(),
                })
                .collect(),
        )
    }

    /// Entry names that match no catalog category.
    pub fn unmatched<'a>(&'a self, catalog: &Catalog) -> Vec<&'a str> {
        self.categories
            .iter()
            .filter(|entry| catalog.lookup(&entry.name).is_none())
            .map(|entry| entry.name.as_str())
            .collect()
    }
}

impl Default for PromptLayout {
    fn default() -> Self {
        Self::new(
            DEFAULT_CATEGORY_CONNECTORS
                .iter()
                .map(|(name, connector)| CategoryConnector::new(name, connector))
                .collect(),
        )
    }
}

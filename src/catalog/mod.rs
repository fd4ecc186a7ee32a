//! Token catalog: the curated option lists the form offers, one per category.

pub mod cache;
pub mod loader;

pub use crate::shared::errors::CatalogLoadError;
pub use cache::CatalogCache;

/// Options whose trimmed text starts with this marker are section labels, not
/// selectable tokens.
pub const HEADER_MARKER: char = '\u{2014}';

pub fn is_header(option: &str) -> bool {
    option.trim_start().starts_with(HEADER_MARKER)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    options: Vec<String>,
}

impl Category {
    pub fn new(name: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every option in source order, headers included.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selectable(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .map(String::as_str)
            .filter(|option| !is_header(option))
    }

    pub fn selectable_count(&self) -> usize {
        self.selectable().count()
    }

    pub fn is_selectable(&self, option: &str) -> bool {
        !is_header(option) && self.options.iter().any(|candidate| candidate == option)
    }

    /// Resolves `option` to the catalog's own spelling: an exact match first,
    /// then an ASCII case-insensitive one. Headers never resolve.
    pub fn canonical_option(&self, option: &str) -> Option<&str> {
        let option = option.trim();
        if option.is_empty() || is_header(option) {
            return None;
        }
        self.selectable()
            .find(|candidate| *candidate == option)
            .or_else(|| {
                self.selectable()
                    .find(|candidate| candidate.eq_ignore_ascii_case(option))
            })
    }
}

/// Ordered, read-only mapping from category name to its options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Builds a catalog from already-validated categories. Later duplicates of
    /// a name are dropped.
    pub fn from_categories(categories: Vec<Category>) -> Self {
        let mut unique: Vec<Category> = Vec::with_capacity(categories.len());
        for category in categories {
            if unique.iter().all(|existing| existing.name != category.name) {
                unique.push(category);
            }
        }
        Self { categories: unique }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    /// Exact name match, falling back to an ASCII case-insensitive one.
    pub fn lookup(&self, name: &str) -> Option<&Category> {
        let name = name.trim();
        self.category(name).or_else(|| {
            self.categories
                .iter()
                .find(|category| category.name.eq_ignore_ascii_case(name))
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|category| category.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lighting() -> Category {
        Category::new(
            "Lighting",
            vec![
                "— Natural —".to_string(),
                "Golden-hour glow".to_string(),
                "Overcast".to_string(),
                "— Artificial —".to_string(),
                "Neon".to_string(),
            ],
        )
    }

    #[test]
    fn headers_are_detected_by_leading_marker_only() {
        assert!(is_header("— Section —"));
        assert!(is_header("  — indented"));
        assert!(!is_header("Golden-hour glow"));
        assert!(!is_header("film grain — heavy"));
    }

    #[test]
    fn selectable_skips_headers_and_keeps_order() {
        let category = lighting();
        assert_eq!(
            category.selectable().collect::<Vec<_>>(),
            vec!["Golden-hour glow", "Overcast", "Neon"]
        );
        assert_eq!(category.selectable_count(), 3);
        assert!(category.is_selectable("Neon"));
        assert!(!category.is_selectable("— Natural —"));
        assert!(!category.is_selectable("Candlelight"));
        assert_eq!(category.canonical_option(" neon "), Some("Neon"));
        assert_eq!(category.canonical_option("— Natural —"), None);
    }

    #[test]
    fn from_categories_keeps_first_of_duplicate_names() {
        let catalog = Catalog::from_categories(vec![
            lighting(),
            Category::new("Lighting", vec!["Other".to_string()]),
            Category::new("Aesthetics", Vec::new()),
        ]);
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["Lighting", "Aesthetics"]);
        assert_eq!(
            catalog.category("Lighting").map(Category::selectable_count),
            Some(3)
        );
        assert_eq!(
            catalog.lookup("lighting").map(Category::name),
            Some("Lighting")
        );
    }
}

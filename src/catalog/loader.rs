use super::{Catalog, CatalogLoadError, Category};
use std::fs;
use std::path::Path;

impl Catalog {
    pub fn from_path(path: &Path) -> Result<Self, CatalogLoadError> {
        let raw = fs::read(path).map_err(|source| CatalogLoadError::Read {
            path: path.display().to_string(),
            source,
        })?;
        parse_catalog(&path.display().to_string(), &raw)
    }

    pub fn from_csv_str(raw: &str) -> Result<Self, CatalogLoadError> {
        parse_catalog("<inline>", raw.as_bytes())
    }
}

/// Reads a wide CSV: the header row names the categories and each column holds
/// that category's options top to bottom. Blank cells are dropped, so ragged
/// columns collapse to their filled cells.
pub(crate) fn parse_catalog(label: &str, raw: &[u8]) -> Result<Catalog, CatalogLoadError> {
    let csv_err = |source| CatalogLoadError::Csv {
        path: label.to_string(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(raw);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let name = if idx == 0 {
                name.trim_start_matches('\u{feff}')
            } else {
                name
            };
            name.trim().to_string()
        })
        .collect();

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        for (idx, cell) in record.iter().enumerate().take(headers.len()) {
            let cell = cell.trim();
            if !cell.is_empty() {
                columns[idx].push(cell.to_string());
            }
        }
    }

    let mut categories: Vec<Category> = Vec::with_capacity(headers.len());
    for (idx, (name, options)) in headers.into_iter().zip(columns).enumerate() {
        if name.is_empty() {
            // Spreadsheet exports often end rows with a stray delimiter.
            if options.is_empty() {
                continue;
            }
            return Err(CatalogLoadError::BlankCategory {
                path: label.to_string(),
                column: idx + 1,
            });
        }
        if categories.iter().any(|category| category.name() == name) {
            return Err(CatalogLoadError::DuplicateCategory {
                path: label.to_string(),
                category: name,
            });
        }
        categories.push(Category::new(name, options));
    }

    Ok(Catalog::from_categories(categories))
}

use promptstructure::catalog::{is_header, Catalog, CatalogCache, CatalogLoadError};
use std::fs;
use tempfile::tempdir;

#[test]
fn wide_csv_becomes_ordered_categories_with_headers_kept() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("tokens.csv");
    fs::write(
        &path,
        "\u{feff}Lighting, Aesthetics ,Mood\n\
         — Natural —,Vaporwave,\n\
         Golden-hour glow,,\n\
         ,Bauhaus,\n",
    )
    .expect("write csv");

    let catalog = Catalog::from_path(&path).expect("load catalog");
    assert_eq!(
        catalog.names().collect::<Vec<_>>(),
        vec!["Lighting", "Aesthetics", "Mood"]
    );
    let lighting = catalog.category("Lighting").expect("lighting");
    assert_eq!(lighting.options().len(), 2);
    assert!(is_header(&lighting.options()[0]));
    assert_eq!(lighting.selectable_count(), 1);
    assert_eq!(
        catalog.category("Aesthetics").expect("aesthetics").options(),
        &["Vaporwave".to_string(), "Bauhaus".to_string()]
    );
    assert!(catalog.category("Mood").expect("mood").options().is_empty());
}

#[test]
fn lookup_falls_back_to_case_insensitive_names() {
    let catalog = Catalog::from_csv_str("Lighting\nNeon\n").expect("catalog");
    assert_eq!(catalog.lookup("lighting").expect("lookup").name(), "Lighting");
    assert!(catalog.category("lighting").is_none());
}

#[test]
fn missing_file_and_duplicate_headers_are_errors() {
    let dir = tempdir().expect("tempdir");
    let err = Catalog::from_path(&dir.path().join("absent.csv")).expect_err("missing file");
    assert!(matches!(err, CatalogLoadError::Read { .. }));

    let err = Catalog::from_csv_str("Lighting,Lighting\na,b\n").expect_err("duplicate");
    assert!(matches!(err, CatalogLoadError::DuplicateCategory { .. }));
}

#[test]
fn cache_serves_the_loaded_catalog_until_invalidated() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("tokens.csv");
    fs::write(&path, "Lighting\nNeon\n").expect("write csv");

    let mut cache = CatalogCache::new(&path);
    assert!(!cache.is_loaded());
    assert_eq!(cache.get().expect("first load").len(), 1);
    assert!(cache.is_loaded());

    cache.invalidate();
    fs::write(&path, "Lighting,Mood\nNeon,calm\n").expect("rewrite csv");
    assert_eq!(cache.get().expect("reload").len(), 2);
}

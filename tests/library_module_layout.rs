use std::fs;
use std::path::Path;

#[test]
fn lib_root_exports_domain_modules_only() {
    let lib_rs = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/lib.rs");
    let source = fs::read_to_string(&lib_rs).expect("read src/lib.rs");

    for module in ["app", "catalog", "config", "form", "presets", "prompt", "shared", "tui"] {
        assert!(
            source.contains(&format!("pub mod {module};")),
            "src/lib.rs does not export `{module}`"
        );
    }
    assert!(
        !source.contains("pub mod cli;"),
        "src/lib.rs exports a root cli module; the binary should route through app"
    );
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("failed to read token catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed token catalog {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("token catalog {path} has a blank category header in column {column}")]
    BlankCategory { path: String, column: usize },
    #[error("token catalog {path} declares category `{category}` more than once")]
    DuplicateCategory { path: String, category: String },
}

#[derive(Debug, thiserror::Error)]
pub enum PresetLoadError {
    #[error("failed to read preset file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json in preset file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid yaml in preset file {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("preset file {path} must map preset names to field records")]
    NotAMapping { path: String },
}

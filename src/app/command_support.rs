use crate::app::session::FormSession;
use crate::catalog::CatalogLoadError;
use crate::config::{load_settings, ConfigError, LoadedSettings};
use std::path::PathBuf;

/// Options accepted before the command verb.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
}

pub fn map_config_err(err: ConfigError) -> String {
    err.to_string()
}

pub fn map_catalog_err(err: CatalogLoadError) -> String {
    err.to_string()
}

pub fn load_cli_settings(options: &GlobalOptions) -> Result<LoadedSettings, String> {
    load_settings(options.config.as_deref()).map_err(map_config_err)
}

pub fn open_session(options: &GlobalOptions) -> Result<FormSession, String> {
    let loaded = load_cli_settings(options)?;
    FormSession::open(&loaded).map_err(map_catalog_err)
}

/// Splits leading global options off `args`.
pub fn split_global_options(args: &[String]) -> Result<(GlobalOptions, &[String]), String> {
    let mut options = GlobalOptions::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                if i + 1 >= args.len() {
                    return Err("missing value for --config".to_string());
                }
                options.config = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            _ => break,
        }
    }
    Ok((options, &args[i..]))
}

pub fn take_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("missing value for {flag}"))
}

use crate::app::command_support::{load_cli_settings, GlobalOptions};
use std::fs;

const RECENT_LOG_LINES: usize = 20;

pub fn cmd_logs(options: &GlobalOptions) -> Result<String, String> {
    let loaded = load_cli_settings(options)?;
    let Some(path) = loaded.event_log_path() else {
        return Ok("no logs".to_string());
    };
    if !path.is_file() {
        return Ok("no logs".to_string());
    }
    let raw =
        fs::read_to_string(&path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let mut recent = raw.lines().rev().take(RECENT_LOG_LINES).collect::<Vec<_>>();
    recent.reverse();
    if recent.is_empty() {
        return Ok("no logs".to_string());
    }
    Ok(recent.join("\n"))
}

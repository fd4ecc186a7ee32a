use crate::app::command_support::{load_cli_settings, GlobalOptions};
use crate::presets::{load_presets_or_empty, PresetStore};
use crate::shared::logging::EventLog;

fn load_store(options: &GlobalOptions) -> Result<PresetStore, String> {
    let loaded = load_cli_settings(options)?;
    let log = EventLog::new(loaded.event_log_path());
    Ok(load_presets_or_empty(&loaded.settings.preset_file, &log))
}

pub fn cmd_presets(options: &GlobalOptions, args: &[String]) -> Result<String, String> {
    let store = load_store(options)?;
    match args {
        [] => {
            if store.is_empty() {
                return Ok("no presets available".to_string());
            }
            Ok(store.names().collect::<Vec<_>>().join("\n"))
        }
        [verb, name] if verb == "show" => {
            let preset = store
                .get(name)
                .ok_or_else(|| format!("unknown preset `{name}`"))?;
            let mut lines = vec![format!("preset={}", preset.name())];
            for (field, value) in preset.fields() {
                let rendered = serde_json::to_string(value)
                    .map_err(|e| format!("failed to render preset field `{field}`: {e}"))?;
                lines.push(format!("{field}={rendered}"));
            }
            Ok(lines.join("\n"))
        }
        _ => Err("usage: presets [show <name>]".to_string()),
    }
}

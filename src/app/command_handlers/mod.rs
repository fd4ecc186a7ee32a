use crate::app::cli::{help_text, parse_cli_verb, CliVerb};
use crate::app::command_support::split_global_options;

pub mod catalog;
pub mod logs;
pub mod presets;
pub mod prompt;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    let (options, rest) = split_global_options(&args)?;
    if rest.is_empty() {
        return Ok(help_text());
    }

    match parse_cli_verb(rest[0].as_str()) {
        CliVerb::Help => Ok(help_text()),
        CliVerb::Prompt => prompt::cmd_prompt(&options, &rest[1..]),
        CliVerb::Categories => catalog::cmd_categories(&options, &rest[1..]),
        CliVerb::Presets => presets::cmd_presets(&options, &rest[1..]),
        CliVerb::Define => catalog::cmd_define(&rest[1..]),
        CliVerb::Form => crate::tui::form::cmd_form(&options),
        CliVerb::Logs => logs::cmd_logs(&options),
        CliVerb::Unknown => Err(format!("unknown command `{}`", rest[0])),
    }
}

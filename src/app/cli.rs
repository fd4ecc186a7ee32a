#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Help,
    Prompt,
    Categories,
    Presets,
    Define,
    Form,
    Logs,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "help" | "--help" | "-h" => CliVerb::Help,
        "prompt" => CliVerb::Prompt,
        "categories" => CliVerb::Categories,
        "presets" => CliVerb::Presets,
        "define" => CliVerb::Define,
        "form" => CliVerb::Form,
        "logs" => CliVerb::Logs,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Usage: promptstructure [--config <path>] <command> [args]".to_string(),
        String::new(),
        "Commands:".to_string(),
        "  prompt [options]                     Assemble a prompt from fields, selections and presets"
            .to_string(),
        "  categories [<name>]                  List token categories or one category's options"
            .to_string(),
        "  presets [show <name>]                List presets or show one preset's fields".to_string(),
        "  define <token>                       Describe a token".to_string(),
        "  form                                 Open the interactive prompt form".to_string(),
        "  logs                                 Print recent event log lines".to_string(),
    ]
}

pub fn prompt_help_lines() -> Vec<String> {
    vec![
        "Prompt options:".to_string(),
        "  --preset <name>                      Start from a preset".to_string(),
        "  --subject|--action|--environment|--notes <text>".to_string(),
        "  --select <category>=<opt>[;<opt>]    Select options (repeatable)".to_string(),
        "  --random                             Fill empty categories with random tokens"
            .to_string(),
        "  --rng-seed <n>                       Seed for --random".to_string(),
        "  --engine plain|midjourney|niji       Target engine".to_string(),
        "  --ar, --seed, --stylize, ... <value> Engine parameters".to_string(),
        "  --out <path>                         Also write the prompt to a file".to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    let mut lines = cli_help_lines();
    lines.push(String::new());
    lines.extend(prompt_help_lines());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_map_and_unknown_falls_through() {
        assert_eq!(parse_cli_verb("prompt"), CliVerb::Prompt);
        assert_eq!(parse_cli_verb("--help"), CliVerb::Help);
        assert_eq!(parse_cli_verb("render"), CliVerb::Unknown);
    }

    #[test]
    fn help_mentions_every_command() {
        let help = help_text();
        for verb in ["prompt", "categories", "presets", "define", "form", "logs"] {
            assert!(help.contains(verb), "help is missing {verb}");
        }
    }
}

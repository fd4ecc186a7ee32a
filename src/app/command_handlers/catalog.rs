use crate::app::command_support::{open_session, GlobalOptions};
use crate::catalog::is_header;
use crate::form::describe_token;

pub fn cmd_categories(options: &GlobalOptions, args: &[String]) -> Result<String, String> {
    let session = open_session(options)?;
    let catalog = session.catalog();
    match args {
        [] => {
            if catalog.is_empty() {
                return Ok("no categories".to_string());
            }
            Ok(catalog
                .categories()
                .iter()
                .map(|category| {
                    format!("{} ({} options)", category.name(), category.selectable_count())
                })
                .collect::<Vec<_>>()
                .join("\n"))
        }
        [name] => {
            let category = catalog
                .lookup(name)
                .ok_or_else(|| format!("unknown category `{name}`"))?;
            let mut lines = vec![category.name().to_string()];
            for option in category.options() {
                if is_header(option) {
                    lines.push(option.clone());
                } else {
                    lines.push(format!("  {option}"));
                }
            }
            Ok(lines.join("\n"))
        }
        _ => Err("usage: categories [<name>]".to_string()),
    }
}

pub fn cmd_define(args: &[String]) -> Result<String, String> {
    let token = args.join(" ");
    if token.trim().is_empty() {
        return Err("usage: define <token>".to_string());
    }
    Ok(describe_token(&token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_joins_words_and_requires_a_token() {
        let args = vec!["golden-hour".to_string(), "glow".to_string()];
        assert_eq!(
            cmd_define(&args).expect("define"),
            "A concise description of 'golden-hour glow' for creative prompting."
        );
        assert!(cmd_define(&[]).is_err());
    }
}

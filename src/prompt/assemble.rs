use super::PromptLayout;
use crate::catalog::is_header;
use crate::form::{FormState, ScalarField};

/// Returned when no field or selection contributes any text.
pub const EMPTY_PROMPT: &str = "(empty)";

/// Ordered prompt clauses before joining: leading scalars, one clause per
/// selected layout category, then notes.
pub fn clauses(state: &FormState, layout: &PromptLayout) -> Vec<String> {
    let mut out = Vec::new();
    for field in ScalarField::LEADING {
        push_raw(&mut out, state.scalar(field));
    }

    for entry in layout.categories() {
        let options: Vec<&str> = state
            .selection(&entry.name)
            .iter()
            .map(|option| option.trim())
            .filter(|option| !option.is_empty() && !is_header(option))
            .collect();
        if options.is_empty() {
            continue;
        }
        let joined = options.join(", ");
        let connector = entry.connector.trim();
        if connector.is_empty() {
            out.push(joined);
        } else {
            out.push(format!("{connector} {joined}"));
        }
    }

    push_raw(&mut out, state.scalar(ScalarField::Notes));
    out
}

/// Builds the final prompt. Never fails; a form with no content yields
/// [`EMPTY_PROMPT`] even when engine parameters are set.
pub fn assemble(state: &FormState, layout: &PromptLayout) -> String {
    let sentence = tidy_sentence(&clauses(state, layout).join(", "));
    if sentence.is_empty() {
        return EMPTY_PROMPT.to_string();
    }

    let mut prompt = sentence;
    if !prompt.ends_with(&['.', '!', '?'][..]) {
        prompt.push('.');
    }
    if let Some(suffix) = state.engine().parameter_suffix() {
        prompt.push(' ');
        prompt.push_str(&suffix);
    }
    prompt
}

/// Collapses whitespace runs, drops whitespace before a comma and drops empty
/// comma-separated pieces, so the result has no `" ,"`, no `",,"` and no
/// leading or trailing comma. Commas the text already had keep their spacing.
pub fn tidy_sentence(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .split(',')
        .map(str::trim_end)
        .filter(|piece| !piece.trim_start().is_empty())
        .collect::<Vec<_>>()
        .join(",")
        .trim()
        .to_string()
}

fn push_raw(out: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        out.push(value.to_string());
    }
}

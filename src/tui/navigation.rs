use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub const FIELDS_HINT_TEXT: &str =
    "Up/Down move | Enter edit/open | r random | c clear | p preset | g engine | s done | Esc cancel";
pub const OPTIONS_HINT_TEXT: &str = "Up/Down move | Space/Enter toggle | Esc back";
pub const EDIT_HINT_TEXT: &str = "Type text | Enter keep | Esc discard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormScreen {
    Fields,
    Options,
    EditText,
}

impl FormScreen {
    fn as_str(self) -> &'static str {
        match self {
            FormScreen::Fields => "fields",
            FormScreen::Options => "options",
            FormScreen::EditText => "edit_text",
        }
    }

    pub fn hint_text(self) -> &'static str {
        match self {
            FormScreen::Fields => FIELDS_HINT_TEXT,
            FormScreen::Options => OPTIONS_HINT_TEXT,
            FormScreen::EditText => EDIT_HINT_TEXT,
        }
    }
}

impl std::fmt::Display for FormScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    MovePrev,
    MoveNext,
    Enter,
    Toggle,
    Back,
    Cancel,
    RandomFill,
    ClearAll,
    NextPreset,
    NextEngine,
    Finish,
    Input(char),
    Backspace,
}

pub fn clamp_selection(selected: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    selected.min(len - 1)
}

pub fn form_action_from_key(screen: FormScreen, key: KeyEvent) -> Option<FormAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(FormAction::Cancel);
    }
    if screen == FormScreen::EditText {
        return match key.code {
            KeyCode::Enter => Some(FormAction::Enter),
            KeyCode::Esc => Some(FormAction::Back),
            KeyCode::Backspace => Some(FormAction::Backspace),
            KeyCode::Char(ch) => Some(FormAction::Input(ch)),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Up => Some(FormAction::MovePrev),
        KeyCode::Down => Some(FormAction::MoveNext),
        KeyCode::Esc => Some(if screen == FormScreen::Fields {
            FormAction::Cancel
        } else {
            FormAction::Back
        }),
        KeyCode::Enter => Some(if screen == FormScreen::Options {
            FormAction::Toggle
        } else {
            FormAction::Enter
        }),
        KeyCode::Char(' ') => Some(FormAction::Toggle),
        KeyCode::Char('r') => Some(FormAction::RandomFill),
        KeyCode::Char('c') => Some(FormAction::ClearAll),
        KeyCode::Char('p') => Some(FormAction::NextPreset),
        KeyCode::Char('g') => Some(FormAction::NextEngine),
        KeyCode::Char('s') => Some(FormAction::Finish),
        _ => None,
    }
}

/// Parses a comma-separated key script. Named keys (`up`, `down`, `enter`,
/// `esc`, `space`, `backspace`, `ctrl-c`), single characters, and
/// `text=<chars>` for typing several characters at once.
pub fn parse_scripted_form_keys(raw: &str) -> Result<Vec<KeyEvent>, String> {
    let mut keys = Vec::new();
    for token in raw.split(',') {
        if let Some(text) = token.trim_start().strip_prefix("text=") {
            keys.extend(
                text.chars()
                    .map(|ch| KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)),
            );
            continue;
        }
        let normalized = token.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            continue;
        }
        let key = match normalized.as_str() {
            "up" => KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            "down" => KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            "enter" => KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            "esc" => KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            "space" => KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE),
            "backspace" => KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
            "ctrl-c" => KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE),
                    _ => {
                        return Err(format!(
                            "invalid PROMPTSTRUCTURE_FORM_SCRIPT_KEYS token `{other}`; valid tokens: up,down,enter,esc,space,backspace,ctrl-c,<char>,text=<chars>"
                        ));
                    }
                }
            }
        };
        keys.push(key);
    }
    Ok(keys)
}

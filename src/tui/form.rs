use crate::app::command_support::{open_session, GlobalOptions};
use crate::app::session::FormSession;
use crate::catalog::is_header;
use crate::form::{describe_token, ScalarField};
use crate::tui::navigation::{
    clamp_selection, form_action_from_key, parse_scripted_form_keys, FormAction, FormScreen,
};
use crate::tui::screens::draw_form;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, IsTerminal};
use std::time::Duration;

pub const SCRIPT_KEYS_ENV: &str = "PROMPTSTRUCTURE_FORM_SCRIPT_KEYS";
pub const RNG_SEED_ENV: &str = "PROMPTSTRUCTURE_FORM_RNG_SEED";

const READY_STATUS_TEXT: &str = "Pick a field or category.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormRow {
    Scalar(ScalarField),
    Category(String),
    Param(&'static str),
}

/// Scalar fields, then catalog categories, then the parameters the current
/// engine mode declares.
pub fn form_rows(session: &FormSession) -> Vec<FormRow> {
    ScalarField::ALL
        .into_iter()
        .map(FormRow::Scalar)
        .chain(
            session
                .catalog()
                .names()
                .map(|name| FormRow::Category(name.to_string())),
        )
        .chain(
            session
                .state
                .engine()
                .mode
                .parameter_keys()
                .iter()
                .copied()
                .map(FormRow::Param),
        )
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormExit {
    Finish,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub screen: FormScreen,
    pub row: usize,
    pub option_row: usize,
    pub edit_buffer: String,
    pub status_text: String,
    pub last_token: Option<String>,
    pub preset_cursor: Option<usize>,
}

impl Default for FormView {
    fn default() -> Self {
        Self {
            screen: FormScreen::Fields,
            row: 0,
            option_row: 0,
            edit_buffer: String::new(),
            status_text: READY_STATUS_TEXT.to_string(),
            last_token: None,
            preset_cursor: None,
        }
    }
}

impl FormView {
    pub fn token_help(&self) -> Option<String> {
        self.last_token.as_deref().map(describe_token)
    }

    fn current_row(&self, session: &FormSession) -> Option<FormRow> {
        form_rows(session).into_iter().nth(self.row)
    }
}

/// Applies one action to the view and the session. Returns the exit the user
/// asked for, if any.
pub fn apply_form_action<R: Rng + ?Sized>(
    view: &mut FormView,
    session: &mut FormSession,
    action: FormAction,
    rng: &mut R,
) -> Option<FormExit> {
    if view.screen == FormScreen::EditText {
        return apply_edit_action(view, session, action);
    }

    match action {
        FormAction::Cancel => return Some(FormExit::Cancel),
        FormAction::Finish => return Some(FormExit::Finish),
        FormAction::RandomFill => {
            let filled = session.random_fill(rng);
            view.status_text = format!("random fill: {} categories", filled.len());
        }
        FormAction::ClearAll => {
            session.clear_all();
            view.last_token = None;
            view.preset_cursor = None;
            view.status_text = "cleared all fields".to_string();
        }
        FormAction::NextPreset => cycle_preset(view, session),
        FormAction::NextEngine => {
            let mode = session.state.engine().mode.next();
            session.state.engine_mut().mode = mode;
            view.row = clamp_selection(view.row, form_rows(session).len());
            view.status_text = format!("engine: {mode}");
        }
        _ => match view.screen {
            FormScreen::Fields => apply_fields_action(view, session, action),
            FormScreen::Options => apply_options_action(view, session, action),
            FormScreen::EditText => {}
        },
    }
    None
}

fn apply_edit_action(
    view: &mut FormView,
    session: &mut FormSession,
    action: FormAction,
) -> Option<FormExit> {
    match action {
        FormAction::Cancel => return Some(FormExit::Cancel),
        FormAction::Input(ch) => view.edit_buffer.push(ch),
        FormAction::Backspace => {
            view.edit_buffer.pop();
        }
        FormAction::Enter => {
            match view.current_row(session) {
                Some(FormRow::Scalar(field)) => {
                    session
                        .state
                        .set_scalar(field, view.edit_buffer.trim().to_string());
                    view.status_text = format!("{} updated", field.label());
                }
                Some(FormRow::Param(key)) => {
                    session.state.set_param(key, &view.edit_buffer);
                    view.status_text = format!("{key} updated");
                }
                _ => {}
            }
            view.edit_buffer.clear();
            view.screen = FormScreen::Fields;
        }
        FormAction::Back => {
            view.edit_buffer.clear();
            view.status_text = "edit discarded".to_string();
            view.screen = FormScreen::Fields;
        }
        _ => {}
    }
    None
}

fn apply_fields_action(view: &mut FormView, session: &mut FormSession, action: FormAction) {
    let row_count = form_rows(session).len();
    match action {
        FormAction::MovePrev => view.row = view.row.saturating_sub(1),
        FormAction::MoveNext => view.row = clamp_selection(view.row + 1, row_count),
        FormAction::Enter | FormAction::Toggle => match view.current_row(session) {
            Some(FormRow::Scalar(field)) => {
                view.edit_buffer = session.state.scalar(field).to_string();
                view.screen = FormScreen::EditText;
                view.status_text = format!("editing {}", field.label());
            }
            Some(FormRow::Param(key)) => {
                view.edit_buffer = session
                    .state
                    .engine()
                    .param(key)
                    .unwrap_or_default()
                    .to_string();
                view.screen = FormScreen::EditText;
                view.status_text = format!("editing {key}");
            }
            Some(FormRow::Category(name)) => {
                let has_options = session
                    .catalog()
                    .category(&name)
                    .is_some_and(|category| !category.options().is_empty());
                if has_options {
                    view.option_row = 0;
                    view.screen = FormScreen::Options;
                    view.status_text = format!("choosing {name}");
                } else {
                    view.status_text = format!("{name} has no options");
                }
            }
            None => {}
        },
        _ => {}
    }
}

fn apply_options_action(view: &mut FormView, session: &mut FormSession, action: FormAction) {
    let Some(FormRow::Category(name)) = view.current_row(session) else {
        view.screen = FormScreen::Fields;
        return;
    };
    let options: Vec<String> = session
        .catalog()
        .category(&name)
        .map(|category| category.options().to_vec())
        .unwrap_or_default();

    match action {
        FormAction::MovePrev => view.option_row = view.option_row.saturating_sub(1),
        FormAction::MoveNext => {
            view.option_row = clamp_selection(view.option_row + 1, options.len());
        }
        FormAction::Toggle | FormAction::Enter => {
            let Some(option) = options.get(view.option_row) else {
                return;
            };
            if is_header(option) {
                view.status_text = "section labels cannot be selected".to_string();
            } else if session.toggle(&name, option) {
                view.last_token = Some(option.clone());
                view.status_text = format!("selected {option}");
            } else {
                view.status_text = format!("removed {option}");
            }
        }
        FormAction::Back => {
            view.screen = FormScreen::Fields;
            view.status_text = READY_STATUS_TEXT.to_string();
        }
        _ => {}
    }
}

fn cycle_preset(view: &mut FormView, session: &mut FormSession) {
    let names: Vec<String> = session.presets().names().map(str::to_string).collect();
    if names.is_empty() {
        view.status_text = "no presets available".to_string();
        return;
    }
    let next = view
        .preset_cursor
        .map(|cursor| (cursor + 1) % names.len())
        .unwrap_or(0);
    let name = &names[next];
    match session.apply_preset(name) {
        Ok(()) => {
            view.preset_cursor = Some(next);
            view.last_token = None;
            view.status_text = format!("preset: {name}");
        }
        Err(err) => view.status_text = err,
    }
}

fn form_rng() -> Result<StdRng, String> {
    match std::env::var(RNG_SEED_ENV) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(StdRng::seed_from_u64)
            .map_err(|_| format!("{RNG_SEED_ENV} must be a non-negative integer")),
        Err(_) => Ok(StdRng::from_entropy()),
    }
}

fn finish(session: &FormSession, exit: FormExit) -> String {
    match exit {
        FormExit::Finish => session.prompt(),
        FormExit::Cancel => "form canceled".to_string(),
    }
}

pub fn run_form_scripted(
    session: &mut FormSession,
    keys: Vec<crossterm::event::KeyEvent>,
    rng: &mut StdRng,
) -> Result<FormExit, String> {
    let mut view = FormView::default();
    for key in keys {
        let Some(action) = form_action_from_key(view.screen, key) else {
            continue;
        };
        if let Some(exit) = apply_form_action(&mut view, session, action, rng) {
            return Ok(exit);
        }
    }
    Err("scripted form did not terminate; include s or esc".to_string())
}

fn is_interactive_form() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

fn run_form_tui(session: &mut FormSession, rng: &mut StdRng) -> Result<FormExit, String> {
    let mut stdout = io::stdout();
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    execute!(stdout, EnterAlternateScreen, Hide)
        .map_err(|e| format!("failed to enter form screen: {e}"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create form terminal: {e}"))?;
    let result = run_form_tui_loop(session, rng, &mut terminal);
    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(terminal.backend_mut(), Show, LeaveAlternateScreen)
        .map_err(|e| format!("failed to leave form screen: {e}"))?;
    result
}

fn run_form_tui_loop(
    session: &mut FormSession,
    rng: &mut StdRng,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<FormExit, String> {
    let mut view = FormView::default();
    loop {
        draw_form(terminal, &view, session)?;
        if !event::poll(Duration::from_millis(250))
            .map_err(|e| format!("failed to poll form input: {e}"))?
        {
            continue;
        }
        let ev = event::read().map_err(|e| format!("failed to read form input: {e}"))?;
        let Event::Key(key) = ev else {
            continue;
        };
        let Some(action) = form_action_from_key(view.screen, key) else {
            continue;
        };
        if let Some(exit) = apply_form_action(&mut view, session, action, rng) {
            return Ok(exit);
        }
    }
}

pub fn cmd_form(options: &GlobalOptions) -> Result<String, String> {
    let mut session = open_session(options)?;
    let mut rng = form_rng()?;
    let exit = if let Ok(raw) = std::env::var(SCRIPT_KEYS_ENV) {
        let keys = parse_scripted_form_keys(&raw)?;
        run_form_scripted(&mut session, keys, &mut rng)?
    } else if is_interactive_form() {
        run_form_tui(&mut session, &mut rng)?
    } else {
        return Err(format!(
            "form requires an interactive terminal; set {SCRIPT_KEYS_ENV} to script it"
        ));
    };
    Ok(finish(&session, exit))
}

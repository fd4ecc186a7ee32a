use crate::app::session::FormSession;
use crate::catalog::is_header;
use crate::tui::form::{form_rows, FormRow, FormView};
use crate::tui::navigation::{clamp_selection, FormScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, List, ListItem, Padding, Paragraph, Row, Table, Wrap};
use ratatui::{Frame, Terminal};
use std::io;

const VALUE_PREVIEW_CHARS: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRowView {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRowView {
    pub text: String,
    pub header: bool,
    pub selected: bool,
}

/// Everything the form screen shows, projected out of the session so the
/// rendering code stays free of form rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormViewModel {
    pub title: String,
    pub mode_line: String,
    pub rows: Vec<FieldRowView>,
    pub selected_row: usize,
    pub options: Option<Vec<OptionRowView>>,
    pub selected_option: usize,
    pub preview: String,
    pub status_text: String,
    pub hint_text: String,
}

pub fn project_form_view_model(view: &FormView, session: &FormSession) -> FormViewModel {
    let rows = form_rows(session);
    let selected_row = clamp_selection(view.row, rows.len());

    let row_views = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| match row {
            FormRow::Scalar(field) => {
                let value = if view.screen == FormScreen::EditText && idx == selected_row {
                    format!("{}_", view.edit_buffer)
                } else {
                    session.state.scalar(*field).to_string()
                };
                FieldRowView {
                    label: field.label().to_string(),
                    value: truncate_for_display(&value, VALUE_PREVIEW_CHARS),
                }
            }
            FormRow::Category(name) => FieldRowView {
                label: name.clone(),
                value: truncate_for_display(
                    &session.state.selection(name).join(", "),
                    VALUE_PREVIEW_CHARS,
                ),
            },
            FormRow::Param(key) => {
                let value = if view.screen == FormScreen::EditText && idx == selected_row {
                    format!("{}_", view.edit_buffer)
                } else {
                    session.state.engine().param(key).unwrap_or_default().to_string()
                };
                FieldRowView {
                    label: (*key).to_string(),
                    value: truncate_for_display(&value, VALUE_PREVIEW_CHARS),
                }
            }
        })
        .collect();

    let options = match (view.screen, rows.get(selected_row)) {
        (FormScreen::Options, Some(FormRow::Category(name))) => {
            let chosen = session.state.selection(name);
            session.catalog().category(name).map(|category| {
                category
                    .options()
                    .iter()
                    .map(|option| OptionRowView {
                        text: option.clone(),
                        header: is_header(option),
                        selected: chosen.contains(option),
                    })
                    .collect::<Vec<_>>()
            })
        }
        _ => None,
    };
    let option_count = options.as_ref().map_or(0, Vec::len);

    let mut status_text = view.status_text.clone();
    if let Some(help) = view.token_help() {
        status_text.push_str(" | ");
        status_text.push_str(&help);
    }

    FormViewModel {
        title: "Prompt Structure".to_string(),
        mode_line: format!(
            "Engine: {} | Preset: {}",
            session.state.engine().mode,
            view.preset_cursor
                .and_then(|idx| session.presets().names().nth(idx))
                .unwrap_or("none")
        ),
        rows: row_views,
        selected_row,
        options,
        selected_option: clamp_selection(view.option_row, option_count),
        preview: session.preview(),
        status_text,
        hint_text: view.screen.hint_text().to_string(),
    }
}

pub fn truncate_for_display(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let kept: String = value.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

pub(crate) fn draw_form(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    view: &FormView,
    session: &FormSession,
) -> Result<(), String> {
    let view_model = project_form_view_model(view, session);
    terminal
        .draw(|frame| draw_form_ui(frame, &view_model))
        .map_err(|e| format!("failed to render form: {e}"))?;
    Ok(())
}

fn selected_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn draw_form_ui(frame: &mut Frame<'_>, view_model: &FormViewModel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(5),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            view_model.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(view_model.mode_line.clone()),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(if view_model.options.is_some() {
            [Constraint::Percentage(55), Constraint::Percentage(45)]
        } else {
            [Constraint::Percentage(100), Constraint::Percentage(0)]
        })
        .split(chunks[1]);

    let table_rows = view_model.rows.iter().enumerate().map(|(idx, row)| {
        let style = if idx == view_model.selected_row {
            selected_style()
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(row.label.clone()),
            Cell::from(row.value.clone()),
        ])
        .style(style)
    });
    let table = Table::new(
        table_rows,
        [Constraint::Percentage(35), Constraint::Percentage(65)],
    )
    .column_spacing(2)
    .block(main_panel_block());
    frame.render_widget(table, body[0]);

    if let Some(options) = &view_model.options {
        let items: Vec<ListItem> = options
            .iter()
            .enumerate()
            .map(|(idx, option)| {
                let text = if option.header {
                    option.text.clone()
                } else if option.selected {
                    format!("[x] {}", option.text)
                } else {
                    format!("[ ] {}", option.text)
                };
                let mut style = if option.header {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                };
                if idx == view_model.selected_option {
                    style = selected_style();
                }
                ListItem::new(Line::from(Span::raw(text))).style(style)
            })
            .collect();
        frame.render_widget(
            List::new(items).block(Block::default().borders(Borders::ALL)),
            body[1],
        );
    }

    let preview = Paragraph::new(view_model.preview.clone())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Prompt"));
    frame.render_widget(preview, chunks[2]);

    let footer = Paragraph::new(vec![
        Line::from(view_model.hint_text.clone()),
        Line::from(format!("Status: {}", view_model.status_text)),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[3]);
}

fn main_panel_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .padding(Padding::new(2, 2, 1, 1))
}

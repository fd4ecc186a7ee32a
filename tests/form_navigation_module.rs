use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use promptstructure::app::session::FormSession;
use promptstructure::catalog::Catalog;
use promptstructure::presets::parse_presets_json;
use promptstructure::prompt::PromptLayout;
use promptstructure::shared::logging::EventLog;
use promptstructure::tui::form::{run_form_scripted, FormExit, FormView};
use promptstructure::tui::navigation::{
    form_action_from_key, parse_scripted_form_keys, FormAction, FormScreen,
};
use promptstructure::tui::screens::project_form_view_model;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn session() -> FormSession {
    let catalog = Catalog::from_csv_str(
        "Materials & Textures,Lighting\nmatte carbon fiber,golden-hour glow\n",
    )
    .expect("catalog");
    let presets = parse_presets_json(
        "inline",
        r#"{"Athlete": {"Main subject": "adventure sport athlete"}}"#,
    )
    .expect("presets");
    FormSession::new(catalog, presets, PromptLayout::default(), EventLog::disabled())
}

#[test]
fn enter_toggles_inside_options_and_opens_elsewhere() {
    let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
    assert_eq!(
        form_action_from_key(FormScreen::Fields, enter),
        Some(FormAction::Enter)
    );
    assert_eq!(
        form_action_from_key(FormScreen::Options, enter),
        Some(FormAction::Toggle)
    );
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(
        form_action_from_key(FormScreen::EditText, ctrl_c),
        Some(FormAction::Cancel)
    );
}

#[test]
fn scripted_preset_and_selections_build_the_example_prompt() {
    let mut session = session();
    let keys = parse_scripted_form_keys(
        "p,down,down,down,down,enter,space,esc,down,enter,space,esc,s",
    )
    .expect("parse keys");
    let exit =
        run_form_scripted(&mut session, keys, &mut StdRng::seed_from_u64(3)).expect("run form");

    assert_eq!(exit, FormExit::Finish);
    assert_eq!(
        session.preview(),
        "adventure sport athlete, featuring matte carbon fiber, lit by golden-hour glow."
    );
}

#[test]
fn view_model_reports_engine_and_preset() {
    let mut session = session();
    let keys = parse_scripted_form_keys("p,g").expect("parse keys");
    // No exit key: the script errors but the session keeps its changes.
    let err = run_form_scripted(&mut session, keys, &mut StdRng::seed_from_u64(3))
        .expect_err("unterminated script");
    assert!(err.contains("did not terminate"));

    let view = FormView::default();
    let model = project_form_view_model(&view, &session);
    assert!(model.mode_line.starts_with("Engine: midjourney"));
    assert_eq!(model.rows[0].value, "adventure sport athlete");
    assert_eq!(model.preview, "adventure sport athlete.");
}

// ABOUTME: Unit tests for event handling to ensure keyboard inputs map to correct app actions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use scopewise::app::{AppEvent, AppState, EventHandler};
use scopewise::config::AppConfig;
use scopewise::wizard::{MemoryDraftStore, WizardStep};

const fn create_key_event(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

const fn create_key_event_with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn state_at(step: WizardStep) -> AppState {
    let mut state = AppState::new(AppConfig::default(), Box::new(MemoryDraftStore::new()));
    state.open_at(step);
    state
}

fn key(state: &mut AppState, code: KeyCode) -> Option<AppEvent> {
    EventHandler::handle_key_event(create_key_event(code), state)
}

#[test]
fn test_quit_key_events() {
    let mut state = state_at(WizardStep::BusinessContext);

    assert_eq!(key(&mut state, KeyCode::Char('q')), Some(AppEvent::Quit));
    assert_eq!(key(&mut state, KeyCode::Esc), Some(AppEvent::Quit));
    assert_eq!(
        EventHandler::handle_key_event(
            create_key_event_with_modifiers(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut state,
        ),
        Some(AppEvent::Quit)
    );
}

#[test]
fn test_form_navigation_key_events() {
    let mut state = state_at(WizardStep::EngagementPreferences);

    assert_eq!(key(&mut state, KeyCode::Char('j')), Some(AppEvent::NextField));
    assert_eq!(key(&mut state, KeyCode::Tab), Some(AppEvent::NextField));
    assert_eq!(key(&mut state, KeyCode::Char('k')), Some(AppEvent::PreviousField));
    assert_eq!(key(&mut state, KeyCode::Char('l')), Some(AppEvent::NextOption));
    assert_eq!(key(&mut state, KeyCode::Char('h')), Some(AppEvent::PreviousOption));
    assert_eq!(key(&mut state, KeyCode::Char(' ')), Some(AppEvent::Activate));
    assert_eq!(key(&mut state, KeyCode::Char('n')), Some(AppEvent::Continue));
    assert_eq!(key(&mut state, KeyCode::Char('b')), Some(AppEvent::Back));
    assert_eq!(key(&mut state, KeyCode::Char('s')), Some(AppEvent::SaveDraft));
    assert_eq!(key(&mut state, KeyCode::Char('x')), Some(AppEvent::DismissFeedback));
}

#[test]
fn test_stepper_digits_jump() {
    let mut state = state_at(WizardStep::AssetScoping);
    assert_eq!(key(&mut state, KeyCode::Char('1')), Some(AppEvent::JumpToStep(0)));
    assert_eq!(key(&mut state, KeyCode::Char('6')), Some(AppEvent::JumpToStep(5)));
    assert_eq!(key(&mut state, KeyCode::Char('7')), None);
}

#[test]
fn test_editor_captures_typing() {
    let mut state = state_at(WizardStep::BusinessContext);
    EventHandler::process_event(AppEvent::Activate, &mut state);
    assert!(state.editor.is_some());

    // Letters that are shortcuts elsewhere become text
    assert_eq!(key(&mut state, KeyCode::Char('q')), Some(AppEvent::EditInput('q')));
    assert_eq!(key(&mut state, KeyCode::Char('1')), Some(AppEvent::EditInput('1')));
    assert_eq!(key(&mut state, KeyCode::Enter), Some(AppEvent::EditCommit));
    assert_eq!(key(&mut state, KeyCode::Esc), Some(AppEvent::EditCancel));
    assert_eq!(
        EventHandler::handle_key_event(
            create_key_event_with_modifiers(KeyCode::Enter, KeyModifiers::ALT),
            &mut state,
        ),
        Some(AppEvent::EditNewline)
    );
}

#[test]
fn test_review_key_events() {
    let mut state = state_at(WizardStep::Review);
    assert_eq!(key(&mut state, KeyCode::Enter), Some(AppEvent::ToggleSection));
    assert_eq!(key(&mut state, KeyCode::Char('e')), Some(AppEvent::EditSection));
    assert_eq!(key(&mut state, KeyCode::Char('a')), Some(AppEvent::ToggleNda));
    assert_eq!(key(&mut state, KeyCode::Char('c')), Some(AppEvent::ToggleAuditConsent));
    assert_eq!(key(&mut state, KeyCode::Char('t')), Some(AppEvent::ToggleTerms));
    assert_eq!(key(&mut state, KeyCode::Char('p')), Some(AppEvent::GeneratePreview));
}

#[test]
fn test_submit_key_events() {
    let mut state = state_at(WizardStep::Submit);
    assert_eq!(key(&mut state, KeyCode::Char('d')), Some(AppEvent::DownloadDocument));
    assert_eq!(key(&mut state, KeyCode::Char('m')), Some(AppEvent::EmailDocument));
    assert_eq!(key(&mut state, KeyCode::Char('j')), None);
}

#[test]
fn test_help_overlay_swallows_keys() {
    let mut state = state_at(WizardStep::BusinessContext);
    let toggle = key(&mut state, KeyCode::Char('?')).unwrap();
    EventHandler::process_event(toggle, &mut state);
    assert!(state.help_visible);

    assert_eq!(key(&mut state, KeyCode::Char('n')), None);
    assert_eq!(key(&mut state, KeyCode::Esc), Some(AppEvent::ToggleHelp));
}

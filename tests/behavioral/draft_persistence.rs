// ABOUTME: Behavioral tests for draft persistence across restarts
//
// Drafts are written by the debounced auto-save, by explicit save, by Continue
// and on quit, and are read back when a new session starts.

use std::time::{Duration, Instant};

use super::fixtures::{complete_business, TestDrafts};
use scopewise::app::{AppEvent, EventHandler};
use scopewise::cli::reset::clear_all;
use scopewise::models::{BusinessContext, EngagementPreferences};
use scopewise::wizard::{read_record, write_record, DraftStore, FieldValue, SaveStatus, WizardStep};

fn type_text(state: &mut scopewise::app::AppState, text: &str) {
    EventHandler::process_event(AppEvent::Activate, state);
    for c in text.chars() {
        EventHandler::process_event(AppEvent::EditInput(c), state);
    }
    EventHandler::process_event(AppEvent::EditCommit, state);
}

#[test]
fn test_debounced_edit_written_after_quiet_period() {
    let drafts = TestDrafts::new();
    let mut state = drafts.state();

    type_text(&mut state, "Acme");
    let stored = read_record::<BusinessContext>(&drafts.store()).unwrap();
    assert!(stored.is_none(), "nothing is written inside the debounce window");

    state.session.tick(Instant::now() + Duration::from_secs(3));
    let stored = read_record::<BusinessContext>(&drafts.store()).unwrap().unwrap();
    assert_eq!(stored.company_name, "Acme");
    assert_eq!(state.session.save_status(), &SaveStatus::Saved);
}

#[test]
fn test_explicit_save_survives_restart() {
    let drafts = TestDrafts::new();
    let mut state = drafts.state();
    type_text(&mut state, "Globex");
    EventHandler::process_event(AppEvent::SaveDraft, &mut state);

    let restarted = drafts.state();
    assert_eq!(
        restarted.session.value("companyName"),
        Some(FieldValue::Text("Globex".to_string()))
    );
}

#[test]
fn test_quit_flushes_pending_edit() {
    let drafts = TestDrafts::new();
    let mut state = drafts.state();
    type_text(&mut state, "Initech");

    EventHandler::process_event(AppEvent::Quit, &mut state);
    assert!(state.should_quit);

    let stored = read_record::<BusinessContext>(&drafts.store()).unwrap().unwrap();
    assert_eq!(stored.company_name, "Initech");
}

#[test]
fn test_edit_survives_jump_back_then_quit() {
    let drafts = TestDrafts::new();
    let mut state = drafts.state();
    state.open_at(WizardStep::EngagementPreferences);

    // Second field is the start date
    EventHandler::process_event(AppEvent::NextField, &mut state);
    type_text(&mut state, "2030-05-01");

    EventHandler::process_event(AppEvent::JumpToStep(0), &mut state);
    assert_eq!(state.current_step(), WizardStep::BusinessContext);
    EventHandler::process_event(AppEvent::Quit, &mut state);

    let stored = read_record::<EngagementPreferences>(&drafts.store()).unwrap().unwrap();
    assert_eq!(stored.start_date, "2030-05-01");

    let restarted = drafts.state();
    assert_eq!(restarted.session.engagement.record().start_date, "2030-05-01");
}

#[test]
fn test_quit_flushes_edits_on_every_step() {
    let drafts = TestDrafts::new();
    let mut state = drafts.state();
    type_text(&mut state, "Umbrella");
    state
        .session
        .engagement
        .update(Instant::now(), |r| r.budget_range = "25000-50000".to_string());

    EventHandler::process_event(AppEvent::Quit, &mut state);

    let business = read_record::<BusinessContext>(&drafts.store()).unwrap().unwrap();
    assert_eq!(business.company_name, "Umbrella");
    let engagement = read_record::<EngagementPreferences>(&drafts.store()).unwrap().unwrap();
    assert_eq!(engagement.budget_range, "25000-50000");
}

#[test]
fn test_corrupt_draft_starts_from_defaults() {
    let drafts = TestDrafts::new();
    let mut store = drafts.store();
    store.save_raw("pentest-business-context", "{not json").unwrap();

    let state = drafts.state();
    assert_eq!(state.current_step(), WizardStep::BusinessContext);
    assert_eq!(state.session.value("companyName"), Some(FieldValue::Text(String::new())));
}

#[test]
fn test_reset_clears_stored_drafts() {
    let drafts = TestDrafts::new();
    let mut store = drafts.store();
    write_record(&mut store, &complete_business()).unwrap();

    assert_eq!(clear_all(&mut store).unwrap(), 1);
    let state = drafts.state();
    assert_eq!(state.session.company_name(), "");
}

// ABOUTME: Behavioral tests for walking the wizard end to end
//
// Continue is gated on validation (and the NDA on review), Back never is,
// and the stepper only reaches completed steps.

use super::fixtures::TestDrafts;
use scopewise::app::{App, AppEvent, EventHandler, NotificationType};
use scopewise::wizard::{FeedbackVariant, VisualState, WizardStep};

#[test]
fn test_empty_step_blocks_continue_with_summary() {
    let drafts = TestDrafts::new();
    let mut state = drafts.state();

    EventHandler::process_event(AppEvent::Continue, &mut state);

    assert_eq!(state.current_step(), WizardStep::BusinessContext);
    let feedback = state.feedback.as_ref().unwrap();
    assert_eq!(feedback.variant, FeedbackVariant::Summary);
    assert!(feedback.errors.iter().any(|e| e.field == "Company Name"));
}

#[test]
fn test_complete_drafts_walk_to_review() {
    let drafts = TestDrafts::new();
    drafts.seed_complete();
    let mut state = drafts.state();

    for expected in [
        WizardStep::EngagementPreferences,
        WizardStep::EnvironmentOverview,
        WizardStep::AssetScoping,
        WizardStep::Review,
    ] {
        EventHandler::process_event(AppEvent::Continue, &mut state);
        assert_eq!(state.current_step(), expected);
        assert!(state.feedback.is_none());
    }

    assert_eq!(state.session.visual_state(0), VisualState::Completed);
    assert_eq!(state.session.visual_state(4), VisualState::Current);
    assert_eq!(state.session.visual_state(5), VisualState::Upcoming);
}

#[test]
fn test_review_requires_nda_then_submits() {
    let drafts = TestDrafts::new();
    let mut state = drafts.state();
    state.open_at(WizardStep::Review);

    EventHandler::process_event(AppEvent::Continue, &mut state);
    assert_eq!(state.current_step(), WizardStep::Review);
    assert_eq!(state.feedback.as_ref().map(|f| f.variant), Some(FeedbackVariant::Toast));

    EventHandler::process_event(AppEvent::ToggleNda, &mut state);
    assert!(state.feedback.is_none());
    EventHandler::process_event(AppEvent::Continue, &mut state);

    assert_eq!(state.current_step(), WizardStep::Submit);
    let submission = state.session.submission().unwrap();
    assert!(submission.reference.starts_with("PT-"));
    assert!(state
        .get_current_notifications()
        .iter()
        .any(|n| n.notification_type == NotificationType::Success));
}

#[test]
fn test_back_and_stepper_jump() {
    let drafts = TestDrafts::new();
    drafts.seed_complete();
    let mut state = drafts.state();
    EventHandler::process_event(AppEvent::Continue, &mut state);
    EventHandler::process_event(AppEvent::Continue, &mut state);
    assert_eq!(state.current_step(), WizardStep::EnvironmentOverview);

    // Forward jumps are refused
    EventHandler::process_event(AppEvent::JumpToStep(4), &mut state);
    assert_eq!(state.current_step(), WizardStep::EnvironmentOverview);

    EventHandler::process_event(AppEvent::JumpToStep(0), &mut state);
    assert_eq!(state.current_step(), WizardStep::BusinessContext);

    EventHandler::process_event(AppEvent::Back, &mut state);
    assert_eq!(state.current_step(), WizardStep::BusinessContext);
}

#[tokio::test]
async fn test_download_writes_document_for_company() {
    let drafts = TestDrafts::new();
    drafts.seed_complete();
    let mut state = drafts.state();
    state.open_at(WizardStep::Submit);

    EventHandler::process_event(AppEvent::DownloadDocument, &mut state);
    assert!(state.busy.is_some());

    let mut app = App::with_state(state);
    app.tick().await.unwrap();

    assert!(app.state.busy.is_none());
    let path = app.state.last_export.clone().unwrap();
    assert!(path.starts_with(drafts.dir.path().join("exports")));
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("PenTest_Questionnaire_Acme_Corp_"));
    assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
}

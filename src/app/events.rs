// ABOUTME: Event handling system for keyboard input and app actions

use crate::app::state::{AppState, AsyncAction, TextInput};
use crate::wizard::WizardStep;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    ToggleHelp,
    // Form navigation
    NextField,
    PreviousField,
    NextOption,
    PreviousOption,
    Activate,
    RemoveEntry,
    // Text editing
    EditInput(char),
    EditNewline,
    EditBackspace,
    EditDelete,
    EditCursorLeft,
    EditCursorRight,
    EditCursorHome,
    EditCursorEnd,
    EditCommit,
    EditCancel,
    // Wizard navigation
    Continue,
    Back,
    SaveDraft,
    JumpToStep(usize),
    DismissFeedback,
    // Review page
    ToggleSection,
    EditSection,
    ToggleNda,
    ToggleAuditConsent,
    ToggleTerms,
    GeneratePreview,
    // Submit page
    DownloadDocument,
    EmailDocument,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key_event.code, KeyCode::Char('c'))
        {
            return Some(AppEvent::Quit);
        }

        if state.help_visible {
            return match key_event.code {
                KeyCode::Char('?') | KeyCode::Esc => Some(AppEvent::ToggleHelp),
                _ => None,
            };
        }

        // Typing goes to the edit buffer first
        if state.editor.is_some() {
            return Self::handle_edit_keys(key_event);
        }

        if let KeyCode::Char('?') = key_event.code {
            return Some(AppEvent::ToggleHelp);
        }

        // Stepper shortcuts: 1-6
        if let KeyCode::Char(c @ '1'..='6') = key_event.code {
            let index = c as usize - '1' as usize;
            return Some(AppEvent::JumpToStep(index));
        }

        match state.current_step() {
            WizardStep::Review => Self::handle_review_keys(key_event),
            WizardStep::Submit => Self::handle_submit_keys(key_event),
            _ => Self::handle_form_keys(key_event),
        }
    }

    fn handle_edit_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Enter if key_event.modifiers.contains(KeyModifiers::ALT) => Some(AppEvent::EditNewline),
            KeyCode::Enter => Some(AppEvent::EditCommit),
            KeyCode::Esc => Some(AppEvent::EditCancel),
            KeyCode::Backspace => Some(AppEvent::EditBackspace),
            KeyCode::Delete => Some(AppEvent::EditDelete),
            KeyCode::Left => Some(AppEvent::EditCursorLeft),
            KeyCode::Right => Some(AppEvent::EditCursorRight),
            KeyCode::Home => Some(AppEvent::EditCursorHome),
            KeyCode::End => Some(AppEvent::EditCursorEnd),
            KeyCode::Char(c) => Some(AppEvent::EditInput(c)),
            _ => None,
        }
    }

    fn handle_form_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Quit),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => Some(AppEvent::NextField),
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => Some(AppEvent::PreviousField),
            KeyCode::Right | KeyCode::Char('l') => Some(AppEvent::NextOption),
            KeyCode::Left | KeyCode::Char('h') => Some(AppEvent::PreviousOption),
            KeyCode::Enter | KeyCode::Char(' ') => Some(AppEvent::Activate),
            KeyCode::Delete | KeyCode::Char('d') => Some(AppEvent::RemoveEntry),
            KeyCode::Char('n') | KeyCode::PageDown => Some(AppEvent::Continue),
            KeyCode::Char('b') | KeyCode::PageUp => Some(AppEvent::Back),
            KeyCode::Char('s') => Some(AppEvent::SaveDraft),
            KeyCode::Char('x') => Some(AppEvent::DismissFeedback),
            _ => None,
        }
    }

    fn handle_review_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Quit),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => Some(AppEvent::NextField),
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => Some(AppEvent::PreviousField),
            KeyCode::Enter | KeyCode::Char(' ') => Some(AppEvent::ToggleSection),
            KeyCode::Char('e') => Some(AppEvent::EditSection),
            KeyCode::Char('a') => Some(AppEvent::ToggleNda),
            KeyCode::Char('c') => Some(AppEvent::ToggleAuditConsent),
            KeyCode::Char('t') => Some(AppEvent::ToggleTerms),
            KeyCode::Char('p') => Some(AppEvent::GeneratePreview),
            KeyCode::Char('s') => Some(AppEvent::SaveDraft),
            KeyCode::Char('n') | KeyCode::PageDown => Some(AppEvent::Continue),
            KeyCode::Char('b') | KeyCode::PageUp => Some(AppEvent::Back),
            KeyCode::Char('x') => Some(AppEvent::DismissFeedback),
            _ => None,
        }
    }

    fn handle_submit_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Quit),
            KeyCode::Char('d') | KeyCode::Enter => Some(AppEvent::DownloadDocument),
            KeyCode::Char('m') => Some(AppEvent::EmailDocument),
            KeyCode::Char('b') | KeyCode::PageUp => Some(AppEvent::Back),
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        debug!(?event, "Processing event");
        match event {
            AppEvent::Quit => state.quit(),
            AppEvent::ToggleHelp => state.toggle_help(),
            AppEvent::NextField => state.next_field(),
            AppEvent::PreviousField => state.previous_field(),
            AppEvent::NextOption => state.next_option(),
            AppEvent::PreviousOption => state.previous_option(),
            AppEvent::Activate => state.activate_field(),
            AppEvent::RemoveEntry => state.remove_entry(),
            AppEvent::EditInput(c) => state.edit_input(c),
            AppEvent::EditNewline => state.edit_newline(),
            AppEvent::EditBackspace => state.edit_backspace(),
            AppEvent::EditDelete => state.edit_delete(),
            AppEvent::EditCursorLeft => state.edit_cursor(TextInput::left),
            AppEvent::EditCursorRight => state.edit_cursor(TextInput::right),
            AppEvent::EditCursorHome => state.edit_cursor(TextInput::home),
            AppEvent::EditCursorEnd => state.edit_cursor(TextInput::end),
            AppEvent::EditCommit => state.commit_edit(),
            AppEvent::EditCancel => state.cancel_edit(),
            AppEvent::Continue => state.continue_forward(),
            AppEvent::Back => state.go_back(),
            AppEvent::SaveDraft => state.save_draft(),
            AppEvent::JumpToStep(index) => state.jump_to(index),
            AppEvent::DismissFeedback => state.dismiss_feedback(),
            AppEvent::ToggleSection => state.toggle_section(),
            AppEvent::EditSection => state.edit_section(),
            AppEvent::ToggleNda => state.toggle_nda(),
            AppEvent::ToggleAuditConsent => state.toggle_audit_consent(),
            AppEvent::ToggleTerms => state.toggle_terms(),
            AppEvent::GeneratePreview => state.generate_preview(),
            AppEvent::DownloadDocument => state.queue(AsyncAction::DownloadDocument),
            AppEvent::EmailDocument => state.queue(AsyncAction::EmailDocument),
        }
    }
}

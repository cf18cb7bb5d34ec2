// ABOUTME: Application state for the questionnaire TUI
// Wraps the wizard session with focus, text editing, notifications and queued async actions

use chrono::Local;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::wizard::export::SUBMITTED_TOAST;
use crate::wizard::review::PREVIEW_MESSAGE;
use crate::wizard::{
    DraftStore, FeedbackVariant, FieldDef, FieldError, FieldInput, FieldKind, FieldValue,
    FileCandidate, FileDraftStore, ValidationError, ValidationFeedback, WizardSession, WizardStep,
};

/// Simulated save on the review page
pub const REVIEW_SAVE_DELAY: Duration = Duration::from_millis(1000);

/// Single-line edit buffer with a character cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    buffer: String,
    /// Cursor position in characters
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing text with the cursor at the end
    pub fn from_text(text: &str) -> Self {
        Self {
            buffer: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_pos)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.buffer.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.buffer.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.buffer.chars().count() {
            let at = self.byte_index(self.cursor);
            self.buffer.remove(at);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.cursor < self.buffer.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.buffer.chars().count();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }
}

/// Notification system for TUI messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationType {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub notification_type: NotificationType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Notification {
    pub fn success(message: String) -> Self {
        Self {
            message,
            notification_type: NotificationType::Success,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            message,
            notification_type: NotificationType::Error,
            created_at: Instant::now(),
            duration: Duration::from_secs(5),
        }
    }

    pub fn info(message: String) -> Self {
        Self {
            message,
            notification_type: NotificationType::Info,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn warning(message: String) -> Self {
        Self {
            message,
            notification_type: NotificationType::Warning,
            created_at: Instant::now(),
            duration: Duration::from_secs(4),
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }
}

/// Work that needs the async runtime, picked up on the next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsyncAction {
    SaveReviewDraft,
    DownloadDocument,
    EmailDocument,
}

impl AsyncAction {
    /// Activity line shown while the action runs
    pub fn busy_label(&self) -> &'static str {
        match self {
            Self::SaveReviewDraft => "Saving draft...",
            Self::DownloadDocument => "Generating PDF...",
            Self::EmailDocument => "Sending email...",
        }
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub session: WizardSession,
    pub should_quit: bool,
    pub help_visible: bool,
    /// Focused field on form pages, focused section on the review page
    pub focus: usize,
    /// Highlighted option of a choice, multi-choice or rating field
    pub option_cursor: usize,
    /// Highlighted item of a list or attachment field
    pub entry_cursor: usize,
    /// Edit buffer while a text field is being typed into
    pub editor: Option<TextInput>,
    pub feedback: Option<ValidationFeedback>,
    /// Review sections currently expanded
    pub expanded_sections: BTreeSet<usize>,
    pub pending_async_action: Option<AsyncAction>,
    pub busy: Option<&'static str>,
    pub notifications: Vec<Notification>,
    /// Last document written by the download action
    pub last_export: Option<PathBuf>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Box<dyn DraftStore>) -> Self {
        let session = WizardSession::new(store, config.session_settings());
        Self {
            config,
            session,
            should_quit: false,
            help_visible: false,
            focus: 0,
            option_cursor: 0,
            entry_cursor: 0,
            editor: None,
            feedback: None,
            expanded_sections: BTreeSet::from([0]),
            pending_async_action: None,
            busy: None,
            notifications: Vec::new(),
            last_export: None,
        }
    }

    /// State backed by draft files in the configured directory
    pub fn from_config(config: AppConfig) -> Self {
        let store = FileDraftStore::new(config.storage.drafts_dir.clone());
        info!(dir = %store.dir().display(), "Using draft directory");
        Self::new(config, Box::new(store))
    }

    pub fn current_step(&self) -> WizardStep {
        self.session.current_step()
    }

    /// Open directly on a step, bypassing gating
    pub fn open_at(&mut self, step: WizardStep) {
        self.session.open_at(step);
        self.reset_focus();
    }

    pub fn quit(&mut self) {
        self.session.flush_pending(Instant::now());
        self.should_quit = true;
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    fn reset_focus(&mut self) {
        self.focus = 0;
        self.option_cursor = 0;
        self.entry_cursor = 0;
        self.editor = None;
        self.feedback = None;
    }

    // ------------------------------------------------------------------
    // Form fields
    // ------------------------------------------------------------------

    pub fn fields(&self) -> Vec<FieldDef> {
        self.session.fields()
    }

    pub fn focused_field(&self) -> Option<FieldDef> {
        self.fields().into_iter().nth(self.focus)
    }

    /// Keep the cursors inside the page after fields appear or disappear
    fn clamp_focus(&mut self) {
        let count = self.fields().len();
        if count == 0 {
            self.focus = 0;
        } else if self.focus >= count {
            self.focus = count - 1;
        }
        if let Some(field) = self.focused_field() {
            let options = field.kind.options().len();
            if options > 0 && self.option_cursor >= options {
                self.option_cursor = options - 1;
            }
            let entries = match self.session.value(&field.key) {
                Some(FieldValue::Entries(items)) => items.len(),
                _ => 0,
            };
            if self.entry_cursor >= entries {
                self.entry_cursor = entries.saturating_sub(1);
            }
        }
    }

    /// Option cursor starts on the current selection
    fn sync_option_cursor(&mut self) {
        self.option_cursor = 0;
        self.entry_cursor = 0;
        let Some(field) = self.focused_field() else { return };
        let options = field.kind.options();
        let position = match (field.kind, self.session.value(&field.key)) {
            (FieldKind::Choice(_), Some(FieldValue::Selected(value))) => {
                options.iter().position(|c| c.value == value)
            }
            (FieldKind::Rating(_), Some(FieldValue::Rating(rating))) if rating > 0 => {
                Some(usize::from(rating) - 1)
            }
            _ => None,
        };
        self.option_cursor = position.unwrap_or(0);
    }

    pub fn next_field(&mut self) {
        match self.current_step() {
            WizardStep::Review => {
                let sections = self.session.review().sections.len();
                if sections > 0 {
                    self.focus = (self.focus + 1) % sections;
                }
            }
            WizardStep::Submit => {}
            _ => {
                let count = self.fields().len();
                if count > 0 {
                    self.focus = (self.focus + 1) % count;
                    self.sync_option_cursor();
                }
            }
        }
    }

    pub fn previous_field(&mut self) {
        match self.current_step() {
            WizardStep::Review => {
                let sections = self.session.review().sections.len();
                if sections > 0 {
                    self.focus = (self.focus + sections - 1) % sections;
                }
            }
            WizardStep::Submit => {}
            _ => {
                let count = self.fields().len();
                if count > 0 {
                    self.focus = (self.focus + count - 1) % count;
                    self.sync_option_cursor();
                }
            }
        }
    }

    /// Move across options, or across list items on list and attachment fields
    pub fn next_option(&mut self) {
        let Some(field) = self.focused_field() else { return };
        let options = field.kind.options().len();
        if options > 0 {
            self.option_cursor = (self.option_cursor + 1).min(options - 1);
        } else if let Some(FieldValue::Entries(items)) = self.session.value(&field.key) {
            if !items.is_empty() {
                self.entry_cursor = (self.entry_cursor + 1).min(items.len() - 1);
            }
        }
    }

    pub fn previous_option(&mut self) {
        let Some(field) = self.focused_field() else { return };
        if field.kind.options().is_empty() {
            self.entry_cursor = self.entry_cursor.saturating_sub(1);
        } else {
            self.option_cursor = self.option_cursor.saturating_sub(1);
        }
    }

    /// Space/Enter on the focused field: pick, toggle, rate, flip or start typing
    pub fn activate_field(&mut self) {
        let Some(field) = self.focused_field() else { return };
        let input = match field.kind {
            FieldKind::Choice(options) | FieldKind::MultiChoice(options) => {
                match options.get(self.option_cursor) {
                    Some(choice) => FieldInput::Pick(choice.value.to_string()),
                    None => return,
                }
            }
            FieldKind::Rating(options) => {
                if self.option_cursor >= options.len() {
                    return;
                }
                FieldInput::Rate(self.option_cursor as u8 + 1)
            }
            FieldKind::Checkbox => {
                let current = matches!(self.session.value(&field.key), Some(FieldValue::Flag(true)));
                FieldInput::Flag(!current)
            }
            _ => {
                self.begin_edit();
                return;
            }
        };
        self.apply_input(&field, input);
    }

    /// Open the edit buffer on a text, list or attachment field
    pub fn begin_edit(&mut self) {
        let Some(field) = self.focused_field() else { return };
        if !field.kind.takes_text() {
            return;
        }
        let initial = match (field.kind, self.session.value(&field.key)) {
            (FieldKind::Entries { .. } | FieldKind::Attachment(_), _) => String::new(),
            (_, Some(FieldValue::Text(text))) => text,
            _ => String::new(),
        };
        debug!(field = %field.key, "Editing field");
        self.editor = Some(TextInput::from_text(&initial));
    }

    fn live_edit(&self) -> Option<FieldDef> {
        self.focused_field()
            .filter(|f| matches!(f.kind, FieldKind::Text | FieldKind::Multiline | FieldKind::Date | FieldKind::Currency))
    }

    /// Plain text fields follow the buffer on every keystroke
    fn push_live_text(&mut self) {
        let (Some(field), Some(editor)) = (self.live_edit(), self.editor.as_ref()) else {
            return;
        };
        let input = FieldInput::Text(editor.value().to_string());
        self.apply_input(&field, input);
    }

    pub fn edit_input(&mut self, c: char) {
        if let Some(editor) = self.editor.as_mut() {
            editor.insert(c);
        }
        self.push_live_text();
    }

    /// Line break, multi-line fields only
    pub fn edit_newline(&mut self) {
        if matches!(self.focused_field().map(|f| f.kind), Some(FieldKind::Multiline)) {
            self.edit_input('\n');
        }
    }

    pub fn edit_backspace(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            editor.backspace();
        }
        self.push_live_text();
    }

    pub fn edit_delete(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            editor.delete();
        }
        self.push_live_text();
    }

    pub fn edit_cursor(&mut self, movement: fn(&mut TextInput)) {
        if let Some(editor) = self.editor.as_mut() {
            movement(editor);
        }
    }

    /// Enter while editing: lists add the item, attachment slots read the file
    pub fn commit_edit(&mut self) {
        let (Some(field), Some(editor)) = (self.focused_field(), self.editor.take()) else {
            return;
        };
        let text = editor.value().trim().to_string();
        match field.kind {
            FieldKind::Entries { .. } => {
                if !text.is_empty() && self.apply_input(&field, FieldInput::Add(text)) {
                    if let Some(FieldValue::Entries(items)) = self.session.value(&field.key) {
                        self.entry_cursor = items.len().saturating_sub(1);
                    }
                }
            }
            FieldKind::Attachment(_) => {
                if !text.is_empty() {
                    self.attach_file(&field, Path::new(&text));
                }
            }
            _ => {}
        }
        self.clamp_focus();
    }

    pub fn cancel_edit(&mut self) {
        self.editor = None;
    }

    fn attach_file(&mut self, field: &FieldDef, path: &Path) {
        let file = match FileCandidate::from_path(path) {
            Ok(file) => file,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read upload");
                self.add_error_notification(e.to_string());
                return;
            }
        };
        let name = file.name.clone();
        let input = FieldInput::Attach {
            file,
            max_bytes: self.config.uploads.max_file_bytes,
        };
        if self.apply_input(field, input) {
            info!(field = %field.key, file = %name, "File attached");
            self.add_success_notification(format!("Attached {name}"));
        }
    }

    /// Remove the highlighted list item or attachment
    pub fn remove_entry(&mut self) {
        let Some(field) = self.focused_field() else { return };
        let input = match field.kind {
            FieldKind::Entries { .. } => FieldInput::Remove(self.entry_cursor),
            FieldKind::Attachment(_) => FieldInput::Detach(Some(self.entry_cursor)),
            _ => return,
        };
        let has_items = matches!(self.session.value(&field.key), Some(FieldValue::Entries(items)) if !items.is_empty());
        if has_items && self.apply_input(&field, input) {
            self.clamp_focus();
        }
    }

    /// Apply an edit; refusals become error notifications
    fn apply_input(&mut self, field: &FieldDef, input: FieldInput) -> bool {
        match self.session.apply(Instant::now(), &field.key, input) {
            Ok(()) => {
                self.refresh_feedback();
                self.clamp_focus();
                true
            }
            Err(FieldError::Upload(e)) => {
                warn!(field = %field.key, error = %e, "Upload rejected");
                self.add_error_notification(e.to_string());
                false
            }
            Err(e) => {
                warn!(field = %field.key, error = %e, "Edit rejected");
                self.add_error_notification(e.to_string());
                false
            }
        }
    }

    /// Drop feedback entries the user has fixed since Continue was pressed
    fn refresh_feedback(&mut self) {
        let current = self.session.validate_current();
        if let Some(feedback) = self.feedback.as_mut() {
            if feedback.variant != FeedbackVariant::Toast {
                feedback.retain_still_failing(&current);
            }
        }
    }

    /// Inline message for a field, once Continue has reported it
    pub fn field_error(&self, field: &FieldDef) -> Option<&ValidationError> {
        let feedback = self.feedback.as_ref()?;
        if feedback.variant == FeedbackVariant::Toast {
            return None;
        }
        feedback.errors.iter().find(|e| e.field == field.label)
    }

    /// Summary panel becomes inline markers, inline markers go away
    pub fn dismiss_feedback(&mut self) {
        let Some(feedback) = self.feedback.as_mut() else { return };
        match feedback.variant {
            FeedbackVariant::Summary => feedback.variant = FeedbackVariant::Inline,
            FeedbackVariant::Inline | FeedbackVariant::Toast => self.feedback = None,
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn continue_forward(&mut self) {
        let now = Instant::now();
        let from = self.current_step();
        match self.session.continue_forward(now) {
            Ok(step) if step != from => {
                self.reset_focus();
                if step == WizardStep::Submit {
                    self.add_success_notification("Questionnaire submitted".to_string());
                }
            }
            Ok(_) => {}
            Err(errors) => {
                info!(step = from.path(), errors = errors.len(), "Continue blocked by validation");
                let variant = if from == WizardStep::Review {
                    FeedbackVariant::Toast
                } else {
                    FeedbackVariant::Summary
                };
                self.feedback = Some(ValidationFeedback::new(
                    errors,
                    variant,
                    now,
                    self.config.toast_duration(),
                ));
            }
        }
    }

    pub fn go_back(&mut self) {
        let from = self.current_step();
        let to = self.session.go_back(Instant::now());
        if to != from {
            self.reset_focus();
        }
    }

    /// Stepper jump by position; only completed steps are reachable
    pub fn jump_to(&mut self, index: usize) {
        let Some(target) = WizardStep::from_index(index) else { return };
        match self.session.jump_to(Instant::now(), target) {
            Ok(step) => {
                if step != target {
                    return;
                }
                self.reset_focus();
            }
            Err(e) => {
                debug!(error = %e, "Jump refused");
                self.add_warning_notification(format!("Complete the current step before opening {}", target.label()));
            }
        }
    }

    pub fn save_draft(&mut self) {
        let now = Instant::now();
        match self.current_step() {
            WizardStep::Review => {
                self.session.begin_review_save(now);
                self.queue(AsyncAction::SaveReviewDraft);
            }
            WizardStep::Submit => {}
            _ => {
                if let Err(e) = self.session.save_draft(now) {
                    error!(error = %e, "Draft save failed");
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Review and submit
    // ------------------------------------------------------------------

    pub fn toggle_section(&mut self) {
        if !self.expanded_sections.remove(&self.focus) {
            self.expanded_sections.insert(self.focus);
        }
    }

    /// Edit action of the focused review section
    pub fn edit_section(&mut self) {
        let review = self.session.review();
        let Some(section) = review.sections.get(self.focus) else { return };
        self.jump_to(section.step.index());
    }

    pub fn toggle_nda(&mut self) {
        self.session.legal.toggle_nda();
        if self.session.legal.can_submit() {
            self.feedback = None;
        }
    }

    pub fn toggle_audit_consent(&mut self) {
        self.session.legal.toggle_audit_consent();
    }

    pub fn toggle_terms(&mut self) {
        self.session.legal.toggle_terms();
    }

    pub fn generate_preview(&mut self) {
        info!("Preview generated");
        let notification =
            Notification::info(PREVIEW_MESSAGE.to_string()).with_duration(self.config.preview_toast());
        self.add_notification(notification);
    }

    pub fn queue(&mut self, action: AsyncAction) {
        if self.pending_async_action.is_some() || self.busy.is_some() {
            debug!(?action, "Ignoring action while another one runs");
            return;
        }
        self.busy = Some(action.busy_label());
        self.pending_async_action = Some(action);
    }

    pub async fn process_async_action(&mut self) -> anyhow::Result<()> {
        let Some(action) = self.pending_async_action.take() else {
            return Ok(());
        };
        info!(?action, "Processing async action");
        let result = match action {
            AsyncAction::SaveReviewDraft => {
                tokio::time::sleep(REVIEW_SAVE_DELAY).await;
                self.session.finish_review_save(Instant::now());
                Ok(())
            }
            AsyncAction::DownloadDocument => {
                tokio::time::sleep(self.config.simulated_work()).await;
                self.download_document()
            }
            AsyncAction::EmailDocument => {
                tokio::time::sleep(self.config.simulated_work()).await;
                info!(email = %self.config.consultant.email, "Email delivery initiated");
                self.add_success_notification(format!(
                    "Questionnaire sent to {}",
                    self.config.consultant.email
                ));
                Ok(())
            }
        };
        self.busy = None;
        result
    }

    fn download_document(&mut self) -> anyhow::Result<()> {
        let dir = self.config.export_dir();
        let generated_at = Local::now();
        let submission = self.session.ensure_submission(generated_at);
        match submission.write_document(&dir, generated_at) {
            Ok(path) => {
                info!(path = %path.display(), "PDF download completed");
                self.add_success_notification(SUBMITTED_TOAST.to_string());
                self.last_export = Some(path);
            }
            Err(e) => {
                error!(error = %e, "PDF download failed");
                self.add_error_notification(e.to_string());
            }
        }
        Ok(())
    }

    /// Hide feedback whose toast timer has run out
    pub fn expire_feedback(&mut self, now: Instant) {
        if self.feedback.as_ref().is_some_and(|f| !f.is_visible(now)) {
            self.feedback = None;
        }
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    pub fn add_notification(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn add_success_notification(&mut self, message: String) {
        self.add_notification(Notification::success(message));
    }

    pub fn add_error_notification(&mut self, message: String) {
        self.add_notification(Notification::error(message));
    }

    pub fn add_info_notification(&mut self, message: String) {
        self.add_notification(Notification::info(message));
    }

    pub fn add_warning_notification(&mut self, message: String) {
        self.add_notification(Notification::warning(message));
    }

    pub fn cleanup_expired_notifications(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    pub fn get_current_notifications(&self) -> Vec<&Notification> {
        self.notifications.iter().filter(|n| !n.is_expired()).collect()
    }
}

pub struct App {
    pub state: AppState,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::from_config(config),
        }
    }

    pub fn with_state(state: AppState) -> Self {
        Self { state }
    }

    pub async fn tick(&mut self) -> anyhow::Result<()> {
        let now = Instant::now();
        self.state.cleanup_expired_notifications();
        self.state.expire_feedback(now);
        self.state.session.tick(now);

        if let Err(e) = self.state.process_async_action().await {
            warn!("Error processing async action: {}", e);
            self.state.busy = None;
            self.state.pending_async_action = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{MemoryDraftStore, SaveStatus};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.timing.simulated_work_ms = 0;
        config
    }

    fn state() -> AppState {
        AppState::new(config(), Box::new(MemoryDraftStore::new()))
    }

    fn focus_key(state: &mut AppState, key: &str) {
        state.focus = state
            .fields()
            .iter()
            .position(|f| f.key == key)
            .unwrap_or_else(|| panic!("no field {key}"));
        state.sync_option_cursor();
    }

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInput::from_text("héllo");
        assert_eq!(input.cursor(), 5);
        input.left();
        input.backspace();
        assert_eq!(input.value(), "hélo");
        input.home();
        input.insert('>');
        input.end();
        input.delete();
        assert_eq!(input.value(), ">hélo");
        assert_eq!(input.cursor(), 5);
    }

    #[test]
    fn test_typing_updates_record_live() {
        let mut state = state();
        focus_key(&mut state, "companyName");
        state.activate_field();
        for c in "Acme".chars() {
            state.edit_input(c);
        }
        assert_eq!(state.session.business.record().company_name, "Acme");
        assert!(state.session.business.has_pending_save());
        state.commit_edit();
        assert!(state.editor.is_none());
    }

    #[test]
    fn test_choice_and_toggle() {
        let mut state = state();
        focus_key(&mut state, "industry");
        state.next_option();
        state.activate_field();
        assert_eq!(state.session.business.record().industry, "Healthcare");

        focus_key(&mut state, "sensitiveDataTypes");
        state.activate_field();
        assert_eq!(state.session.business.record().sensitive_data_types.len(), 1);
        state.activate_field();
        assert!(state.session.business.record().sensitive_data_types.is_empty());
    }

    #[test]
    fn test_continue_failure_shows_summary_then_inline() {
        let mut state = state();
        state.continue_forward();
        let feedback = state.feedback.as_ref().unwrap();
        assert_eq!(feedback.variant, FeedbackVariant::Summary);
        assert_eq!(feedback.errors.len(), 8);

        let company = state.fields()[0].clone();
        assert!(state.field_error(&company).is_some());

        state.dismiss_feedback();
        assert_eq!(state.feedback.as_ref().unwrap().variant, FeedbackVariant::Inline);

        focus_key(&mut state, "companyName");
        state.activate_field();
        state.edit_input('A');
        assert!(state.field_error(&company).is_none());
        assert_eq!(state.feedback.as_ref().unwrap().errors.len(), 7);

        state.dismiss_feedback();
        assert!(state.feedback.is_none());
    }

    #[test]
    fn test_list_entries_add_and_remove() {
        let mut state = state();
        state.open_at(WizardStep::EnvironmentOverview);
        focus_key(&mut state, "integrations");
        state.activate_field();
        for c in "Stripe | high | payments".chars() {
            state.edit_input(c);
        }
        // List fields only change on Enter
        assert!(state.session.environment.record().integrations.is_empty());
        state.commit_edit();
        assert_eq!(state.session.environment.record().integrations.len(), 1);

        state.remove_entry();
        assert!(state.session.environment.record().integrations.is_empty());
    }

    #[test]
    fn test_attachment_too_large_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("diagram.png");
        std::fs::write(&path, vec![0u8; 64]).unwrap();

        let mut config = config();
        config.uploads.max_file_bytes = 16;
        let mut state = AppState::new(config, Box::new(MemoryDraftStore::new()));
        state.open_at(WizardStep::EnvironmentOverview);
        focus_key(&mut state, "uploadedFiles");
        state.activate_field();
        for c in path.display().to_string().chars() {
            state.edit_input(c);
        }
        state.commit_edit();

        assert!(state.session.environment.record().uploaded_files.is_empty());
        let last = state.notifications.last().unwrap();
        assert_eq!(last.notification_type, NotificationType::Error);
    }

    #[test]
    fn test_forward_jump_warns() {
        let mut state = state();
        state.jump_to(3);
        assert_eq!(state.current_step(), WizardStep::BusinessContext);
        assert_eq!(state.notifications[0].notification_type, NotificationType::Warning);
    }

    #[test]
    fn test_review_submit_needs_nda() {
        let mut state = state();
        state.open_at(WizardStep::Review);
        state.continue_forward();
        assert_eq!(state.feedback.as_ref().unwrap().variant, FeedbackVariant::Toast);
        assert_eq!(state.current_step(), WizardStep::Review);

        state.toggle_nda();
        assert!(state.feedback.is_none());
        state.continue_forward();
        assert_eq!(state.current_step(), WizardStep::Submit);
    }

    #[test]
    fn test_edit_section_opens_step() {
        let mut state = state();
        state.open_at(WizardStep::Review);
        state.next_field();
        state.edit_section();
        assert_eq!(state.current_step(), WizardStep::EngagementPreferences);
    }

    #[tokio::test]
    async fn test_download_writes_document() {
        let dir = TempDir::new().unwrap();
        let mut state = state();
        state.config.export.output_dir = Some(dir.path().to_path_buf());
        state.open_at(WizardStep::Submit);

        state.queue(AsyncAction::DownloadDocument);
        assert_eq!(state.busy, Some("Generating PDF..."));
        state.process_async_action().await.unwrap();

        assert!(state.busy.is_none());
        let path = state.last_export.clone().unwrap();
        assert!(path.exists());
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("PenTest_Questionnaire_Client_"));
    }

    #[tokio::test]
    async fn test_review_save_draft_simulated() {
        let mut state = state();
        state.open_at(WizardStep::Review);
        state.save_draft();
        assert_eq!(state.session.save_status(), &SaveStatus::Saving);
        state.process_async_action().await.unwrap();
        assert_eq!(state.session.save_status(), &SaveStatus::Saved);
    }

    #[test]
    fn test_queue_ignores_second_action() {
        let mut state = state();
        state.queue(AsyncAction::EmailDocument);
        state.queue(AsyncAction::DownloadDocument);
        assert_eq!(state.pending_async_action, Some(AsyncAction::EmailDocument));
    }
}

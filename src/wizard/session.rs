// ABOUTME: One questionnaire run: the four step containers, navigation, legal acceptance,
// review content and the submission, all sharing a single draft store

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};
use tracing::info;

use super::autosave::{SaveIndicator, SaveStatus, DEFAULT_DEBOUNCE, DEFAULT_STATUS_RESET};
use super::container::StepContainer;
use super::export::Submission;
use super::form::{FieldDef, FieldError, FieldInput, FieldValue, FormModel};
use super::review::{LegalAgreement, ReviewSource, ReviewSummary, NDA_REQUIRED_NOTE};
use super::step::{NavigationError, Navigator, VisualState, WizardStep};
use super::storage::{DraftStore, StorageError};
use super::uploads::DEFAULT_MAX_UPLOAD_BYTES;
use super::validation::ValidationError;
use crate::models::{AssetScoping, BusinessContext, EngagementPreferences, EnvironmentOverview};

/// Timing and limits applied to a session
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub autosave_debounce: Duration,
    pub save_status_reset: Duration,
    pub review_source: ReviewSource,
    pub max_upload_bytes: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            autosave_debounce: DEFAULT_DEBOUNCE,
            save_status_reset: DEFAULT_STATUS_RESET,
            review_source: ReviewSource::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

pub struct WizardSession {
    store: Box<dyn DraftStore>,
    navigator: Navigator,
    settings: SessionSettings,
    pub business: StepContainer<BusinessContext>,
    pub engagement: StepContainer<EngagementPreferences>,
    pub environment: StepContainer<EnvironmentOverview>,
    pub assets: StepContainer<AssetScoping>,
    pub legal: LegalAgreement,
    /// Simulated save on the review page
    review_save: SaveIndicator,
    submission: Option<Submission>,
}

impl WizardSession {
    /// Load every stored draft and start on the first step
    pub fn new(store: Box<dyn DraftStore>, settings: SessionSettings) -> Self {
        let (debounce, reset) = (settings.autosave_debounce, settings.save_status_reset);
        let mut session = Self {
            store,
            navigator: Navigator::new(),
            business: StepContainer::new(debounce, reset),
            engagement: StepContainer::new(debounce, reset),
            environment: StepContainer::new(debounce, reset),
            assets: StepContainer::new(debounce, reset),
            legal: LegalAgreement::default(),
            review_save: SaveIndicator::new(reset),
            submission: None,
            settings,
        };
        session.business.mount(session.store.as_ref());
        session.engagement.mount(session.store.as_ref());
        session.environment.mount(session.store.as_ref());
        session.assets.mount(session.store.as_ref());
        session
    }

    /// Direct entry on a step, bypassing gating
    pub fn open_at(&mut self, step: WizardStep) {
        self.navigator = Navigator::at(step);
        if step == WizardStep::Submit && self.submission.is_none() {
            self.submission = Some(Submission::new(&self.company_name(), Local::now()));
        }
    }

    pub fn current_step(&self) -> WizardStep {
        self.navigator.current()
    }

    pub fn visual_state(&self, index: usize) -> VisualState {
        self.navigator.visual_state(index)
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn store(&self) -> &dyn DraftStore {
        self.store.as_ref()
    }

    /// The form behind the current step, if it is a form step
    pub fn page(&self) -> Option<&dyn FormModel> {
        match self.current_step() {
            WizardStep::BusinessContext => Some(self.business.record()),
            WizardStep::EngagementPreferences => Some(self.engagement.record()),
            WizardStep::EnvironmentOverview => Some(self.environment.record()),
            WizardStep::AssetScoping => Some(self.assets.record()),
            WizardStep::Review | WizardStep::Submit => None,
        }
    }

    pub fn fields(&self) -> Vec<FieldDef> {
        self.page().map(FormModel::fields).unwrap_or_default()
    }

    pub fn value(&self, key: &str) -> Option<FieldValue> {
        self.page().and_then(|page| page.value(key))
    }

    pub fn hints(&self) -> Vec<String> {
        self.page().map(FormModel::hints).unwrap_or_default()
    }

    /// Apply an edit to the current page; attachments get the configured ceiling
    pub fn apply(&mut self, now: Instant, key: &str, input: FieldInput) -> Result<(), FieldError> {
        let input = match input {
            FieldInput::Attach { file, .. } => FieldInput::Attach {
                file,
                max_bytes: self.settings.max_upload_bytes,
            },
            other => other,
        };
        match self.current_step() {
            WizardStep::BusinessContext => self.business.apply(now, key, input),
            WizardStep::EngagementPreferences => self.engagement.apply(now, key, input),
            WizardStep::EnvironmentOverview => self.environment.apply(now, key, input),
            WizardStep::AssetScoping => self.assets.apply(now, key, input),
            WizardStep::Review | WizardStep::Submit => Err(FieldError::UnknownField(key.to_string())),
        }
    }

    pub fn validate_current(&self) -> Vec<ValidationError> {
        match self.current_step() {
            WizardStep::BusinessContext => self.business.validate(),
            WizardStep::EngagementPreferences => self.engagement.validate(),
            WizardStep::EnvironmentOverview => self.environment.validate(),
            WizardStep::AssetScoping => self.assets.validate(),
            WizardStep::Review | WizardStep::Submit => Vec::new(),
        }
    }

    /// Drive the debounced saves of every step
    pub fn tick(&mut self, now: Instant) {
        let store = self.store.as_mut();
        self.business.tick(now, store);
        self.engagement.tick(now, store);
        self.environment.tick(now, store);
        self.assets.tick(now, store);
        self.review_save.tick(now);
    }

    /// Save the current form step right away
    pub fn save_draft(&mut self, now: Instant) -> Result<(), StorageError> {
        let store = self.store.as_mut();
        match self.navigator.current() {
            WizardStep::BusinessContext => self.business.save_draft(now, store),
            WizardStep::EngagementPreferences => self.engagement.save_draft(now, store),
            WizardStep::EnvironmentOverview => self.environment.save_draft(now, store),
            WizardStep::AssetScoping => self.assets.save_draft(now, store),
            WizardStep::Review | WizardStep::Submit => Ok(()),
        }
    }

    pub fn save_status(&self) -> &SaveStatus {
        match self.current_step() {
            WizardStep::BusinessContext => self.business.save_status(),
            WizardStep::EngagementPreferences => self.engagement.save_status(),
            WizardStep::EnvironmentOverview => self.environment.save_status(),
            WizardStep::AssetScoping => self.assets.save_status(),
            WizardStep::Review | WizardStep::Submit => self.review_save.status(),
        }
    }

    pub fn begin_review_save(&mut self, now: Instant) {
        self.review_save.set(SaveStatus::Saving, now);
    }

    pub fn finish_review_save(&mut self, now: Instant) {
        self.review_save.set(SaveStatus::Saved, now);
    }

    /// Continue from the current step. Form steps are gated on validation and
    /// the review step on NDA acceptance.
    pub fn continue_forward(&mut self, now: Instant) -> Result<WizardStep, Vec<ValidationError>> {
        let store = self.store.as_mut();
        let errors = match self.navigator.current() {
            WizardStep::BusinessContext => self.business.try_continue(now, store),
            WizardStep::EngagementPreferences => self.engagement.try_continue(now, store),
            WizardStep::EnvironmentOverview => self.environment.try_continue(now, store),
            WizardStep::AssetScoping => self.assets.try_continue(now, store),
            WizardStep::Review if !self.legal.can_submit() => {
                vec![ValidationError::new("NDA Agreement", NDA_REQUIRED_NOTE)]
            }
            WizardStep::Review => Vec::new(),
            WizardStep::Submit => return Ok(WizardStep::Submit),
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        let from = self.navigator.current();
        let to = self.navigator.advance().unwrap_or(from);
        if to == WizardStep::Submit {
            let submission = Submission::new(&self.company_name(), Local::now());
            info!(reference = %submission.reference, "Questionnaire submitted");
            self.submission = Some(submission);
        }
        info!(from = from.path(), to = to.path(), "Step advanced");
        Ok(to)
    }

    /// Back is never gated; a pending edit is flushed first
    pub fn go_back(&mut self, now: Instant) -> WizardStep {
        self.flush_pending(now);
        self.navigator.go_back().unwrap_or_else(|| self.navigator.current())
    }

    /// Stepper jump, backward only; a pending edit is flushed first
    pub fn jump_to(&mut self, now: Instant, target: WizardStep) -> Result<WizardStep, NavigationError> {
        self.flush_pending(now);
        self.navigator.jump_to(target)
    }

    /// Write every step whose edit is still waiting on the debounce
    pub fn flush_pending(&mut self, now: Instant) {
        let store = self.store.as_mut();
        // Failures already show in the save status
        if self.business.has_pending_save() {
            let _ = self.business.save_draft(now, store);
        }
        if self.engagement.has_pending_save() {
            let _ = self.engagement.save_draft(now, store);
        }
        if self.environment.has_pending_save() {
            let _ = self.environment.save_draft(now, store);
        }
        if self.assets.has_pending_save() {
            let _ = self.assets.save_draft(now, store);
        }
    }

    pub fn company_name(&self) -> String {
        self.business.record().company_name.clone()
    }

    pub fn review(&self) -> ReviewSummary {
        match self.settings.review_source {
            ReviewSource::Sample => ReviewSummary::sample(),
            ReviewSource::Persisted => ReviewSummary::from_records(
                self.business.record(),
                self.engagement.record(),
                self.environment.record(),
                self.assets.record(),
            ),
        }
    }

    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    /// Submission for the download and email actions, created on demand
    pub fn ensure_submission(&mut self, now: DateTime<Local>) -> &Submission {
        let company = self.company_name();
        self.submission.get_or_insert_with(|| Submission::new(&company, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::container::read_record;
    use crate::wizard::storage::MemoryDraftStore;

    fn session() -> WizardSession {
        WizardSession::new(Box::new(MemoryDraftStore::new()), SessionSettings::default())
    }

    #[test]
    fn test_continue_blocked_on_empty_step() {
        let mut s = session();
        let errors = s.continue_forward(Instant::now()).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "Company Name"));
        assert_eq!(s.current_step(), WizardStep::BusinessContext);
    }

    #[test]
    fn test_review_requires_nda() {
        let mut s = session();
        s.open_at(WizardStep::Review);
        assert!(s.continue_forward(Instant::now()).is_err());

        s.legal.toggle_nda();
        assert_eq!(s.continue_forward(Instant::now()), Ok(WizardStep::Submit));
        assert!(s.submission().is_some());
    }

    #[test]
    fn test_attach_uses_configured_ceiling() {
        let settings = SessionSettings {
            max_upload_bytes: 1024,
            ..SessionSettings::default()
        };
        let mut s = WizardSession::new(Box::new(MemoryDraftStore::new()), settings);
        s.open_at(WizardStep::EnvironmentOverview);

        let file = crate::wizard::uploads::FileCandidate::new("diagram.pdf", 4096);
        let result = s.apply(
            Instant::now(),
            "uploadedFiles",
            FieldInput::Attach { file, max_bytes: u64::MAX },
        );
        assert!(matches!(result, Err(FieldError::Upload(_))));
    }

    #[test]
    fn test_forward_jump_refused() {
        let mut s = session();
        assert!(s.jump_to(Instant::now(), WizardStep::AssetScoping).is_err());
        s.open_at(WizardStep::AssetScoping);
        assert_eq!(s.jump_to(Instant::now(), WizardStep::BusinessContext), Ok(WizardStep::BusinessContext));
    }

    #[test]
    fn test_jump_back_writes_the_step_being_left() {
        let mut s = session();
        s.open_at(WizardStep::EngagementPreferences);
        let now = Instant::now();
        s.engagement.update(now, |r| r.budget_range = "custom".into());

        s.jump_to(now, WizardStep::BusinessContext).unwrap();
        assert!(!s.engagement.has_pending_save());
        let saved = read_record::<EngagementPreferences>(s.store.as_ref()).unwrap().unwrap();
        assert_eq!(saved.budget_range, "custom");
    }

    #[test]
    fn test_flush_covers_steps_other_than_current() {
        let mut s = session();
        let now = Instant::now();
        s.assets.update(now, |r| r.scope_data.in_scope = "Public web tier".into());
        assert_eq!(s.current_step(), WizardStep::BusinessContext);

        s.flush_pending(now);
        let saved = read_record::<AssetScoping>(s.store.as_ref()).unwrap().unwrap();
        assert_eq!(saved.scope_data.in_scope, "Public web tier");
    }

    #[test]
    fn test_review_source_selection() {
        let s = session();
        assert_eq!(s.review().company_name, "TechCorp Solutions Inc.");

        let settings = SessionSettings {
            review_source: ReviewSource::Persisted,
            ..SessionSettings::default()
        };
        let s = WizardSession::new(Box::new(MemoryDraftStore::new()), settings);
        assert_eq!(s.review().company_name, "");
    }
}

// ABOUTME: Step container owning one record: loads it on mount, debounces auto-saves,
// writes drafts on demand and gates Continue on validation

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::autosave::{Debouncer, SaveIndicator, SaveStatus};
use super::form::{FieldError, FieldInput, FormModel};
use super::step::WizardStep;
use super::storage::{DraftStore, StorageError};
use super::validation::{Validate, ValidationError};
use crate::models::{AssetScoping, BusinessContext, EngagementPreferences, EnvironmentOverview};

/// A record that backs one form step
pub trait StepRecord:
    Validate + FormModel + Serialize + DeserializeOwned + Default + Clone + Send + 'static
{
    /// Storage key of the draft
    const KEY: &'static str;
    const STEP: WizardStep;

    /// Hook run on the copy about to be written
    fn before_save(&mut self) {}
}

impl StepRecord for BusinessContext {
    const KEY: &'static str = "pentest-business-context";
    const STEP: WizardStep = WizardStep::BusinessContext;
}

impl StepRecord for EngagementPreferences {
    const KEY: &'static str = "engagementPreferences";
    const STEP: WizardStep = WizardStep::EngagementPreferences;
}

impl StepRecord for EnvironmentOverview {
    const KEY: &'static str = "environment-overview-draft";
    const STEP: WizardStep = WizardStep::EnvironmentOverview;
}

impl StepRecord for AssetScoping {
    const KEY: &'static str = "assetScopingData";
    const STEP: WizardStep = WizardStep::AssetScoping;

    fn before_save(&mut self) {
        self.touch();
    }
}

/// Read a stored draft. `Ok(None)` when nothing was saved yet.
pub fn read_record<T: StepRecord>(store: &dyn DraftStore) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.load_raw(T::KEY)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Corrupt {
            key: T::KEY.to_string(),
            source,
        })
}

/// Serialize and write a record under its key
pub fn write_record<T: StepRecord>(store: &mut dyn DraftStore, record: &T) -> Result<(), StorageError> {
    let mut snapshot = record.clone();
    snapshot.before_save();
    let json = serde_json::to_string(&snapshot).map_err(|source| StorageError::Serialize {
        key: T::KEY.to_string(),
        source,
    })?;
    store.save_raw(T::KEY, &json)
}

pub struct StepContainer<T: StepRecord> {
    record: T,
    debouncer: Debouncer,
    indicator: SaveIndicator,
    mounted: bool,
}

impl<T: StepRecord> Default for StepContainer<T> {
    fn default() -> Self {
        Self::new(Debouncer::default().delay(), Duration::from_millis(2000))
    }
}

impl<T: StepRecord> StepContainer<T> {
    pub fn new(debounce: Duration, status_reset: Duration) -> Self {
        Self {
            record: T::default(),
            debouncer: Debouncer::new(debounce),
            indicator: SaveIndicator::new(status_reset),
            mounted: false,
        }
    }

    pub fn record(&self) -> &T {
        &self.record
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn save_status(&self) -> &SaveStatus {
        self.indicator.status()
    }

    pub fn has_pending_save(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Load the stored draft; missing or unreadable drafts start from defaults
    pub fn mount(&mut self, store: &dyn DraftStore) {
        self.record = match read_record::<T>(store) {
            Ok(Some(record)) => {
                debug!(key = T::KEY, "Loaded draft");
                record
            }
            Ok(None) => T::default(),
            Err(e) => {
                warn!(key = T::KEY, error = %e, "Ignoring unreadable draft");
                T::default()
            }
        };
        self.debouncer.cancel();
        self.mounted = true;
    }

    /// Mutate the record and restart the auto-save timer
    pub fn update<R>(&mut self, now: Instant, edit: impl FnOnce(&mut T) -> R) -> R {
        let result = edit(&mut self.record);
        self.debouncer.touch(now);
        result
    }

    /// Apply a form edit; only successful edits schedule a save
    pub fn apply(&mut self, now: Instant, key: &str, input: FieldInput) -> Result<(), FieldError> {
        self.record.apply(key, input)?;
        self.debouncer.touch(now);
        Ok(())
    }

    /// Write once the quiet period has elapsed. Returns true when a write was attempted.
    pub fn tick(&mut self, now: Instant, store: &mut dyn DraftStore) -> bool {
        self.indicator.tick(now);
        if !self.debouncer.fire(now) {
            return false;
        }
        // Failures are already reflected in the save status
        let _ = self.persist(now, store);
        true
    }

    /// Write immediately, cancelling any pending auto-save
    pub fn save_draft(&mut self, now: Instant, store: &mut dyn DraftStore) -> Result<(), StorageError> {
        self.debouncer.cancel();
        self.persist(now, store)
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        self.record.validate()
    }

    /// Validate for Continue. An empty result means the caller may navigate;
    /// any pending edit is flushed first so nothing is lost on the way out.
    pub fn try_continue(&mut self, now: Instant, store: &mut dyn DraftStore) -> Vec<ValidationError> {
        let errors = self.validate();
        if errors.is_empty() {
            if self.debouncer.is_pending() {
                let _ = self.save_draft(now, store);
            }
        } else {
            info!(key = T::KEY, errors = errors.len(), "Continue blocked by validation");
        }
        errors
    }

    fn persist(&mut self, now: Instant, store: &mut dyn DraftStore) -> Result<(), StorageError> {
        self.indicator.set(SaveStatus::Saving, now);
        match write_record(store, &self.record) {
            Ok(()) => {
                self.record.before_save();
                self.indicator.set(SaveStatus::Saved, now);
                debug!(key = T::KEY, "Draft saved");
                Ok(())
            }
            Err(e) => {
                warn!(key = T::KEY, error = %e, "Draft save failed");
                self.indicator.set(SaveStatus::Error(e.to_string()), now);
                Err(e)
            }
        }
    }
}

// ABOUTME: Shared CLI helpers for reading drafts outside the TUI
//
// Every command works against the same file-backed draft store the wizard writes,
// and reports per-step results through `StepReport`.

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use crate::config::AppConfig;
use crate::models::{AssetScoping, BusinessContext, EngagementPreferences, EnvironmentOverview};
use crate::wizard::{read_record, DraftStore, FileDraftStore, StepRecord, Validate, WizardStep};

/// Draft store configured for this machine
pub fn open_store(config: &AppConfig) -> FileDraftStore {
    FileDraftStore::new(config.storage.drafts_dir.clone())
}

/// Steps that own a stored record
pub fn form_steps() -> impl Iterator<Item = WizardStep> {
    WizardStep::all().iter().copied().filter(WizardStep::is_form)
}

/// Accept a route path, a name or a 1-based number
pub fn parse_step(input: &str) -> Result<WizardStep> {
    if let Ok(number) = input.trim().parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(WizardStep::from_index)
            .ok_or_else(|| anyhow!("Step number must be between 1 and {}", WizardStep::total()));
    }
    Ok(WizardStep::parse(input)?)
}

/// Stored state and validation result of one step
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub name: String,
    pub path: String,
    pub key: String,
    pub saved: bool,
    pub valid: bool,
    pub errors: Vec<String>,
}

impl StepReport {
    fn for_record<T: StepRecord>(store: &dyn DraftStore) -> Result<Self> {
        let stored = read_record::<T>(store)
            .with_context(|| format!("Failed to read draft for {}", T::STEP.label()))?;
        let saved = stored.is_some();
        let errors: Vec<String> = stored
            .unwrap_or_default()
            .validate()
            .iter()
            .map(ToString::to_string)
            .collect();
        Ok(Self {
            step: T::STEP.number(),
            name: T::STEP.label().to_string(),
            path: T::STEP.path().to_string(),
            key: T::KEY.to_string(),
            saved,
            valid: errors.is_empty(),
            errors,
        })
    }
}

/// Report for a form step; review and submit have no record
pub fn inspect_step(step: WizardStep, store: &dyn DraftStore) -> Result<StepReport> {
    match step {
        WizardStep::BusinessContext => StepReport::for_record::<BusinessContext>(store),
        WizardStep::EngagementPreferences => StepReport::for_record::<EngagementPreferences>(store),
        WizardStep::EnvironmentOverview => StepReport::for_record::<EnvironmentOverview>(store),
        WizardStep::AssetScoping => StepReport::for_record::<AssetScoping>(store),
        WizardStep::Review | WizardStep::Submit => Err(anyhow!(
            "{} has no stored draft; choose one of steps 1-4",
            step.label()
        )),
    }
}

/// Storage key backing a form step
pub fn draft_key(step: WizardStep) -> Option<&'static str> {
    match step {
        WizardStep::BusinessContext => Some(BusinessContext::KEY),
        WizardStep::EngagementPreferences => Some(EngagementPreferences::KEY),
        WizardStep::EnvironmentOverview => Some(EnvironmentOverview::KEY),
        WizardStep::AssetScoping => Some(AssetScoping::KEY),
        WizardStep::Review | WizardStep::Submit => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::MemoryDraftStore;

    #[test]
    fn test_parse_step_by_number_and_path() {
        assert_eq!(parse_step("2").unwrap(), WizardStep::EngagementPreferences);
        assert_eq!(parse_step("review").unwrap(), WizardStep::Review);
        assert!(parse_step("0").is_err());
        assert!(parse_step("7").is_err());
    }

    #[test]
    fn test_form_steps_are_the_first_four() {
        let steps: Vec<WizardStep> = form_steps().collect();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[3], WizardStep::AssetScoping);
    }

    #[test]
    fn test_inspect_missing_draft() {
        let store = MemoryDraftStore::new();
        let report = inspect_step(WizardStep::BusinessContext, &store).unwrap();
        assert!(!report.saved);
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e.starts_with("Company Name")));
    }

    #[test]
    fn test_inspect_review_is_error() {
        let store = MemoryDraftStore::new();
        assert!(inspect_step(WizardStep::Review, &store).is_err());
        assert_eq!(draft_key(WizardStep::Submit), None);
    }
}

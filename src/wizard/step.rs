// ABOUTME: The six wizard steps, their routes and the gating rules for moving between them

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Cannot jump ahead to {target} from {current}; finish the current step first")]
    ForwardJump { current: String, target: String },

    #[error("Unknown step: {0}")]
    UnknownStep(String),
}

/// Steps of the questionnaire in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WizardStep {
    BusinessContext,
    EngagementPreferences,
    EnvironmentOverview,
    AssetScoping,
    Review,
    Submit,
}

/// How the progress stepper draws a step relative to the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    Completed,
    Current,
    Upcoming,
}

impl WizardStep {
    pub fn all() -> &'static [WizardStep] {
        &[
            Self::BusinessContext,
            Self::EngagementPreferences,
            Self::EnvironmentOverview,
            Self::AssetScoping,
            Self::Review,
            Self::Submit,
        ]
    }

    /// Zero-based position
    pub fn index(&self) -> usize {
        match self {
            Self::BusinessContext => 0,
            Self::EngagementPreferences => 1,
            Self::EnvironmentOverview => 2,
            Self::AssetScoping => 3,
            Self::Review => 4,
            Self::Submit => 5,
        }
    }

    /// 1-indexed for display
    pub fn number(&self) -> usize {
        self.index() + 1
    }

    pub fn total() -> usize {
        Self::all().len()
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::BusinessContext => "/client-business-context",
            Self::EngagementPreferences => "/engagement-preferences",
            Self::EnvironmentOverview => "/environment-overview",
            Self::AssetScoping => "/asset-selection-scoping",
            Self::Review => "/review-edit-summary",
            Self::Submit => "/submit-pdf-download",
        }
    }

    /// Short machine name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::BusinessContext => "business",
            Self::EngagementPreferences => "engagement",
            Self::EnvironmentOverview => "environment",
            Self::AssetScoping => "assets",
            Self::Review => "review",
            Self::Submit => "submit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::BusinessContext => "Business Context",
            Self::EngagementPreferences => "Engagement Scope",
            Self::EnvironmentOverview => "Technical Environment",
            Self::AssetScoping => "Asset Details",
            Self::Review => "Review & Submit",
            Self::Submit => "Complete",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::BusinessContext => "Organization details and objectives",
            Self::EngagementPreferences => "Testing preferences and timeline",
            Self::EnvironmentOverview => "Infrastructure and systems overview",
            Self::AssetScoping => "Specific targets and scope",
            Self::Review => "Verify and finalize questionnaire",
            Self::Submit => "Download and submit",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.path() == path)
    }

    /// Accepts a route (`/environment-overview`), a bare route, or the short name, in any case
    pub fn parse(input: &str) -> Result<Self, NavigationError> {
        let trimmed = input.trim();
        let route = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };
        Self::all()
            .iter()
            .copied()
            .find(|s| s.path().eq_ignore_ascii_case(&route) || s.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| NavigationError::UnknownStep(input.to_string()))
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Steps that own an editable record
    pub fn is_form(&self) -> bool {
        self.index() < Self::Review.index()
    }
}

/// Tracks the current step and enforces the no-skipping-ahead rule
#[derive(Debug, Clone)]
pub struct Navigator {
    current: WizardStep,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            current: WizardStep::BusinessContext,
        }
    }

    /// Open directly on a step, bypassing gating
    pub fn at(step: WizardStep) -> Self {
        Self { current: step }
    }

    pub fn current(&self) -> WizardStep {
        self.current
    }

    pub fn visual_state(&self, index: usize) -> VisualState {
        let current = self.current.index();
        if index < current {
            VisualState::Completed
        } else if index == current {
            VisualState::Current
        } else {
            VisualState::Upcoming
        }
    }

    /// Move to an earlier (or the current) step
    pub fn jump_to(&mut self, target: WizardStep) -> Result<WizardStep, NavigationError> {
        if target.index() > self.current.index() {
            return Err(NavigationError::ForwardJump {
                current: self.current.label().to_string(),
                target: target.label().to_string(),
            });
        }
        self.current = target;
        Ok(target)
    }

    /// Advance one step; callers check validation first
    pub fn advance(&mut self) -> Option<WizardStep> {
        let next = self.current.next()?;
        self.current = next;
        Some(next)
    }

    pub fn go_back(&mut self) -> Option<WizardStep> {
        let previous = self.current.previous()?;
        self.current = previous;
        Some(previous)
    }
}

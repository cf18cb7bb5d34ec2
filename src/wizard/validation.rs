// ABOUTME: Field-level validation results and the three feedback presentations
// A step is valid when its validate() returns an empty list

use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

/// One unmet requirement, reported against a human-readable field label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Pure validation of a step record
pub trait Validate {
    fn validate(&self) -> Vec<ValidationError>;

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Push an error when `satisfied` is false
pub(crate) fn require(
    errors: &mut Vec<ValidationError>,
    satisfied: bool,
    field: &str,
    message: &str,
) {
    if !satisfied {
        errors.push(ValidationError::new(field, message));
    }
}

/// How a list of validation errors is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackVariant {
    /// Plain list under the form
    Inline,
    /// Corner popup that hides itself after a fixed duration
    Toast,
    /// Dismissible panel listing every error
    Summary,
}

/// Toast shows at most this many entries
const TOAST_VISIBLE_ENTRIES: usize = 3;

/// A rendered batch of validation errors with its own hide timer
#[derive(Debug, Clone)]
pub struct ValidationFeedback {
    pub errors: Vec<ValidationError>,
    pub variant: FeedbackVariant,
    shown_at: Instant,
    auto_hide: Duration,
    dismissed: bool,
}

impl ValidationFeedback {
    pub fn new(
        errors: Vec<ValidationError>,
        variant: FeedbackVariant,
        now: Instant,
        auto_hide: Duration,
    ) -> Self {
        Self {
            errors,
            variant,
            shown_at: now,
            auto_hide,
            dismissed: false,
        }
    }

    /// Whether anything should be drawn at `now`
    pub fn is_visible(&self, now: Instant) -> bool {
        if self.dismissed || self.errors.is_empty() {
            return false;
        }
        match self.variant {
            FeedbackVariant::Toast => now.duration_since(self.shown_at) < self.auto_hide,
            FeedbackVariant::Inline | FeedbackVariant::Summary => true,
        }
    }

    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }

    pub fn headline(&self) -> String {
        let count = self.errors.len();
        match self.variant {
            FeedbackVariant::Toast => {
                if count == 1 {
                    "Please correct the following error:".to_string()
                } else {
                    format!("Please correct {count} errors:")
                }
            }
            FeedbackVariant::Summary => {
                if count == 1 {
                    "1 Error Found".to_string()
                } else {
                    format!("{count} Errors Found")
                }
            }
            FeedbackVariant::Inline => String::new(),
        }
    }

    /// Secondary line under the headline, summary only
    pub fn subtitle(&self) -> Option<&'static str> {
        match self.variant {
            FeedbackVariant::Summary => {
                Some("Please review and correct the following issues before continuing:")
            }
            _ => None,
        }
    }

    pub fn visible_entries(&self) -> &[ValidationError] {
        match self.variant {
            FeedbackVariant::Toast => {
                &self.errors[..self.errors.len().min(TOAST_VISIBLE_ENTRIES)]
            }
            FeedbackVariant::Inline | FeedbackVariant::Summary => &self.errors,
        }
    }

    /// "And N more..." when the toast truncated the list
    pub fn overflow_note(&self) -> Option<String> {
        if self.variant != FeedbackVariant::Toast || self.errors.len() <= TOAST_VISIBLE_ENTRIES {
            return None;
        }
        Some(format!("And {} more...", self.errors.len() - TOAST_VISIBLE_ENTRIES))
    }

    /// Drop entries the user has since fixed
    pub fn retain_still_failing(&mut self, current: &[ValidationError]) {
        self.errors.retain(|e| current.contains(e));
    }
}

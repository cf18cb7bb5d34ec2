// ABOUTME: Generic form description used by every step page
// Records describe their fields, expose current values and accept whole-value edits

use thiserror::Error;

use super::uploads::{FileCandidate, UploadError, UploadKind};
use crate::models::Choice;

/// Errors raised when an edit cannot be applied to a record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field {0} does not accept this kind of input")]
    WrongInput(String),

    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

/// Editor used to render and edit a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single line of text
    Text,
    /// Free text paragraph
    Multiline,
    /// `YYYY-MM-DD` date
    Date,
    /// Digits reformatted as a dollar amount
    Currency,
    /// Exactly one option
    Choice(&'static [Choice]),
    /// Any number of options
    MultiChoice(&'static [Choice]),
    /// 1-based scale, 0 meaning unrated
    Rating(&'static [Choice]),
    /// Free-form list items entered as `a | b | c`
    Entries { hint: &'static str },
    /// File attachment slot
    Attachment(UploadKind),
    /// Yes/no flag
    Checkbox,
}

impl FieldKind {
    /// Kinds that take typed characters into an edit buffer
    pub fn takes_text(&self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::Multiline
                | Self::Date
                | Self::Currency
                | Self::Entries { .. }
                | Self::Attachment(_)
        )
    }

    /// Options the cursor moves across, if any
    pub fn options(&self) -> &'static [Choice] {
        match self {
            Self::Choice(options) | Self::MultiChoice(options) | Self::Rating(options) => options,
            _ => &[],
        }
    }
}

/// One field on a step page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Stable key used to address the field
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Section heading the field is grouped under
    pub section: &'static str,
}

impl FieldDef {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind, section: &'static str) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required: false,
            section,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Current value of a field, as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Selected(String),
    Many(Vec<String>),
    Rating(u8),
    /// Display lines, one per list item
    Entries(Vec<String>),
    Flag(bool),
}

impl FieldValue {
    pub fn text(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// An edit requested by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    /// Replace the text
    Text(String),
    /// Select (single choice) or toggle (multi choice) an option value
    Pick(String),
    Rate(u8),
    /// Parse and append a list item
    Add(String),
    /// Remove the list item at this display index
    Remove(usize),
    /// Attach a file, refusing it above `max_bytes`
    Attach { file: FileCandidate, max_bytes: u64 },
    /// Remove the current attachment(s), or the one at this index
    Detach(Option<usize>),
    Flag(bool),
}

/// A step record that can be edited through generic form fields
pub trait FormModel {
    /// Fields currently on the page, in display order
    fn fields(&self) -> Vec<FieldDef>;

    fn value(&self, key: &str) -> Option<FieldValue>;

    fn apply(&mut self, key: &str, input: FieldInput) -> Result<(), FieldError>;

    /// Advisory lines shown under the form, e.g. timeline guidance
    fn hints(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Require a text input
pub(crate) fn expect_text(key: &str, input: FieldInput) -> Result<String, FieldError> {
    match input {
        FieldInput::Text(text) => Ok(text),
        _ => Err(FieldError::WrongInput(key.to_string())),
    }
}

/// Require a pick that is one of `options`
pub(crate) fn expect_pick(
    key: &str,
    input: FieldInput,
    options: &[Choice],
) -> Result<String, FieldError> {
    match input {
        FieldInput::Pick(value) if options.iter().any(|c| c.value == value) => Ok(value),
        FieldInput::Pick(value) => Err(FieldError::Rejected(format!("Unknown option: {value}"))),
        _ => Err(FieldError::WrongInput(key.to_string())),
    }
}

/// Require a rating within 1..=max
pub(crate) fn expect_rating(key: &str, input: FieldInput, max: u8) -> Result<u8, FieldError> {
    match input {
        FieldInput::Rate(value) if (1..=max).contains(&value) => Ok(value),
        FieldInput::Rate(value) => Err(FieldError::Rejected(format!("Rating must be 1-{max}, got {value}"))),
        _ => Err(FieldError::WrongInput(key.to_string())),
    }
}

/// Apply a Pick as a select on a single-choice field
pub(crate) fn pick_into(
    target: &mut String,
    key: &str,
    input: FieldInput,
    options: &[Choice],
) -> Result<(), FieldError> {
    *target = expect_pick(key, input, options)?;
    Ok(())
}

/// Apply a Pick as a toggle on a multi-choice field
pub(crate) fn toggle_into(
    target: &mut Vec<String>,
    key: &str,
    input: FieldInput,
    options: &[Choice],
) -> Result<(), FieldError> {
    let value = expect_pick(key, input, options)?;
    crate::models::toggle_value(target, &value);
    Ok(())
}

/// Apply Add/Remove on a plain string list (URLs and similar)
pub(crate) fn edit_string_list(
    target: &mut Vec<String>,
    key: &str,
    input: FieldInput,
) -> Result<(), FieldError> {
    match input {
        FieldInput::Add(entry) => {
            let entry = entry.trim();
            if entry.is_empty() {
                return Err(FieldError::Rejected("Entry is empty".to_string()));
            }
            target.push(entry.to_string());
            Ok(())
        }
        FieldInput::Remove(index) if index < target.len() => {
            target.remove(index);
            Ok(())
        }
        FieldInput::Remove(index) => Err(FieldError::Rejected(format!("No entry at position {}", index + 1))),
        _ => Err(FieldError::WrongInput(key.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONS: &[Choice] = &[Choice::plain("One"), Choice::plain("Two")];

    #[test]
    fn test_pick_rejects_unknown_option() {
        let mut target = String::new();
        let result = pick_into(&mut target, "k", FieldInput::Pick("Three".into()), OPTIONS);
        assert!(matches!(result, Err(FieldError::Rejected(_))));
        assert!(target.is_empty());
    }

    #[test]
    fn test_toggle_into_flips_membership() {
        let mut target = Vec::new();
        toggle_into(&mut target, "k", FieldInput::Pick("Two".into()), OPTIONS).unwrap();
        assert_eq!(target, vec!["Two"]);
        toggle_into(&mut target, "k", FieldInput::Pick("Two".into()), OPTIONS).unwrap();
        assert!(target.is_empty());
    }

    #[test]
    fn test_string_list_ignores_blank_entries() {
        let mut urls = Vec::new();
        assert!(edit_string_list(&mut urls, "urls", FieldInput::Add("   ".into())).is_err());
        edit_string_list(&mut urls, "urls", FieldInput::Add(" https://a.example ".into())).unwrap();
        assert_eq!(urls, vec!["https://a.example"]);
        edit_string_list(&mut urls, "urls", FieldInput::Remove(0)).unwrap();
        assert!(urls.is_empty());
    }

    #[test]
    fn test_rating_bounds() {
        assert_eq!(expect_rating("r", FieldInput::Rate(5), 5), Ok(5));
        assert!(expect_rating("r", FieldInput::Rate(0), 5).is_err());
        assert!(expect_rating("r", FieldInput::Rate(6), 5).is_err());
    }
}

// ABOUTME: Questionnaire data models, one plain record per wizard step plus shared option catalogs

pub mod assets;
pub mod business;
pub mod engagement;
pub mod environment;

pub use assets::{AssetScoping, AssetType, HttpMethod, NetworkType};
pub use business::{BusinessContext, SensitiveData};
pub use engagement::{EngagementPreferences, TestingApproach};
pub use environment::{Criticality, EnvironmentOverview, Integration, UploadedFile};

use uuid::Uuid;

/// A selectable option shown by choice, multi-choice and rating fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    /// Value stored in the record
    pub value: &'static str,
    /// Display label
    pub label: &'static str,
    /// Optional secondary text, empty when the option has none
    pub description: &'static str,
}

impl Choice {
    pub const fn new(value: &'static str, label: &'static str, description: &'static str) -> Self {
        Self { value, label, description }
    }

    /// Option whose stored value is its label
    pub const fn plain(label: &'static str) -> Self {
        Self { value: label, label, description: "" }
    }
}

/// Look up the display label for a stored value, falling back to the value itself
pub fn label_for(catalog: &[Choice], value: &str) -> String {
    catalog
        .iter()
        .find(|c| c.value == value)
        .map_or_else(|| value.to_string(), |c| c.label.to_string())
}

/// Generate identity for a newly added list item
pub fn new_item_id() -> String {
    Uuid::new_v4().to_string()
}

/// Add `value` when absent, remove it when present. Insertion order is preserved.
pub fn toggle_value(list: &mut Vec<String>, value: &str) {
    if let Some(pos) = list.iter().position(|v| v == value) {
        list.remove(pos);
    } else {
        list.push(value.to_string());
    }
}

/// Split a `a | b | c` entry into trimmed parts
pub fn split_entry(input: &str) -> Vec<String> {
    input.split('|').map(|part| part.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_value_adds_then_removes() {
        let mut list = vec!["a".to_string()];
        toggle_value(&mut list, "b");
        assert_eq!(list, vec!["a", "b"]);
        toggle_value(&mut list, "a");
        assert_eq!(list, vec!["b"]);
    }

    #[test]
    fn test_new_item_ids_are_unique() {
        let ids: std::collections::HashSet<String> = (0..100).map(|_| new_item_id()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_label_for_falls_back_to_value() {
        let catalog = [Choice::new("sso", "Single Sign-On (SSO)", "")];
        assert_eq!(label_for(&catalog, "sso"), "Single Sign-On (SSO)");
        assert_eq!(label_for(&catalog, "unknown"), "unknown");
    }

    #[test]
    fn test_split_entry_trims_parts() {
        assert_eq!(split_entry(" Admin |  full access "), vec!["Admin", "full access"]);
    }
}

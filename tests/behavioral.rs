// ABOUTME: Behavioral test suite for the questionnaire wizard
//
// These tests drive the app state through events against a real draft
// directory, the same way the TUI loop does.

#[path = "behavioral/fixtures.rs"]
pub mod fixtures;

#[path = "behavioral/draft_persistence.rs"]
mod draft_persistence;

#[path = "behavioral/navigation.rs"]
mod navigation;

// ABOUTME: Footer with the Back / Save draft / Continue controls and the save status

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::theme::{key_hint, DARK_BG, ERROR_RED, MUTED_GRAY, SELECTION_GREEN, SUBDUED_BORDER, WARNING_YELLOW};
use crate::app::AppState;
use crate::wizard::{SaveStatus, WizardStep};

pub struct ControlsComponent;

impl ControlsComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(SUBDUED_BORDER))
            .style(Style::default().bg(DARK_BG));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(24)])
            .split(inner);

        let nav = Paragraph::new(Self::hint_line(state)).alignment(Alignment::Center);
        frame.render_widget(nav, columns[0]);

        let status = Paragraph::new(Self::status_line(state)).alignment(Alignment::Right);
        frame.render_widget(status, columns[1]);
    }

    /// Key hints for the current page and mode
    pub fn hint_line(state: &AppState) -> Line<'static> {
        let separator = || Span::styled("  |  ", Style::default().fg(SUBDUED_BORDER));
        let mut groups: Vec<Vec<Span<'static>>> = Vec::new();
        let step = state.current_step();

        if state.editor.is_some() {
            groups.push(key_hint("Enter", "Done", true));
            groups.push(key_hint("Alt+Enter", "New line", true));
            groups.push(key_hint("Esc", "Stop editing", true));
        } else {
            match step {
                WizardStep::Submit => {
                    groups.push(key_hint("b", "Back to Review", true));
                    groups.push(key_hint("d", "Download PDF", state.busy.is_none()));
                    groups.push(key_hint("m", "Email to consultant", state.busy.is_none()));
                }
                WizardStep::Review => {
                    groups.push(key_hint("b", "Back", true));
                    groups.push(key_hint("s", "Save draft", true));
                    groups.push(key_hint("p", "Preview", true));
                    groups.push(key_hint("a", "Accept NDA", true));
                    groups.push(key_hint("n", "Submit", state.session.legal.can_submit()));
                }
                _ => {
                    groups.push(key_hint("b", "Back", step.previous().is_some()));
                    groups.push(key_hint("Space", "Select", true));
                    groups.push(key_hint("s", "Save draft", true));
                    groups.push(key_hint("n", "Continue", true));
                }
            }
            groups.push(key_hint("?", "Help", true));
            groups.push(key_hint("q", "Quit", true));
        }

        let mut spans = Vec::new();
        for (i, group) in groups.into_iter().enumerate() {
            if i > 0 {
                spans.push(separator());
            }
            spans.extend(group);
        }
        Line::from(spans)
    }

    /// Busy activity first, then the draft save status
    pub fn status_line(state: &AppState) -> Line<'static> {
        if let Some(busy) = state.busy {
            return Line::from(Span::styled(format!("⏳ {busy}"), Style::default().fg(WARNING_YELLOW)));
        }
        let status = state.session.save_status();
        let style = match status {
            SaveStatus::Idle => Style::default().fg(MUTED_GRAY),
            SaveStatus::Saving => Style::default().fg(WARNING_YELLOW),
            SaveStatus::Saved => Style::default().fg(SELECTION_GREEN),
            SaveStatus::Error(_) => Style::default().fg(ERROR_RED),
        };
        let icon = match status {
            SaveStatus::Idle => "",
            SaveStatus::Saving => "⏳ ",
            SaveStatus::Saved => "✓ ",
            SaveStatus::Error(_) => "✗ ",
        };
        Line::from(Span::styled(format!("{icon}{}", status.label()), style))
    }
}

impl Default for ControlsComponent {
    fn default() -> Self {
        Self::new()
    }
}

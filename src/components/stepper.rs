// ABOUTME: Progress header showing the six wizard steps as completed, current or upcoming

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::theme::{CORNFLOWER_BLUE, GOLD, MUTED_GRAY, PANEL_BG, SELECTION_GREEN, SOFT_WHITE, SUBDUED_BORDER};
use crate::app::AppState;
use crate::wizard::{VisualState, WizardStep};

pub const APP_TITLE: &str = "Penetration Test Scoping Questionnaire";

pub struct StepperComponent;

impl StepperComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(1), // Progress
                Constraint::Length(1), // Step description
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled("🛡️ ", Style::default()),
            Span::styled(APP_TITLE, Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(title, rows[0]);

        let progress = Paragraph::new(Self::progress_line(state)).alignment(Alignment::Center);
        frame.render_widget(progress, rows[1]);

        let current = state.current_step();
        let description = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("Step {} of {}", current.number(), WizardStep::total()),
                Style::default().fg(CORNFLOWER_BLUE),
            ),
            Span::styled(" · ", Style::default().fg(SUBDUED_BORDER)),
            Span::styled(current.description(), Style::default().fg(MUTED_GRAY)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(description, rows[2]);
    }

    /// ● completed, ◉ current, ○ upcoming
    pub fn progress_line(state: &AppState) -> Line<'static> {
        let steps = WizardStep::all();
        let mut spans = Vec::new();

        for (idx, step) in steps.iter().enumerate() {
            let visual = state.session.visual_state(idx);
            let (icon, icon_style, label_style) = match visual {
                VisualState::Completed => (
                    "●",
                    Style::default().fg(SELECTION_GREEN),
                    Style::default().fg(MUTED_GRAY),
                ),
                VisualState::Current => (
                    "◉",
                    Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
                    Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD),
                ),
                VisualState::Upcoming => (
                    "○",
                    Style::default().fg(MUTED_GRAY),
                    Style::default().fg(MUTED_GRAY),
                ),
            };

            spans.push(Span::styled(icon, icon_style));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(step.label(), label_style));

            if idx < steps.len() - 1 {
                spans.push(Span::styled(" → ", Style::default().fg(SUBDUED_BORDER)));
            }
        }

        Line::from(spans)
    }
}

impl Default for StepperComponent {
    fn default() -> Self {
        Self::new()
    }
}

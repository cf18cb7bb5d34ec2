// ABOUTME: Validation feedback drawn as a dismissible summary panel or a self-hiding toast

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::theme::{ERROR_RED, MUTED_GRAY, PANEL_BG, SOFT_WHITE, SUBDUED_BORDER};
use crate::wizard::{FeedbackVariant, ValidationFeedback};

const TOAST_WIDTH: u16 = 56;

pub struct FeedbackComponent;

impl FeedbackComponent {
    /// Lines needed for the summary panel, borders included
    pub fn summary_height(feedback: &ValidationFeedback) -> u16 {
        if feedback.variant != FeedbackVariant::Summary {
            return 0;
        }
        let body = Self::lines(feedback).len();
        u16::try_from(body + 2).unwrap_or(u16::MAX)
    }

    pub fn render_summary(frame: &mut Frame, area: Rect, feedback: &ValidationFeedback) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ERROR_RED))
            .style(Style::default().bg(PANEL_BG))
            .title(" ✗ Validation ")
            .title_style(Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD));

        let paragraph = Paragraph::new(Self::lines(feedback))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    /// Toast sits under the notification column on the right
    pub fn render_toast(frame: &mut Frame, feedback: &ValidationFeedback) {
        let screen = frame.size();
        let lines = Self::lines(feedback);
        let width = TOAST_WIDTH.min(screen.width.saturating_sub(2));
        let height = u16::try_from(lines.len() + 2)
            .unwrap_or(u16::MAX)
            .min(screen.height.saturating_sub(2));
        let area = Rect {
            x: screen.width.saturating_sub(width + 1),
            y: screen.height.saturating_sub(height + 4),
            width,
            height,
        };

        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ERROR_RED))
            .style(Style::default().bg(PANEL_BG));
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    pub fn lines(feedback: &ValidationFeedback) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(
            feedback.headline(),
            Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD),
        ))];
        if let Some(subtitle) = feedback.subtitle() {
            lines.push(Line::from(Span::styled(subtitle, Style::default().fg(MUTED_GRAY))));
        }
        for error in feedback.visible_entries() {
            lines.push(Line::from(vec![
                Span::styled("• ", Style::default().fg(ERROR_RED)),
                Span::styled(format!("{}: ", error.field), Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD)),
                Span::styled(error.message.clone(), Style::default().fg(SOFT_WHITE)),
            ]));
        }
        if let Some(note) = feedback.overflow_note() {
            lines.push(Line::from(Span::styled(note, Style::default().fg(MUTED_GRAY))));
        }
        if feedback.variant == FeedbackVariant::Summary {
            lines.push(Line::from(vec![
                Span::styled("[x]", Style::default().fg(SUBDUED_BORDER)),
                Span::styled(" Dismiss", Style::default().fg(MUTED_GRAY)),
            ]));
        }
        lines
    }
}

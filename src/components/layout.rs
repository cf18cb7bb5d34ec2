// ABOUTME: Main layout component that assembles the header stepper, the current page,
// the footer controls and every overlay (feedback, notifications, help)

use std::time::Instant;

use ratatui::{
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::controls::ControlsComponent;
use super::feedback::FeedbackComponent;
use super::form::FormComponent;
use super::help::HelpComponent;
use super::review::ReviewComponent;
use super::stepper::StepperComponent;
use super::submit::SubmitComponent;
use super::theme::{CORNFLOWER_BLUE, DARK_BG, PANEL_BG, SELECTION_GREEN, WARNING_ORANGE};
use crate::app::state::NotificationType;
use crate::app::AppState;
use crate::wizard::{FeedbackVariant, WizardStep};

const NOTIFICATION_WIDTH: u16 = 50;
const NOTIFICATION_ERROR: Color = Color::Rgb(230, 100, 100);

pub struct LayoutComponent {
    stepper: StepperComponent,
    form: FormComponent,
    review: ReviewComponent,
    submit: SubmitComponent,
    controls: ControlsComponent,
    help: HelpComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            stepper: StepperComponent::new(),
            form: FormComponent::new(),
            review: ReviewComponent::new(),
            submit: SubmitComponent::new(),
            controls: ControlsComponent::new(),
            help: HelpComponent::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let area = frame.size();
        frame.render_widget(Block::default().style(Style::default().bg(DARK_BG)), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Stepper
                Constraint::Min(8),    // Page
                Constraint::Length(3), // Controls
            ])
            .split(area);

        self.stepper.render(frame, chunks[0], state);
        self.render_page(frame, chunks[1], state);
        self.controls.render(frame, chunks[2], state);

        let now = Instant::now();
        if let Some(feedback) = state.feedback.as_ref().filter(|f| f.is_visible(now)) {
            if feedback.variant == FeedbackVariant::Toast {
                FeedbackComponent::render_toast(frame, feedback);
            }
        }

        // Render notifications (top-right corner)
        self.render_notifications(frame, area, state);

        if state.help_visible {
            self.help.render(frame, area);
        }
    }

    fn render_page(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        match state.current_step() {
            WizardStep::Review => self.review.render(frame, area, state),
            WizardStep::Submit => self.submit.render(frame, area, state),
            _ => {
                let summary = state
                    .feedback
                    .as_ref()
                    .filter(|f| f.variant == FeedbackVariant::Summary && f.is_visible(Instant::now()));
                match summary {
                    Some(feedback) => {
                        let height = FeedbackComponent::summary_height(feedback).min(area.height / 2);
                        let rows = Layout::default()
                            .direction(Direction::Vertical)
                            .constraints([Constraint::Length(height), Constraint::Min(4)])
                            .split(area);
                        FeedbackComponent::render_summary(frame, rows[0], feedback);
                        self.form.render(frame, rows[1], state);
                    }
                    None => self.form.render(frame, area, state),
                }
            }
        }
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let notifications = state.get_current_notifications();
        if notifications.is_empty() {
            return;
        }

        let notification_width = NOTIFICATION_WIDTH.min(area.width.saturating_sub(2));
        let notification_height = u16::try_from(notifications.len() * 3).unwrap_or(u16::MAX);

        let notification_area = Rect {
            x: area.width.saturating_sub(notification_width + 2),
            y: 1,
            width: notification_width,
            height: notification_height.min(area.height.saturating_sub(2)),
        };

        for (i, notification) in notifications.iter().enumerate() {
            let y_offset = u16::try_from(i * 3).unwrap_or(u16::MAX);
            if y_offset >= notification_area.height {
                break;
            }

            let single_notification_area = Rect {
                x: notification_area.x,
                y: notification_area.y + y_offset,
                width: notification_area.width,
                height: 3.min(notification_area.height - y_offset),
            };

            let (icon, color) = match notification.notification_type {
                NotificationType::Success => ("✓ ", SELECTION_GREEN),
                NotificationType::Error => ("✗ ", NOTIFICATION_ERROR),
                NotificationType::Warning => ("⚠ ", WARNING_ORANGE),
                NotificationType::Info => ("ℹ ", CORNFLOWER_BLUE),
            };

            let notification_line = Line::from(vec![
                Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::styled(notification.message.as_str(), Style::default().fg(color)),
            ]);

            let notification_widget = Paragraph::new(notification_line)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(color))
                        .style(Style::default().bg(PANEL_BG)),
                )
                .wrap(ratatui::widgets::Wrap { trim: true });

            frame.render_widget(notification_widget, single_notification_area);
        }
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}

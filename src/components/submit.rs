// ABOUTME: Submission confirmation page: reference details, next steps timeline,
// consultant contact, data handling notes and the document actions

use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::theme::{panel, CORNFLOWER_BLUE, GOLD, MUTED_GRAY, SELECTION_GREEN, SOFT_WHITE};
use crate::app::AppState;
use crate::wizard::export::{ConsultantInfo, NEXT_STEPS, RESOURCES, SECURITY_DETAILS, SUMMARY_ITEMS};
use crate::wizard::Submission;

pub struct SubmitComponent;

impl SubmitComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let confirmation = Self::confirmation_lines(state);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(u16::try_from(confirmation.len() + 2).unwrap_or(u16::MAX)),
                Constraint::Min(8),
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new(confirmation)
                .block(panel("Submission Confirmed", SELECTION_GREEN))
                .wrap(Wrap { trim: true }),
            rows[0],
        );

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[1]);

        frame.render_widget(
            Paragraph::new(Self::timeline_lines())
                .block(panel("What Happens Next", CORNFLOWER_BLUE))
                .wrap(Wrap { trim: true }),
            columns[0],
        );

        let mut side = Self::consultant_lines(&state.config.consultant);
        side.push(Line::from(""));
        side.extend(Self::details_lines());
        frame.render_widget(
            Paragraph::new(side)
                .block(panel("Your Consultant", CORNFLOWER_BLUE))
                .wrap(Wrap { trim: true }),
            columns[1],
        );
    }

    pub fn confirmation_lines(state: &AppState) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(vec![
            Span::styled("✓ ", Style::default().fg(SELECTION_GREEN).add_modifier(Modifier::BOLD)),
            Span::styled(
                "Thank you! Your questionnaire has been submitted.",
                Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD),
            ),
        ])];

        match state.session.submission() {
            Some(submission) => lines.extend(Self::reference_lines(submission)),
            None => lines.push(Line::from(Span::styled(
                "Reference number is assigned when the document is generated.",
                Style::default().fg(MUTED_GRAY),
            ))),
        }

        lines.push(Line::from(""));
        if let Some(path) = &state.last_export {
            lines.push(Line::from(vec![
                Span::styled("Saved: ", Style::default().fg(MUTED_GRAY)),
                Span::styled(path.display().to_string(), Style::default().fg(SELECTION_GREEN)),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::styled("[d]", Style::default().fg(GOLD)),
                Span::styled(" Download PDF   ", Style::default().fg(SOFT_WHITE)),
                Span::styled("[m]", Style::default().fg(GOLD)),
                Span::styled(" Email to consultant", Style::default().fg(SOFT_WHITE)),
            ]));
        }
        lines
    }

    fn reference_lines(submission: &Submission) -> Vec<Line<'static>> {
        let row = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().fg(MUTED_GRAY)),
                Span::styled(value, Style::default().fg(SOFT_WHITE)),
            ])
        };
        vec![
            row("Reference", submission.reference.clone()),
            row("Client", submission.client_display()),
            row(
                "Submitted",
                format!("{} at {}", submission.date_display(), submission.time_display()),
            ),
            row("Document", submission.file_name(&Local::now())),
        ]
    }

    pub fn timeline_lines() -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for step in NEXT_STEPS {
            let (icon, color) = if step.completed {
                ("●", SELECTION_GREEN)
            } else {
                ("○", MUTED_GRAY)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{icon} "), Style::default().fg(color)),
                Span::styled(step.title, Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD)),
                Span::styled(format!("  {}", step.timeframe), Style::default().fg(GOLD)),
            ]));
            lines.push(Line::from(Span::styled(
                format!("  {}", step.description),
                Style::default().fg(MUTED_GRAY),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Self::heading("Engagement Summary"));
        lines.extend(SUMMARY_ITEMS.iter().map(|(label, value)| Self::pair(label, value)));
        lines.push(Line::from(""));
        lines.push(Self::heading("Resources"));
        lines.extend(RESOURCES.iter().map(|(title, description)| {
            Line::from(vec![
                Span::styled(format!("• {title}"), Style::default().fg(CORNFLOWER_BLUE)),
                Span::styled(format!(" · {description}"), Style::default().fg(MUTED_GRAY)),
            ])
        }));
        lines
    }

    pub fn consultant_lines(consultant: &ConsultantInfo) -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                consultant.name.clone(),
                Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(consultant.title.clone(), Style::default().fg(MUTED_GRAY))),
            Self::pair("Email", &consultant.email),
            Self::pair("Phone", &consultant.phone),
            Self::pair("Response time", &consultant.response_time),
        ]
    }

    fn details_lines() -> Vec<Line<'static>> {
        let mut lines = vec![Self::heading("Security & Data Handling")];
        lines.extend(SECURITY_DETAILS.iter().map(|(label, value)| Self::pair(label, value)));
        lines
    }

    fn heading(text: &str) -> Line<'static> {
        Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        ))
    }

    fn pair(label: &str, value: &str) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().fg(MUTED_GRAY)),
            Span::styled(value.to_string(), Style::default().fg(SOFT_WHITE)),
        ])
    }
}

impl Default for SubmitComponent {
    fn default() -> Self {
        Self::new()
    }
}

// ABOUTME: Review page with collapsible section summaries, validation results,
// the engagement overview card and the NDA / audit consent agreement

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::theme::{
    panel, scroll_offset, CORNFLOWER_BLUE, ERROR_RED, GOLD, MUTED_GRAY, SELECTION_GREEN,
    SOFT_WHITE, SUBDUED_BORDER, WARNING_ORANGE, WARNING_YELLOW,
};
use crate::app::AppState;
use crate::wizard::review::{
    AssetRow, EngagementCard, Priority, ReviewSection, SectionStatus, Severity, NDA_REQUIRED_NOTE,
    NDA_TERMS,
};
use crate::wizard::{LegalAgreement, ReviewSummary};

pub struct ReviewComponent;

impl ReviewComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let review = state.session.review();

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        self.render_sections(frame, columns[0], state, &review);

        let validation = Self::validation_lines(&review);
        let engagement = Self::engagement_lines(&review.engagement);
        let legal = Self::legal_lines(&state.session.legal);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(u16::try_from(validation.len() + 2).unwrap_or(u16::MAX)),
                Constraint::Length(u16::try_from(engagement.len() + 2).unwrap_or(u16::MAX)),
                Constraint::Min(6),
            ])
            .split(columns[1]);

        let border = if review.error_count() > 0 { ERROR_RED } else { SELECTION_GREEN };
        frame.render_widget(
            Paragraph::new(validation)
                .block(panel("Validation", border))
                .wrap(Wrap { trim: true }),
            side[0],
        );
        frame.render_widget(
            Paragraph::new(engagement)
                .block(panel("Engagement Overview", CORNFLOWER_BLUE))
                .wrap(Wrap { trim: true }),
            side[1],
        );

        let legal_border = if state.session.legal.can_submit() { SELECTION_GREEN } else { WARNING_ORANGE };
        let legal_block = panel("Legal Agreement", legal_border);
        let legal_inner = legal_block.inner(side[2]);
        frame.render_widget(legal_block, side[2]);
        frame.render_widget(Paragraph::new(legal).wrap(Wrap { trim: true }), legal_inner);
    }

    fn render_sections(&self, frame: &mut Frame, area: Rect, state: &AppState, review: &ReviewSummary) {
        let block = panel("Questionnaire Summary", CORNFLOWER_BLUE);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (lines, focus_line) = Self::section_lines(state, review);
        let offset = scroll_offset(focus_line, inner.height);
        frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), inner);
    }

    /// Accordion of review sections plus the line the focused header sits on
    pub fn section_lines(state: &AppState, review: &ReviewSummary) -> (Vec<Line<'static>>, usize) {
        let mut lines = Vec::new();
        let mut focus_line = 0;

        for (index, section) in review.sections.iter().enumerate() {
            let focused = index == state.focus;
            let expanded = state.expanded_sections.contains(&index);
            if focused {
                focus_line = lines.len();
            }
            lines.push(Self::section_header(section, focused, expanded));
            if expanded {
                lines.extend(Self::section_body(section));
            }
            lines.push(Line::from(""));
        }

        (lines, focus_line)
    }

    fn section_header(section: &ReviewSection, focused: bool, expanded: bool) -> Line<'static> {
        let arrow = if expanded { "▾" } else { "▸" };
        let title_style = if focused {
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD)
        };
        let (badge, color) = Self::status_badge(section.status);
        let mut spans = vec![
            Span::styled(if focused { "› " } else { "  " }, Style::default().fg(GOLD)),
            Span::styled(format!("{arrow} "), Style::default().fg(CORNFLOWER_BLUE)),
            Span::styled(section.title.clone(), title_style),
            Span::styled(format!("  {badge} {}", section.status.label()), Style::default().fg(color)),
        ];
        if focused {
            spans.push(Span::styled("  [e] Edit", Style::default().fg(MUTED_GRAY)));
        }
        Line::from(spans)
    }

    fn status_badge(status: SectionStatus) -> (&'static str, ratatui::style::Color) {
        match status {
            SectionStatus::Complete => ("✓", SELECTION_GREEN),
            SectionStatus::Warning => ("⚠", WARNING_YELLOW),
            SectionStatus::Incomplete => ("✗", ERROR_RED),
        }
    }

    fn section_body(section: &ReviewSection) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = section
            .rows
            .iter()
            .map(|row| {
                Line::from(vec![
                    Span::styled(format!("      {}: ", row.label), Style::default().fg(MUTED_GRAY)),
                    Span::styled(row.display(), Style::default().fg(SOFT_WHITE)),
                ])
            })
            .collect();

        if !section.assets.is_empty() {
            lines.push(Line::from(Span::styled(
                "      Assets",
                Style::default().fg(CORNFLOWER_BLUE).add_modifier(Modifier::BOLD),
            )));
            lines.extend(section.assets.iter().map(Self::asset_line));
        }
        lines
    }

    fn asset_line(asset: &AssetRow) -> Line<'static> {
        let (priority, color) = match asset.priority {
            Priority::High => ("high", ERROR_RED),
            Priority::Medium => ("medium", WARNING_YELLOW),
            Priority::Low => ("low", SELECTION_GREEN),
        };
        let scope = if asset.in_scope { "In Scope" } else { "Out of Scope" };
        Line::from(vec![
            Span::styled(format!("      • [{}] ", asset.asset_type), Style::default().fg(MUTED_GRAY)),
            Span::styled(asset.name.clone(), Style::default().fg(SOFT_WHITE)),
            Span::styled(format!(" · {}", asset.details), Style::default().fg(MUTED_GRAY)),
            Span::styled(format!(" · {scope}"), Style::default().fg(CORNFLOWER_BLUE)),
            Span::styled(format!(" · {priority}"), Style::default().fg(color)),
        ])
    }

    pub fn validation_lines(review: &ReviewSummary) -> Vec<Line<'static>> {
        let passed = review.issues.is_empty();
        let (icon, color) = if passed {
            ("✓", SELECTION_GREEN)
        } else if review.error_count() > 0 {
            ("✗", ERROR_RED)
        } else {
            ("⚠", WARNING_YELLOW)
        };
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{icon} {}", review.panel_headline()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(review.panel_subtitle(), Style::default().fg(MUTED_GRAY))),
        ];
        for issue in &review.issues {
            let color = match issue.severity {
                Severity::Error => ERROR_RED,
                Severity::Warning => WARNING_YELLOW,
            };
            lines.push(Line::from(vec![
                Span::styled("• ", Style::default().fg(color)),
                Span::styled(format!("{} › {}: ", issue.section, issue.field), Style::default().fg(SOFT_WHITE)),
                Span::styled(issue.message.clone(), Style::default().fg(MUTED_GRAY)),
                Span::styled(format!("  (Fix Now: step {})", issue.step.number()), Style::default().fg(SUBDUED_BORDER)),
            ]));
        }
        lines
    }

    pub fn engagement_lines(card: &EngagementCard) -> Vec<Line<'static>> {
        let row = |label: &str, value: &str| {
            Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().fg(MUTED_GRAY)),
                Span::styled(value.to_string(), Style::default().fg(SOFT_WHITE)),
            ])
        };
        let mut lines = vec![
            row("Timeline", &card.timeline),
            row("Budget", &card.budget),
            row("Approach", &card.approach),
            Line::from(Span::styled("Deliverables:", Style::default().fg(MUTED_GRAY))),
        ];
        lines.extend(card.deliverables.iter().map(|d| {
            Line::from(vec![
                Span::styled("  ✓ ", Style::default().fg(SELECTION_GREEN)),
                Span::styled(d.clone(), Style::default().fg(SOFT_WHITE)),
            ])
        }));
        lines
    }

    pub fn legal_lines(legal: &LegalAgreement) -> Vec<Line<'static>> {
        let check = |on: bool| if on { "[x]" } else { "[ ]" };
        let mut lines = Vec::new();

        let terms_label = if legal.terms_expanded { "▾ NDA Terms" } else { "▸ NDA Terms" };
        lines.push(Line::from(vec![
            Span::styled(terms_label, Style::default().fg(CORNFLOWER_BLUE)),
            Span::styled("  [t] show/hide", Style::default().fg(MUTED_GRAY)),
        ]));
        if legal.terms_expanded {
            for (title, body) in NDA_TERMS {
                lines.push(Line::from(Span::styled(
                    title.to_string(),
                    Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled(body.to_string(), Style::default().fg(MUTED_GRAY))));
            }
        }
        lines.push(Line::from(""));

        let nda_color = if legal.nda_accepted { SELECTION_GREEN } else { SOFT_WHITE };
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", check(legal.nda_accepted)), Style::default().fg(nda_color)),
            Span::styled("I accept the Non-Disclosure Agreement", Style::default().fg(SOFT_WHITE)),
            Span::styled(" *", Style::default().fg(ERROR_RED)),
            Span::styled("  [a]", Style::default().fg(MUTED_GRAY)),
        ]));
        if !legal.nda_accepted {
            lines.push(Line::from(Span::styled(
                format!("    {NDA_REQUIRED_NOTE}"),
                Style::default().fg(WARNING_ORANGE),
            )));
        }

        let consent_color = if legal.audit_consent { SELECTION_GREEN } else { SOFT_WHITE };
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", check(legal.audit_consent)), Style::default().fg(consent_color)),
            Span::styled("I consent to audit logging of this engagement", Style::default().fg(SOFT_WHITE)),
            Span::styled("  [c]", Style::default().fg(MUTED_GRAY)),
        ]));
        lines
    }
}

impl Default for ReviewComponent {
    fn default() -> Self {
        Self::new()
    }
}

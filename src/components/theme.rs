// ABOUTME: Shared color palette and small layout helpers for every wizard component

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

// Premium color palette (TUI Style Guide)
pub const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
pub const GOLD: Color = Color::Rgb(255, 215, 0);
pub const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
pub const WARNING_ORANGE: Color = Color::Rgb(255, 165, 0);
pub const DARK_BG: Color = Color::Rgb(25, 25, 35);
pub const PANEL_BG: Color = Color::Rgb(30, 30, 40);
pub const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
pub const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
pub const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);
pub const ERROR_RED: Color = Color::Rgb(220, 80, 80);
pub const WARNING_YELLOW: Color = Color::Rgb(220, 180, 80);

/// Rounded panel with a gold title
pub fn panel(title: &str, border: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(PANEL_BG))
        .title(format!(" {title} "))
        .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
}

/// `[key] label` as used in footers
pub fn key_hint(key: &str, label: &str, enabled: bool) -> Vec<Span<'static>> {
    let (key_style, label_style) = if enabled {
        (Style::default().fg(GOLD), Style::default().fg(SOFT_WHITE))
    } else {
        (Style::default().fg(MUTED_GRAY), Style::default().fg(MUTED_GRAY))
    };
    vec![
        Span::styled("[", Style::default().fg(SUBDUED_BORDER)),
        Span::styled(key.to_string(), key_style),
        Span::styled("]", Style::default().fg(SUBDUED_BORDER)),
        Span::styled(format!(" {label}"), label_style),
    ]
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// First line to show so that `target` stays inside a `height`-line viewport
pub fn scroll_offset(target: usize, height: u16) -> u16 {
    let height = usize::from(height);
    if height == 0 || target < height.saturating_sub(2) {
        return 0;
    }
    let offset = target.saturating_sub(height / 3);
    u16::try_from(offset).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset_keeps_target_visible() {
        assert_eq!(scroll_offset(3, 20), 0);
        let offset = scroll_offset(40, 20);
        assert!(offset <= 40 && 40 < offset + 20);
    }

    #[test]
    fn test_centered_rect_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 80, parent);
        assert_eq!(popup.width, 60);
        assert!(popup.x >= 19 && popup.y >= 4);
    }
}

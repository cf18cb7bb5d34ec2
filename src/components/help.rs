// ABOUTME: Help overlay component displaying keyboard shortcuts for each wizard page

use ratatui::{
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem},
};

use super::theme::{centered_rect, CORNFLOWER_BLUE, PANEL_BG, SOFT_WHITE, WARNING_YELLOW};

pub struct HelpComponent;

impl HelpComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 80, area);

        frame.render_widget(Clear, popup_area);

        let help_items: Vec<ListItem> = Self::entries()
            .into_iter()
            .map(|(text, heading)| {
                let item = ListItem::new(text);
                if heading {
                    item.style(Style::default().fg(WARNING_YELLOW).add_modifier(Modifier::BOLD))
                } else {
                    item.style(Style::default().fg(SOFT_WHITE))
                }
            })
            .collect();

        let help_list = List::new(help_items).block(
            Block::default()
                .title("Help - Press ? or Esc to close")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(CORNFLOWER_BLUE))
                .style(Style::default().bg(PANEL_BG)),
        );

        frame.render_widget(help_list, popup_area);
    }

    /// (text, is_heading)
    fn entries() -> Vec<(&'static str, bool)> {
        vec![
            ("Form Pages:", true),
            ("  j/↓/Tab    Next field", false),
            ("  k/↑        Previous field", false),
            ("  h/l ←/→    Move between options or list items", false),
            ("  Enter      Edit text / select option", false),
            ("  Space      Select or toggle option", false),
            ("  d/Del      Remove list item or attachment", false),
            ("  x          Dismiss validation summary", false),
            ("", false),
            ("While Editing:", true),
            ("  Enter      Finish (adds list items, attaches files)", false),
            ("  Alt+Enter  New line in paragraphs", false),
            ("  Esc        Stop editing", false),
            ("", false),
            ("Navigation:", true),
            ("  n/PgDn     Continue (validates the step)", false),
            ("  b/PgUp     Back", false),
            ("  1-6        Open a completed step", false),
            ("  s          Save draft", false),
            ("", false),
            ("Review:", true),
            ("  j/k        Move between sections", false),
            ("  Enter      Expand or collapse section", false),
            ("  e          Edit section", false),
            ("  t          Show NDA terms", false),
            ("  a          Accept NDA", false),
            ("  c          Audit logging consent", false),
            ("  p          Generate preview", false),
            ("  n          Submit questionnaire", false),
            ("", false),
            ("After Submission:", true),
            ("  d          Download PDF", false),
            ("  m          Email to consultant", false),
            ("", false),
            ("General:", true),
            ("  ?          Toggle this help", false),
            ("  q/Esc      Quit application", false),
            ("  Ctrl+C     Force quit", false),
        ]
    }
}

impl Default for HelpComponent {
    fn default() -> Self {
        Self::new()
    }
}

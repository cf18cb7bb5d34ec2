// ABOUTME: Renders a form step as a scrolling list of fields grouped under section headings
// The focused field expands to show its options, list items or edit buffer

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::theme::{
    panel, scroll_offset, CORNFLOWER_BLUE, DARK_BG, ERROR_RED, GOLD, MUTED_GRAY, SELECTION_GREEN, SOFT_WHITE,
    SUBDUED_BORDER, WARNING_YELLOW,
};
use crate::app::state::TextInput;
use crate::app::AppState;
use crate::models::Choice;
use crate::wizard::{FieldDef, FieldKind, FieldValue};

const INDENT: &str = "    ";

pub struct FormComponent;

impl FormComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let step = state.current_step();
        let block = panel(step.label(), CORNFLOWER_BLUE);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (lines, focus_line) = Self::build_lines(state);
        let offset = scroll_offset(focus_line, inner.height);
        let form = Paragraph::new(lines).scroll((offset, 0));
        frame.render_widget(form, inner);
    }

    /// All lines of the page plus the index of the focused field's label line
    pub fn build_lines(state: &AppState) -> (Vec<Line<'static>>, usize) {
        let fields = state.fields();
        let mut lines = Vec::new();
        let mut focus_line = 0;
        let mut section = "";

        for (index, field) in fields.iter().enumerate() {
            if field.section != section {
                section = field.section;
                if !lines.is_empty() {
                    lines.push(Line::from(""));
                }
                lines.push(Line::from(vec![
                    Span::styled("── ", Style::default().fg(SUBDUED_BORDER)),
                    Span::styled(section.to_string(), Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
                    Span::styled(" ──", Style::default().fg(SUBDUED_BORDER)),
                ]));
            }

            let focused = index == state.focus;
            if focused {
                focus_line = lines.len();
            }
            lines.push(Self::label_line(field, focused));

            let value = state.session.value(&field.key);
            let editor = if focused { state.editor.as_ref() } else { None };
            lines.extend(Self::value_lines(field, value, focused, editor, state));

            if let Some(error) = state.field_error(field) {
                lines.push(Line::from(Span::styled(
                    format!("{INDENT}✗ {}", error.message),
                    Style::default().fg(ERROR_RED),
                )));
            }
        }

        let hints = state.session.hints();
        if !hints.is_empty() {
            lines.push(Line::from(""));
            for hint in hints {
                lines.push(Line::from(Span::styled(
                    format!("ℹ {hint}"),
                    Style::default().fg(WARNING_YELLOW),
                )));
            }
        }

        (lines, focus_line)
    }

    fn label_line(field: &FieldDef, focused: bool) -> Line<'static> {
        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(SOFT_WHITE)
        };
        let mut spans = vec![
            Span::styled(marker, Style::default().fg(CORNFLOWER_BLUE)),
            Span::styled(field.label.clone(), label_style),
        ];
        if field.required {
            spans.push(Span::styled(" *", Style::default().fg(ERROR_RED)));
        }
        Line::from(spans)
    }

    fn value_lines(
        field: &FieldDef,
        value: Option<FieldValue>,
        focused: bool,
        editor: Option<&TextInput>,
        state: &AppState,
    ) -> Vec<Line<'static>> {
        match field.kind {
            FieldKind::Text | FieldKind::Multiline | FieldKind::Date | FieldKind::Currency => {
                if let Some(editor) = editor {
                    return Self::editor_lines(editor, "");
                }
                let text = match value {
                    Some(FieldValue::Text(text)) => text,
                    _ => String::new(),
                };
                if text.is_empty() {
                    let placeholder = match field.kind {
                        FieldKind::Date => "YYYY-MM-DD",
                        FieldKind::Currency => "$0",
                        _ => "(empty)",
                    };
                    return vec![Self::muted(placeholder)];
                }
                text.lines()
                    .map(|line| Line::from(Span::styled(format!("{INDENT}{line}"), Style::default().fg(SOFT_WHITE))))
                    .collect()
            }
            FieldKind::Choice(options) => {
                let selected = match value {
                    Some(FieldValue::Selected(v)) => v,
                    _ => String::new(),
                };
                if focused {
                    Self::option_lines(options, state.option_cursor, |c| c.value == selected, ("(•)", "( )"))
                } else if let Some(choice) = options.iter().find(|c| c.value == selected) {
                    vec![Self::plain(choice.label)]
                } else {
                    vec![Self::muted("(not selected)")]
                }
            }
            FieldKind::MultiChoice(options) => {
                let selected = match value {
                    Some(FieldValue::Many(values)) => values,
                    _ => Vec::new(),
                };
                if focused {
                    Self::option_lines(options, state.option_cursor, |c| selected.iter().any(|v| v == c.value), ("[x]", "[ ]"))
                } else if selected.is_empty() {
                    vec![Self::muted("(none)")]
                } else {
                    let labels: Vec<&str> = options
                        .iter()
                        .filter(|c| selected.iter().any(|v| v == c.value))
                        .map(|c| c.label)
                        .collect();
                    vec![Self::plain(&labels.join(", "))]
                }
            }
            FieldKind::Rating(options) => {
                let rating = match value {
                    Some(FieldValue::Rating(r)) => r,
                    _ => 0,
                };
                if focused {
                    return Self::option_lines(options, state.option_cursor, |c| {
                        options.iter().position(|o| o.value == c.value).map(|p| p + 1) == Some(usize::from(rating))
                    }, ("(•)", "( )"));
                }
                if rating == 0 {
                    return vec![Self::muted("(not rated)")];
                }
                let stars: String = (1..=options.len())
                    .map(|i| if i <= usize::from(rating) { '★' } else { '☆' })
                    .collect();
                let label = options.get(usize::from(rating) - 1).map_or("", |c| c.label);
                vec![Line::from(vec![
                    Span::styled(format!("{INDENT}{stars} "), Style::default().fg(GOLD)),
                    Span::styled(label.to_string(), Style::default().fg(SOFT_WHITE)),
                ])]
            }
            FieldKind::Entries { hint } => {
                let mut lines = Self::entry_lines(value, focused, state.entry_cursor);
                if let Some(editor) = editor {
                    lines.extend(Self::editor_lines(editor, "+ "));
                }
                if focused {
                    lines.push(Self::muted(&format!("format: {hint}  ·  Enter to add, d to remove")));
                }
                lines
            }
            FieldKind::Attachment(kind) => {
                let mut lines = Self::entry_lines(value, focused, state.entry_cursor);
                if let Some(editor) = editor {
                    lines.extend(Self::editor_lines(editor, "path: "));
                }
                if focused {
                    lines.push(Self::muted(&format!("{}  ·  Enter a file path, d to remove", kind.hint())));
                }
                lines
            }
            FieldKind::Checkbox => {
                let checked = matches!(value, Some(FieldValue::Flag(true)));
                let text = if checked { "[x] Yes" } else { "[ ] No" };
                vec![Self::plain(text)]
            }
        }
    }

    fn option_lines(
        options: &'static [Choice],
        cursor: usize,
        is_selected: impl Fn(&Choice) -> bool,
        marks: (&str, &str),
    ) -> Vec<Line<'static>> {
        options
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let selected = is_selected(choice);
                let mark = if selected { marks.0 } else { marks.1 };
                let under_cursor = i == cursor;
                let style = if under_cursor {
                    Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
                } else if selected {
                    Style::default().fg(SELECTION_GREEN)
                } else {
                    Style::default().fg(SOFT_WHITE)
                };
                let pointer = if under_cursor { "› " } else { "  " };
                let mut spans = vec![
                    Span::styled(format!("{INDENT}{pointer}{mark} "), style),
                    Span::styled(choice.label.to_string(), style),
                ];
                if !choice.description.is_empty() {
                    spans.push(Span::styled(
                        format!(" · {}", choice.description),
                        Style::default().fg(MUTED_GRAY),
                    ));
                }
                Line::from(spans)
            })
            .collect()
    }

    fn entry_lines(value: Option<FieldValue>, focused: bool, cursor: usize) -> Vec<Line<'static>> {
        let items = match value {
            Some(FieldValue::Entries(items)) => items,
            _ => Vec::new(),
        };
        if items.is_empty() {
            return vec![Self::muted("(none)")];
        }
        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let highlighted = focused && i == cursor;
                let style = if highlighted {
                    Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(SOFT_WHITE)
                };
                Line::from(Span::styled(format!("{INDENT}• {item}"), style))
            })
            .collect()
    }

    /// Edit buffer with a block cursor, one line per text line
    fn editor_lines(editor: &TextInput, prefix: &str) -> Vec<Line<'static>> {
        let text = editor.value();
        let cursor = editor.cursor();
        let mut lines = Vec::new();
        let mut consumed = 0;

        for (n, line) in text.split('\n').enumerate() {
            let len = line.chars().count();
            let lead = if n == 0 { prefix } else { "" };
            let mut spans = vec![Span::styled(format!("{INDENT}{lead}"), Style::default().fg(CORNFLOWER_BLUE))];
            if (consumed..=consumed + len).contains(&cursor) {
                let at = cursor - consumed;
                let before: String = line.chars().take(at).collect();
                let under: String = line.chars().skip(at).take(1).collect();
                let after: String = line.chars().skip(at + 1).collect();
                spans.push(Span::styled(before, Style::default().fg(SOFT_WHITE)));
                spans.push(Span::styled(
                    if under.is_empty() { " ".to_string() } else { under },
                    Style::default().fg(DARK_BG).bg(SOFT_WHITE),
                ));
                spans.push(Span::styled(after, Style::default().fg(SOFT_WHITE)));
            } else {
                spans.push(Span::styled(line.to_string(), Style::default().fg(SOFT_WHITE)));
            }
            lines.push(Line::from(spans));
            consumed += len + 1;
        }
        lines
    }

    fn plain(text: &str) -> Line<'static> {
        Line::from(Span::styled(format!("{INDENT}{text}"), Style::default().fg(SOFT_WHITE)))
    }

    fn muted(text: &str) -> Line<'static> {
        Line::from(Span::styled(format!("{INDENT}{text}"), Style::default().fg(MUTED_GRAY)))
    }
}

impl Default for FormComponent {
    fn default() -> Self {
        Self::new()
    }
}

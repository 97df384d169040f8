//! Field rendering utilities for forms

use crate::state::forms::{ControlKind, FieldStatus, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::ops::Range;

const CURSOR: &str = "▌";

/// Rows a field occupies: label, bordered control, and the error line when shown
pub fn field_height(field: &FormField, status: Option<&FieldStatus>, textarea_rows: u16) -> u16 {
    let error_rows = u16::from(status.and_then(FieldStatus::visible_error).is_some());
    1 + field.content_rows(textarea_rows) + 2 + error_rows
}

/// Range of fields to draw so the focused one fits in `available` rows.
///
/// `active` may point past the last field (the submit button), in which case
/// the window ends at the last field.
pub fn visible_window(heights: &[u16], active: usize, available: u16) -> Range<usize> {
    if heights.is_empty() {
        return 0..0;
    }
    let target = active.min(heights.len() - 1);
    let total = |range: Range<usize>| heights[range].iter().map(|h| u32::from(*h)).sum::<u32>();

    let mut start = 0;
    while start < target && total(start..target + 1) > u32::from(available) {
        start += 1;
    }

    let mut end = start + 1;
    while end < heights.len() && total(start..end + 1) <= u32::from(available) {
        end += 1;
    }
    start..end
}

/// Draw one field: label line, control, and its error when visible
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    status: Option<&FieldStatus>,
    is_active: bool,
) {
    if area.height == 0 {
        return;
    }

    let label_area = Rect { height: 1, ..area };
    frame.render_widget(Paragraph::new(label_line(field, is_active)), label_area);

    let error = status.and_then(FieldStatus::visible_error);
    let error_rows = u16::from(error.is_some());
    let control_height = area.height.saturating_sub(1 + error_rows);
    if control_height == 0 {
        return;
    }
    let control_area = Rect {
        y: area.y + 1,
        height: control_height,
        ..area
    };
    draw_control(frame, control_area, field, is_active, error.is_some());

    if let Some(message) = error {
        let error_area = Rect {
            y: control_area.y + control_height,
            height: 1,
            ..area
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(Color::Red))),
            error_area,
        );
    }
}

/// Label followed by a red asterisk for required fields
fn label_line(field: &FormField, is_active: bool) -> Line<'_> {
    let label_style = if is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let mut spans = vec![Span::styled(field.label(), label_style)];
    if field.is_required() {
        spans.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    Line::from(spans)
}

fn draw_control(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool, has_error: bool) {
    let border_style = if has_error {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = match &field.kind {
        ControlKind::Input { input_type } => format!(" {input_type} "),
        ControlKind::TextArea => " textarea ".to_string(),
        ControlKind::Select { .. } => " select ".to_string(),
    };
    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(Color::DarkGray)))
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    let content = match &field.kind {
        ControlKind::Select { selected, .. } => select_line(field, selected.is_none(), is_active),
        _ => text_content(field, is_active, inner.width, inner.height),
    };

    frame.render_widget(Paragraph::new(content).block(block), area);
}

/// Current choice between arrows; the placeholder is dimmed
fn select_line(field: &FormField, on_placeholder: bool, is_active: bool) -> Vec<Line<'static>> {
    let value_style = if on_placeholder {
        Style::default().fg(Color::DarkGray)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let arrow_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    vec![Line::from(vec![
        Span::styled("◀ ", arrow_style),
        Span::styled(field.display_value(), value_style),
        Span::styled(" ▶", arrow_style),
    ])]
}

/// Text of an input or textarea, with cursor and placeholder, scrolled so the
/// end of the value stays inside a `width` x `rows` box
fn text_content(field: &FormField, is_active: bool, width: u16, rows: u16) -> Vec<Line<'static>> {
    let display = field.display_value();
    let cursor = Span::styled(
        if is_active { CURSOR } else { "" },
        Style::default().fg(Color::Cyan),
    );

    if display.is_empty() {
        let placeholder = field.attributes.placeholder().unwrap_or_default();
        return vec![Line::from(vec![
            cursor,
            Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray)),
        ])];
    }

    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let width = usize::from(width);
    let visible = if field.is_multiline() {
        wrap_tail(&display, width, usize::from(rows), is_active)
    } else {
        vec![tail_chars(&display, width.saturating_sub(usize::from(is_active)))]
    };

    let mut lines: Vec<Line> = visible
        .into_iter()
        .map(|l| Line::from(Span::styled(l, style)))
        .collect();
    if let Some(last) = lines.last_mut() {
        last.spans.push(cursor);
    }
    lines
}

/// Last `width` characters of a single-line value
fn tail_chars(text: &str, width: usize) -> String {
    let len = text.chars().count();
    text.chars().skip(len.saturating_sub(width)).collect()
}

/// Hard-wrap `text` at `width` characters and keep the last `rows` rows.
///
/// With `cursor`, a full last row gets an empty row after it so the cursor
/// has a cell to sit in.
fn wrap_tail(text: &str, width: usize, rows: usize, cursor: bool) -> Vec<String> {
    let width = width.max(1);
    // split('\n') keeps a trailing empty line so the cursor follows a newline
    let mut wrapped: Vec<String> = Vec::new();
    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            wrapped.push(String::new());
            continue;
        }
        wrapped.extend(chars.chunks(width).map(|chunk| chunk.iter().collect::<String>()));
    }
    if cursor && wrapped.last().is_some_and(|l| l.chars().count() >= width) {
        wrapped.push(String::new());
    }
    let skip = wrapped.len().saturating_sub(rows.max(1));
    wrapped.split_off(skip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{FieldDefinition, DEFAULT_TEXTAREA_ROWS};
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn render(field: &FormField, status: Option<&FieldStatus>, is_active: bool) -> String {
        let backend = TestBackend::new(40, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let height = field_height(field, status, DEFAULT_TEXTAREA_ROWS);
                let area = Rect {
                    height: height.min(frame.area().height),
                    ..frame.area()
                };
                draw_field(frame, area, field, status, is_active)
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    mod heights {
        use super::*;

        #[test]
        fn test_input_height() {
            let field = FormField::from_definition(FieldDefinition::new("a", "A", "text"));
            assert_eq!(field_height(&field, None, 4), 4);
        }

        #[test]
        fn test_textarea_height_uses_rows() {
            let mut definition = FieldDefinition::new("a", "A", "textarea");
            let field = FormField::from_definition(definition.clone());
            assert_eq!(field_height(&field, None, 4), 7);
            definition.extra.insert("rows".into(), json!(2));
            let field = FormField::from_definition(definition);
            assert_eq!(field_height(&field, None, 4), 5);
        }

        #[test]
        fn test_visible_error_adds_a_row() {
            let field = FormField::from_definition(FieldDefinition::new("a", "A", "text"));
            let status = FieldStatus {
                touched: true,
                error: "feil".to_string(),
            };
            assert_eq!(field_height(&field, Some(&status), 4), 5);
        }
    }

    mod window {
        use super::*;

        #[test]
        fn test_everything_fits() {
            assert_eq!(visible_window(&[4, 4, 4], 0, 20), 0..3);
        }

        #[test]
        fn test_scrolls_to_active() {
            assert_eq!(visible_window(&[4, 4, 4, 4], 3, 9), 2..4);
        }

        #[test]
        fn test_submit_slot_shows_last_fields() {
            assert_eq!(visible_window(&[4, 4, 4], 3, 8), 1..3);
        }

        #[test]
        fn test_oversized_field_still_drawn() {
            assert_eq!(visible_window(&[10, 4], 0, 5), 0..1);
        }

        #[test]
        fn test_empty_form() {
            assert_eq!(visible_window(&[], 0, 10), 0..0);
        }
    }

    mod scrolling {
        use super::*;

        #[test]
        fn test_tail_chars_keeps_end() {
            assert_eq!(tail_chars("abcdefg", 3), "efg");
            assert_eq!(tail_chars("ab", 5), "ab");
            assert_eq!(tail_chars("ab", 0), "");
        }

        #[test]
        fn test_wrap_tail_keeps_last_rows() {
            assert_eq!(wrap_tail("l1\nl2\nl3", 10, 2, false), vec!["l2", "l3"]);
            assert_eq!(wrap_tail("abcdefg", 3, 2, false), vec!["def", "g"]);
        }

        #[test]
        fn test_wrap_tail_makes_room_for_cursor() {
            assert_eq!(wrap_tail("abcdef", 3, 2, true), vec!["def", ""]);
            assert_eq!(wrap_tail("abc\n", 3, 4, true), vec!["abc", ""]);
        }

        #[test]
        fn test_long_input_shows_end_and_cursor() {
            let mut field = FormField::from_definition(FieldDefinition::new("a", "A", "text"));
            for c in "x".repeat(60).chars().chain("SLUTT".chars()) {
                field.push_char(c);
            }
            let screen = render(&field, None, true);
            assert!(screen.contains("SLUTT▌"));
        }

        #[test]
        fn test_textarea_scrolls_to_last_line() {
            let mut definition = FieldDefinition::new("m", "Melding", "textarea");
            definition.extra.insert("rows".into(), json!(2));
            let mut field = FormField::from_definition(definition);
            for c in "en\nto\ntre\nfire".chars() {
                field.push_char(c);
            }
            let screen = render(&field, None, true);
            assert!(screen.contains("│fire▌"));
            assert!(screen.contains("│tre"));
            assert!(!screen.contains("│en"));
            assert!(!screen.contains("│to"));
        }
    }

    mod drawing {
        use super::*;

        #[test]
        fn test_required_marker_and_label() {
            let mut definition = FieldDefinition::new("name", "Name", "text");
            definition.required = true;
            let field = FormField::from_definition(definition);
            let screen = render(&field, None, false);
            assert!(screen.contains("Name *"));
            assert!(screen.contains(" text "));
        }

        #[test]
        fn test_error_only_when_touched() {
            let field = FormField::from_definition(FieldDefinition::new("a", "A", "text"));
            let mut status = FieldStatus {
                touched: false,
                error: "Dette feltet er påkrevd.".to_string(),
            };
            assert!(!render(&field, Some(&status), false).contains("påkrevd"));
            status.touched = true;
            assert!(render(&field, Some(&status), false).contains("påkrevd"));
        }

        #[test]
        fn test_select_shows_placeholder() {
            let mut definition = FieldDefinition::new("s", "Emne", "select");
            definition.options = Some(vec!["Ros".to_string()]);
            let field = FormField::from_definition(definition);
            assert!(render(&field, None, true).contains("Velg..."));
        }

        #[test]
        fn test_placeholder_attribute_shown_when_empty() {
            let mut definition = FieldDefinition::new("a", "A", "email");
            definition.extra.insert("placeholder".into(), json!("navn@epost.no"));
            let field = FormField::from_definition(definition);
            let screen = render(&field, None, false);
            assert!(screen.contains("navn@epost.no"));
            assert!(screen.contains(" email "));
        }
    }
}

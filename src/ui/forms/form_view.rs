//! Loaded form rendering: title, scrolled field list, notice and submit button

use super::field_renderer::{draw_field, field_height, visible_window};
use crate::state::forms::LoadedForm;
use crate::ui::components::{button_width, render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const SUBMIT_LABEL: &str = "Send inn";

/// Draw a loaded form inside `area`
pub fn draw_form(frame: &mut Frame, area: Rect, form: &LoadedForm, textarea_rows: u16) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", form.title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                // Fields
            Constraint::Length(1),             // Notice
            Constraint::Length(BUTTON_HEIGHT), // Submit
        ])
        .horizontal_margin(1)
        .split(inner);

    draw_fields(frame, chunks[0], form, textarea_rows);

    if let Some(notice) = &form.notice {
        frame.render_widget(
            Paragraph::new(Span::styled(notice.as_str(), Style::default().fg(Color::Red))),
            chunks[1],
        );
    }

    let button_area = Rect {
        width: button_width(SUBMIT_LABEL).min(chunks[2].width),
        ..chunks[2]
    };
    render_button(frame, button_area, SUBMIT_LABEL, form.is_submit_active());
}

fn draw_fields(frame: &mut Frame, area: Rect, form: &LoadedForm, textarea_rows: u16) {
    let heights: Vec<u16> = form
        .fields
        .iter()
        .map(|field| field_height(field, form.status_of(field), textarea_rows))
        .collect();
    let window = visible_window(&heights, form.active_field_index, area.height);

    let mut y = area.y;
    let bottom = area.y + area.height;
    for index in window {
        if y >= bottom {
            break;
        }
        let field = &form.fields[index];
        let height = heights[index].min(bottom - y);
        let field_area = Rect {
            y,
            height,
            ..area
        };
        draw_field(
            frame,
            field_area,
            field,
            form.status_of(field),
            index == form.active_field_index,
        );
        y += height;
    }
}

//! File prompt shown until a form loads

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub const UPLOAD_PROMPT: &str = "Velg en .json fil som skal bli renderet!";
const PROMPT_HINT: &str = "Skriv stien til skjemafilen og trykk Enter";
const PROMPT_WIDTH: u16 = 72;

/// Draw the upload prompt with any load error beneath it
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let width = PROMPT_WIDTH.min(area.width);
    let centered = Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Top padding
            Constraint::Length(1), // Heading
            Constraint::Length(1), // Hint
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Path input
            Constraint::Length(3), // Error
            Constraint::Min(0),    // Bottom padding
        ])
        .split(centered);

    frame.render_widget(
        Paragraph::new(Span::styled(
            UPLOAD_PROMPT,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(PROMPT_HINT, Style::default().fg(Color::DarkGray))),
        chunks[2],
    );

    let error = app.state.upload_error();
    let border_style = if error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let title = if app.state.is_loading() {
        " Laster... "
    } else {
        " Fil "
    };
    let input = Paragraph::new(Line::from(vec![
        Span::raw(app.state.path_input.as_str()),
        Span::styled("▌", Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(input, chunks[4]);

    if let Some(message) = error {
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(Color::Red)))
                .wrap(Wrap { trim: true }),
            chunks[5],
        );
    }
}

//! Confirmation shown after a successful submit

use crate::state::forms::SubmissionPayload;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub const CONFIRMATION: &str = "Skjemaet ditt er sendt inn! 🥳🎉";

/// Draw the confirmation with a summary of the submitted values
pub fn draw(frame: &mut Frame, area: Rect, payload: Option<&SubmissionPayload>) {
    let summary: Vec<Line> = payload
        .filter(|payload| !payload.is_empty())
        .map(|payload| {
            payload
                .iter()
                .map(|(name, value)| {
                    Line::from(vec![
                        Span::styled(format!("{name}: "), Style::default().fg(Color::DarkGray)),
                        Span::raw(value.replace('\n', " ⏎ ")),
                    ])
                })
                .collect()
        })
        .unwrap_or_default();
    let summary_height = u16::try_from(summary.len()).unwrap_or(u16::MAX);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),              // Message
            Constraint::Length(1),
            Constraint::Length(summary_height), // Submitted values
            Constraint::Length(1),
            Constraint::Length(1),              // Hint
            Constraint::Min(0),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            CONFIRMATION,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(summary).alignment(Alignment::Center),
        chunks[3],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Trykk q for å avslutte",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
        chunks[5],
    );
}

//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod submitted;
mod upload;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let main_area = layout::create_layout(frame.area());

    match app.state.current_view() {
        View::Upload => upload::draw(frame, main_area, app),
        View::Form => {
            if let Some(form) = app.state.form() {
                forms::draw_form(frame, main_area, form, app.state.textarea_rows);
            }
        }
        View::Submitted => submitted::draw(frame, main_area, app.submitted_payload()),
    }

    layout::draw_status_bar(frame, app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TuiConfig;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    const CONTACT: &str = r#"{"title":"Kontakt","fields":[{"label":"Navn","name":"name","type":"text","required":true}]}"#;

    fn screen(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn loaded_app() -> App {
        let mut app = App::new(TuiConfig::default(), None);
        app.state
            .container
            .as_mut()
            .unwrap()
            .load_bytes(CONTACT.as_bytes())
            .unwrap();
        app
    }

    #[test]
    fn test_upload_screen() {
        let app = App::new(TuiConfig::default(), Some("skjema.json".to_string()));
        let rendered = screen(&app);
        assert!(rendered.contains(upload::UPLOAD_PROMPT));
        assert!(rendered.contains("skjema.json"));
        assert!(rendered.contains("Esc:quit"));
    }

    #[test]
    fn test_upload_screen_shows_load_error() {
        let mut app = App::new(TuiConfig::default(), None);
        let _ = app.state.container.as_mut().unwrap().load_bytes(b"[]");
        let rendered = screen(&app);
        assert!(rendered.contains("Ugyldig JSON-struktur."));
    }

    #[test]
    fn test_form_screen() {
        let app = loaded_app();
        let rendered = screen(&app);
        assert!(rendered.contains("Kontakt"));
        assert!(rendered.contains("Navn *"));
        assert!(rendered.contains("Send inn"));
    }

    #[test]
    fn test_confirmation_screen() {
        let mut app = loaded_app();
        for c in "Ada".chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
                .unwrap();
        }
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .unwrap();
        let rendered = screen(&app);
        assert!(rendered.contains("Skjemaet ditt er sendt inn!"));
        assert!(rendered.contains("name: Ada"));
        assert!(!rendered.contains("Navn"));
    }
}

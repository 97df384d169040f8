//! Application state and core logic

use crate::config::TuiConfig;
use crate::platform::SUBMIT_MODIFIER;
use crate::state::forms::{FileRead, Form, SubmissionPayload, DEFAULT_TEXTAREA_ROWS};
use crate::state::{AppState, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// User configuration
    pub config: TuiConfig,
    /// Whether the app should quit
    quit: bool,
    /// Whether config changes are written back to disk
    persist_config: bool,
    /// Completed file reads from spawned tasks
    read_tx: UnboundedSender<FileRead>,
    read_rx: UnboundedReceiver<FileRead>,
}

impl App {
    /// Create a new App instance.
    ///
    /// `initial_path` (from the command line) takes precedence over the
    /// last path stored in the config for prefilling the upload prompt.
    pub fn new(config: TuiConfig, initial_path: Option<String>) -> Self {
        let (read_tx, read_rx) = mpsc::unbounded_channel();
        let prefill = initial_path.or_else(|| config.last_form_path.clone());
        let rows = config.textarea_rows_or(DEFAULT_TEXTAREA_ROWS);
        Self {
            state: AppState::new(prefill, rows),
            config,
            quit: false,
            persist_config: true,
            read_tx,
            read_rx,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Payload of the submitted form, if any
    pub fn submitted_payload(&self) -> Option<&SubmissionPayload> {
        self.state.submission.payload.as_ref()
    }

    /// Select the file named in the upload prompt and start reading it
    pub fn select_file(&mut self) {
        let Some(path) = self.state.prompt_path() else {
            return;
        };
        let tx = self.read_tx.clone();
        if let Some(container) = self.state.container.as_mut() {
            if container.select_file(PathBuf::from(&path), tx).is_some() {
                self.state.status_message = Some(format!("Leser {path} ..."));
            } else {
                self.state.status_message = None;
            }
        }
    }

    /// Apply any file reads that completed since the last call
    pub fn poll_file_reads(&mut self) {
        while let Ok(read) = self.read_rx.try_recv() {
            let path = read.path.clone();
            let Some(container) = self.state.container.as_mut() else {
                continue;
            };
            if !container.finish_read(read) {
                continue;
            }
            self.state.status_message = None;
            if container.form().is_some() {
                self.remember_path(path);
            }
        }
    }

    /// Store the last successfully loaded path in the config
    fn remember_path(&mut self, path: PathBuf) {
        self.config.last_form_path = Some(path.display().to_string());
        if !self.persist_config {
            return;
        }
        if let Err(err) = self.config.save() {
            tracing::warn!("Failed to save config: {err:#}");
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.state.current_view() {
            View::Upload => self.handle_upload_key(key),
            View::Form => self.handle_form_key(key),
            View::Submitted => self.handle_submitted_key(key),
        }
    }

    /// Handle keys on the upload prompt
    fn handle_upload_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.quit(),
            KeyCode::Enter => self.select_file(),
            KeyCode::Backspace => self.state.prompt_backspace(),
            KeyCode::Char(c) if !has_command_modifier(&key) => self.state.prompt_input_char(c),
            _ => {}
        }
        Ok(())
    }

    /// Handle keys while a form is shown
    fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        // Submit shortcut works from anywhere in the form
        if matches!(key.code, KeyCode::Char('s') | KeyCode::Char('S'))
            && (key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(SUBMIT_MODIFIER))
        {
            self.submit();
            return Ok(());
        }

        let Some(form) = self.state.form_mut() else {
            return Ok(());
        };
        let on_submit = form.is_submit_active();
        let (is_select, is_multiline) = form
            .active()
            .map(|f| (f.is_select(), f.is_multiline()))
            .unwrap_or_default();

        match key.code {
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left if is_select => form.select_prev_option(),
            KeyCode::Right if is_select => form.select_next_option(),
            KeyCode::Char(' ') if is_select => form.select_next_option(),
            KeyCode::Enter if on_submit => self.submit(),
            KeyCode::Enter if is_multiline => form.input_newline(),
            // Enter in a single-line input submits the form
            KeyCode::Enter if !is_select => self.submit(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) if !has_command_modifier(&key) => form.input_char(c),
            _ => {}
        }
        Ok(())
    }

    /// Handle keys on the confirmation screen
    fn handle_submitted_key(&mut self, key: KeyEvent) -> Result<()> {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            self.quit();
        }
        Ok(())
    }

    fn submit(&mut self) {
        if self.state.submit_form() {
            self.state.status_message = None;
        }
    }
}

/// True when a key carries Ctrl/Alt and should not be typed as text
fn has_command_modifier(key: &KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
}

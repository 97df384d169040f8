//! Application state definitions

use super::forms::{FormContainer, LoadedForm, SubmissionPayload, SubmitHandler};

/// Screen currently shown, derived from the state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// File prompt, with an error banner after a failed load
    #[default]
    Upload,
    Form,
    /// Confirmation after a successful submit
    Submitted,
}

/// Top-level "form submitted" flag. Receives the container's submit signal.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub submitted: bool,
    pub payload: Option<SubmissionPayload>,
}

impl SubmitHandler for Submission {
    fn form_submitted(&mut self, payload: &SubmissionPayload) {
        self.submitted = true;
        self.payload = Some(payload.clone());
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Shell
    pub submission: Submission,

    // Form container; dropped once the form is submitted
    pub container: Option<FormContainer>,

    // Upload prompt
    pub path_input: String,

    // UI state
    pub status_message: Option<String>,
    pub textarea_rows: u16,
}

impl AppState {
    pub fn new(initial_path: Option<String>, textarea_rows: u16) -> Self {
        Self {
            container: Some(FormContainer::new()),
            path_input: initial_path.unwrap_or_default(),
            textarea_rows,
            ..Default::default()
        }
    }

    pub fn current_view(&self) -> View {
        if self.submission.submitted {
            return View::Submitted;
        }
        match self.container.as_ref().and_then(FormContainer::form) {
            Some(_) => View::Form,
            None => View::Upload,
        }
    }

    pub fn form(&self) -> Option<&LoadedForm> {
        self.container.as_ref().and_then(FormContainer::form)
    }

    pub fn form_mut(&mut self) -> Option<&mut LoadedForm> {
        self.container.as_mut().and_then(FormContainer::form_mut)
    }

    /// Error banner text for the upload prompt
    pub fn upload_error(&self) -> Option<&str> {
        self.container.as_ref().and_then(FormContainer::error)
    }

    pub fn is_loading(&self) -> bool {
        self.container
            .as_ref()
            .is_some_and(FormContainer::is_loading)
    }

    /// Submit the loaded form. Returns true when the form was submitted.
    pub fn submit_form(&mut self) -> bool {
        let Some(form) = self.container.as_mut().and_then(FormContainer::form_mut) else {
            return false;
        };
        form.submit(&mut self.submission);
        if self.submission.submitted {
            // Unmount the form entirely
            self.container = None;
        }
        self.submission.submitted
    }

    /// Type a character into the upload prompt
    pub fn prompt_input_char(&mut self, c: char) {
        self.path_input.push(c);
    }

    /// Remove the last character from the upload prompt
    pub fn prompt_backspace(&mut self) {
        self.path_input.pop();
    }

    /// Current prompt value as a path, trimmed and with surrounding quotes removed
    pub fn prompt_path(&self) -> Option<String> {
        let trimmed = self.path_input.trim();
        let unquoted = trimmed
            .strip_prefix(&['"', '\''][..])
            .and_then(|s| s.strip_suffix(&['"', '\''][..]))
            .unwrap_or(trimmed);
        (!unquoted.is_empty()).then(|| unquoted.to_string())
    }
}

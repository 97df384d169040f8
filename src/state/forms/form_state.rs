//! Loaded form state: controls, focus, validation and submission

use super::definition::FormDefinition;
use super::field::{FieldStatus, FormField};
use super::validator::{native_violation, validate};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Trait for common focus navigation
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Field name -> submitted value, in render order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionPayload {
    entries: Vec<(String, String)>,
}

impl SubmissionPayload {
    /// Add an entry. A repeated name keeps its first position and takes the new value.
    pub fn insert(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl Serialize for SubmissionPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Receives the "form submitted" signal
#[cfg_attr(test, mockall::automock)]
pub trait SubmitHandler {
    fn form_submitted(&mut self, payload: &SubmissionPayload);
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted(SubmissionPayload),
    /// A control failed the native constraint check and took focus
    Blocked { field: usize, message: String },
}

/// A successfully loaded form, ready for input
#[derive(Debug, Clone)]
pub struct LoadedForm {
    pub title: String,
    pub fields: Vec<FormField>,
    /// Validation state keyed by field name
    pub status: HashMap<String, FieldStatus>,
    /// Focused slot; `fields.len()` is the submit button
    pub active_field_index: usize,
    /// Message from the last blocked submit attempt
    pub notice: Option<String>,
}

impl LoadedForm {
    pub fn new(definition: FormDefinition) -> Self {
        let fields: Vec<FormField> = definition
            .fields
            .into_iter()
            .map(FormField::from_definition)
            .collect();
        let status = fields
            .iter()
            .map(|f| (f.name().to_string(), FieldStatus::default()))
            .collect();
        Self {
            title: definition.title,
            fields,
            status,
            active_field_index: 0,
            notice: None,
        }
    }

    /// Returns true if the submit button is focused
    pub fn is_submit_active(&self) -> bool {
        self.active_field_index == self.fields.len()
    }

    pub fn active(&self) -> Option<&FormField> {
        self.fields.get(self.active_field_index)
    }

    pub fn status_of(&self, field: &FormField) -> Option<&FieldStatus> {
        self.status.get(field.name())
    }

    /// Focus a slot directly, blurring the control that had focus
    pub fn focus(&mut self, index: usize) {
        self.set_active_field(index);
    }

    /// Mark a field touched and validate it
    pub fn blur(&mut self, index: usize) {
        let Some(field) = self.fields.get(index) else {
            return;
        };
        let error = validate(&field.definition, field.value(), &field.control_type());
        let status = self.status.entry(field.name().to_string()).or_default();
        status.touched = true;
        status.error = error;
    }

    /// Re-validate after an edit, but only once the field has been touched
    fn changed(&mut self, index: usize) {
        let Some(field) = self.fields.get(index) else {
            return;
        };
        if let Some(status) = self.status.get_mut(field.name()) {
            if status.touched {
                status.error = validate(&field.definition, field.value(), &field.control_type());
            }
        }
    }

    fn edit_active(&mut self, edit: impl FnOnce(&mut FormField) -> bool) {
        let index = self.active_field_index;
        let changed = self.fields.get_mut(index).is_some_and(edit);
        if changed {
            self.notice = None;
            self.changed(index);
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.edit_active(|f| f.push_char(c));
    }

    pub fn input_newline(&mut self) {
        self.edit_active(FormField::push_newline);
    }

    pub fn backspace(&mut self) {
        self.edit_active(FormField::pop_char);
    }

    pub fn select_next_option(&mut self) {
        self.edit_active(FormField::select_next);
    }

    pub fn select_prev_option(&mut self) {
        self.edit_active(FormField::select_prev);
    }

    /// Gather every named control's value
    pub fn payload(&self) -> SubmissionPayload {
        let mut payload = SubmissionPayload::default();
        for field in &self.fields {
            payload.insert(field.name(), field.value());
        }
        payload
    }

    /// Attempt to submit.
    ///
    /// The first control that fails the native constraint check takes focus
    /// and blocks the submission. Otherwise the payload is logged and handed
    /// to `handler`.
    pub fn submit(&mut self, handler: &mut dyn SubmitHandler) -> SubmitOutcome {
        // Read-only controls are barred from constraint validation
        let blocked = self
            .fields
            .iter()
            .enumerate()
            .filter(|(_, field)| !field.attributes.is_read_only())
            .find_map(|(index, field)| {
                native_violation(&field.definition, field.value(), &field.control_type())
                    .map(|message| (index, message))
            });

        if let Some((index, message)) = blocked {
            tracing::debug!(field = %self.fields[index].name(), "Submit blocked: {message}");
            self.focus(index);
            self.blur(index);
            self.notice = Some(message.clone());
            return SubmitOutcome::Blocked {
                field: index,
                message,
            };
        }

        // Submitting blurs the focused control
        self.blur(self.active_field_index);
        self.notice = None;
        let payload = self.payload();
        tracing::info!(fields = payload.len(), payload = %payload.to_json(), "Submitted data");
        handler.form_submitted(&payload);
        SubmitOutcome::Submitted(payload)
    }
}

impl Form for LoadedForm {
    fn field_count(&self) -> usize {
        self.fields.len() + 1 // fields + submit button
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        let index = index.min(self.fields.len());
        if index != self.active_field_index {
            self.blur(self.active_field_index);
        }
        self.active_field_index = index;
    }
}

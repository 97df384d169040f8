//! Rendered form controls and their runtime values

use super::definition::FieldDefinition;
use super::validator::{SELECT_CONTROL, TEXTAREA_CONTROL, TEXT_CONTROL};
use serde_json::{Map, Value};

/// Label of the placeholder entry shown by selects before a choice is made
pub const SELECT_PLACEHOLDER: &str = "Velg...";

/// Content rows of a textarea without a `rows` attribute
pub const DEFAULT_TEXTAREA_ROWS: u16 = 4;

/// Input types a browser recognizes; anything else behaves as `text`
const KNOWN_INPUT_TYPES: &[&str] = &[
    "button",
    "checkbox",
    "color",
    "date",
    "datetime-local",
    "email",
    "file",
    "hidden",
    "image",
    "month",
    "number",
    "password",
    "radio",
    "range",
    "reset",
    "search",
    "submit",
    "tel",
    "text",
    "time",
    "url",
    "week",
];

/// Which widget a field renders as
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    /// Single-line input; carries the declared type string verbatim
    Input { input_type: String },
    TextArea,
    /// Dropdown; `selected` is `None` while the placeholder is shown
    Select {
        options: Vec<String>,
        selected: Option<usize>,
    },
}

impl ControlKind {
    pub fn for_field(field: &FieldDefinition) -> Self {
        if field.is_select() {
            ControlKind::Select {
                options: field.select_options().to_vec(),
                selected: None,
            }
        } else if field.is_textarea() {
            ControlKind::TextArea
        } else {
            ControlKind::Input {
                input_type: field.field_type.clone(),
            }
        }
    }

    /// The type this control reports to validation
    pub fn control_type(&self) -> String {
        match self {
            ControlKind::Input { input_type } => {
                let lowered = input_type.to_ascii_lowercase();
                if KNOWN_INPUT_TYPES.contains(&lowered.as_str()) {
                    lowered
                } else {
                    TEXT_CONTROL.to_string()
                }
            }
            ControlKind::TextArea => TEXTAREA_CONTROL.to_string(),
            ControlKind::Select { .. } => SELECT_CONTROL.to_string(),
        }
    }
}

/// Attributes forwarded from the field definition to its control
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlAttributes(Map<String, Value>);

impl ControlAttributes {
    /// Collect pass-through attributes. Selects receive none.
    pub fn for_field(field: &FieldDefinition) -> Self {
        let mut map = Map::new();
        if field.is_select() {
            return Self(map);
        }
        if let Some(min) = &field.min_length {
            map.insert("minLength".to_string(), Value::String(min.raw.clone()));
        }
        if let Some(max) = &field.max_length {
            map.insert("maxLength".to_string(), Value::String(max.raw.clone()));
        }
        for (key, value) in &field.extra {
            map.insert(key.clone(), value.clone());
        }
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.get("placeholder").and_then(Value::as_str)
    }

    /// Typing limit taken from a forwarded `maxLength`
    pub fn max_chars(&self) -> Option<usize> {
        match self.get("maxLength")? {
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
        .filter(|limit| limit.is_finite() && *limit >= 0.0)
        .map(|limit| limit.floor() as usize)
    }

    /// Textarea height from a `rows` attribute
    pub fn rows(&self) -> Option<u16> {
        match self.get("rows")? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        }
        .filter(|rows| *rows > 0)
        .map(|rows| rows.min(u16::MAX as u64) as u16)
    }

    pub fn is_read_only(&self) -> bool {
        matches!(
            self.get("readOnly").or_else(|| self.get("readonly")),
            Some(Value::Bool(true))
        )
    }
}

/// Validation record for one field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldStatus {
    /// Set on first blur; enables live validation
    pub touched: bool,
    /// Current message, empty when valid
    pub error: String,
}

impl FieldStatus {
    /// Error to display, if the field has been touched and has one
    pub fn visible_error(&self) -> Option<&str> {
        (self.touched && !self.error.is_empty()).then_some(self.error.as_str())
    }
}

/// A rendered control with its current value
#[derive(Debug, Clone)]
pub struct FormField {
    pub definition: FieldDefinition,
    pub kind: ControlKind,
    pub attributes: ControlAttributes,
    value: String,
}

impl FormField {
    pub fn from_definition(definition: FieldDefinition) -> Self {
        Self {
            kind: ControlKind::for_field(&definition),
            attributes: ControlAttributes::for_field(&definition),
            definition,
            value: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn label(&self) -> &str {
        &self.definition.label
    }

    pub fn is_required(&self) -> bool {
        self.definition.required
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self.kind, ControlKind::TextArea)
    }

    pub fn is_select(&self) -> bool {
        matches!(self.kind, ControlKind::Select { .. })
    }

    pub fn control_type(&self) -> String {
        self.kind.control_type()
    }

    /// The value this control submits
    pub fn value(&self) -> &str {
        &self.value
    }

    fn accepts_text(&self) -> bool {
        !self.is_select() && !self.attributes.is_read_only()
    }

    /// Push a character to the value. Returns true when the value changed.
    pub fn push_char(&mut self, c: char) -> bool {
        if !self.accepts_text() {
            return false;
        }
        if let Some(limit) = self.attributes.max_chars() {
            if self.value.chars().count() >= limit {
                return false;
            }
        }
        self.value.push(c);
        true
    }

    /// Insert a line break (textareas only)
    pub fn push_newline(&mut self) -> bool {
        self.is_multiline() && self.push_char('\n')
    }

    /// Remove the last character. Returns true when the value changed.
    pub fn pop_char(&mut self) -> bool {
        self.accepts_text() && self.value.pop().is_some()
    }

    /// Choose the next select option, wrapping past the end
    pub fn select_next(&mut self) -> bool {
        self.step_selection(true)
    }

    /// Choose the previous select option, wrapping past the start
    pub fn select_prev(&mut self) -> bool {
        self.step_selection(false)
    }

    fn step_selection(&mut self, forward: bool) -> bool {
        let ControlKind::Select { options, selected } = &mut self.kind else {
            return false;
        };
        if options.is_empty() {
            return false;
        }
        let last = options.len() - 1;
        let next = match (*selected, forward) {
            (None, true) => 0,
            (None, false) => last,
            (Some(i), true) if i >= last => 0,
            (Some(i), true) => i + 1,
            (Some(0), false) => last,
            (Some(i), false) => i - 1,
        };
        *selected = Some(next);
        self.value = options[next].clone();
        true
    }

    /// Text shown inside the control
    pub fn display_value(&self) -> String {
        match &self.kind {
            ControlKind::Select { selected: None, .. } => SELECT_PLACEHOLDER.to_string(),
            ControlKind::Input { input_type } if input_type.eq_ignore_ascii_case("password") => {
                "•".repeat(self.value.chars().count())
            }
            _ => self.value.clone(),
        }
    }

    /// Content rows this control needs, excluding borders
    pub fn content_rows(&self, default_textarea_rows: u16) -> u16 {
        if self.is_multiline() {
            self.attributes.rows().unwrap_or(default_textarea_rows)
        } else {
            1
        }
    }
}

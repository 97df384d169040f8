//! Typed form definitions produced by the loader

use serde_json::{Map, Value};

/// Field type that renders as a dropdown
pub const SELECT_TYPE: &str = "select";

/// Field type that renders as a multi-line text area
pub const TEXTAREA_TYPE: &str = "textarea";

/// Keys of a field object that map onto typed members of [`FieldDefinition`].
/// Everything else ends up in `extra`.
pub(crate) const RECOGNIZED_KEYS: &[&str] = &[
    "label",
    "name",
    "type",
    "required",
    "options",
    "minLength",
    "maxLength",
    "errorMessage",
];

/// A complete form: title plus ordered fields
#[derive(Debug, Clone, PartialEq)]
pub struct FormDefinition {
    pub title: String,
    pub fields: Vec<FieldDefinition>,
}

/// Declarative description of one form control
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub label: String,
    /// Declared type string, kept verbatim
    pub field_type: String,
    pub required: bool,
    pub options: Option<Vec<String>>,
    pub min_length: Option<LengthLimit>,
    pub max_length: Option<LengthLimit>,
    /// Custom message for an invalid email value
    pub error_message: Option<String>,
    /// Unrecognized keys, forwarded to the rendered control as-is
    pub extra: Map<String, Value>,
}

impl FieldDefinition {
    /// Create a field with only the mandatory keys set
    pub fn new(name: &str, label: &str, field_type: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            field_type: field_type.to_string(),
            required: false,
            options: None,
            min_length: None,
            max_length: None,
            error_message: None,
            extra: Map::new(),
        }
    }

    pub fn is_select(&self) -> bool {
        self.field_type == SELECT_TYPE
    }

    pub fn is_textarea(&self) -> bool {
        self.field_type == TEXTAREA_TYPE
    }

    /// Options of a select field (empty for other types)
    pub fn select_options(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }

    /// Build a field from a JSON object that already passed structural validation
    pub(crate) fn from_object(object: &Map<String, Value>) -> Self {
        let string_at = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let options = object.get("options").and_then(Value::as_array).and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
        });

        let extra = object
            .iter()
            .filter(|(key, _)| !RECOGNIZED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            required: matches!(object.get("required"), Some(Value::Bool(true))),
            options,
            min_length: object.get("minLength").and_then(LengthLimit::from_json),
            max_length: object.get("maxLength").and_then(LengthLimit::from_json),
            error_message: object
                .get("errorMessage")
                .and_then(Value::as_str)
                .map(str::to_string),
            extra,
            ..Self::new(&string_at("name"), &string_at("label"), &string_at("type"))
        }
    }
}

/// A minLength/maxLength constraint as written in the file
#[derive(Debug, Clone, PartialEq)]
pub struct LengthLimit {
    /// The value as written, used verbatim in messages
    pub raw: String,
    /// Numeric interpretation; `None` for non-numeric strings
    pub limit: Option<f64>,
}

impl LengthLimit {
    /// Interpret a JSON value as a length constraint.
    ///
    /// Empty strings and the number 0 count as "not set". Strings are
    /// trimmed before parsing; a string that is not a number is kept but
    /// never triggers a length error.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => {
                let trimmed = s.trim();
                let limit = if trimmed.is_empty() {
                    Some(0.0)
                } else {
                    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
                };
                Some(Self {
                    raw: s.clone(),
                    limit,
                })
            }
            Value::Number(n) => {
                let limit = n.as_f64().filter(|v| *v != 0.0)?;
                Some(Self {
                    raw: n.to_string(),
                    limit: Some(limit),
                })
            }
            _ => None,
        }
    }

    /// Parse from a numeric string, as used by definitions built in tests
    #[cfg(test)]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::from_json(&Value::String(raw.to_string()))
    }

    /// True when `len` is below the limit (a minLength violation)
    pub fn len_below(&self, len: usize) -> bool {
        self.limit.is_some_and(|limit| (len as f64) < limit)
    }

    /// True when `len` exceeds the limit (a maxLength violation)
    pub fn len_above(&self, len: usize) -> bool {
        self.limit.is_some_and(|limit| (len as f64) > limit)
    }
}

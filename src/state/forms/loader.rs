//! Form loader: bytes -> JSON -> structurally validated [`FormDefinition`]

use super::definition::{FieldDefinition, FormDefinition, SELECT_TYPE};
use serde_json::{Map, Value};
use thiserror::Error;

/// Shown when the file is not valid JSON or could not be read
pub const PARSE_ERROR_MESSAGE: &str =
    ".json filen kunne ikke bli lest! Vennligst bruk en annen fil!";

/// Shown when the JSON does not have the expected form shape
pub const SCHEMA_ERROR_MESSAGE: &str = "Ugyldig JSON-struktur. Filen må inneholde en \"title\" (streng) og et \"fields\" (array av objekter) med gyldige feltdefinisjoner. Se form-property.json";

/// Why loading a form file failed.
///
/// `Display` yields the fixed user-facing message; the underlying cause is
/// available through `source()` or the [`SchemaViolation`] payload.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{}", PARSE_ERROR_MESSAGE)]
    Parse(#[source] serde_json::Error),
    #[error("{}", SCHEMA_ERROR_MESSAGE)]
    Schema(SchemaViolation),
}

/// The first structural rule a parsed document broke
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("\"title\" must be a non-empty string")]
    MissingTitle,
    #[error("\"fields\" must be an array")]
    FieldsNotSequence,
    #[error("field {index} is not an object")]
    FieldNotObject { index: usize },
    #[error("field {index} has no non-empty \"label\"")]
    MissingLabel { index: usize },
    #[error("field {index} has no non-empty \"name\"")]
    MissingName { index: usize },
    #[error("field {index} has no non-empty \"type\"")]
    MissingType { index: usize },
    #[error("select field {index} has no \"options\" array")]
    SelectOptionsMissing { index: usize },
    #[error("option {position} of select field {index} is not a string")]
    SelectOptionNotString { index: usize, position: usize },
}

/// Parse and validate a form file
pub fn load(bytes: &[u8]) -> Result<FormDefinition, LoadError> {
    let document: Value = serde_json::from_slice(bytes).map_err(|err| {
        tracing::warn!("Form file is not valid JSON: {err}");
        LoadError::Parse(err)
    })?;

    let definition = validate_document(&document).map_err(|violation| {
        tracing::warn!("Form file rejected: {violation}");
        LoadError::Schema(violation)
    })?;

    tracing::info!(
        title = %definition.title,
        fields = definition.fields.len(),
        "Form definition loaded"
    );
    Ok(definition)
}

/// Check a parsed document against the expected form shape
pub fn validate_document(document: &Value) -> Result<FormDefinition, SchemaViolation> {
    let title = document
        .get("title")
        .and_then(Value::as_str)
        .filter(|title| !title.trim().is_empty())
        .ok_or(SchemaViolation::MissingTitle)?;

    let raw_fields = document
        .get("fields")
        .and_then(Value::as_array)
        .ok_or(SchemaViolation::FieldsNotSequence)?;

    let fields = raw_fields
        .iter()
        .enumerate()
        .map(|(index, raw)| validate_field(index, raw))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FormDefinition {
        title: title.to_string(),
        fields,
    })
}

fn validate_field(index: usize, raw: &Value) -> Result<FieldDefinition, SchemaViolation> {
    let object = raw
        .as_object()
        .ok_or(SchemaViolation::FieldNotObject { index })?;

    if !has_text(object, "label") {
        return Err(SchemaViolation::MissingLabel { index });
    }
    if !has_text(object, "name") {
        return Err(SchemaViolation::MissingName { index });
    }
    if !has_text(object, "type") {
        return Err(SchemaViolation::MissingType { index });
    }

    if object.get("type").and_then(Value::as_str) == Some(SELECT_TYPE) {
        let options = object
            .get("options")
            .and_then(Value::as_array)
            .ok_or(SchemaViolation::SelectOptionsMissing { index })?;
        if let Some(position) = options.iter().position(|option| !option.is_string()) {
            return Err(SchemaViolation::SelectOptionNotString { index, position });
        }
    }

    Ok(FieldDefinition::from_object(object))
}

/// True when `key` holds a string that is non-empty after trimming
fn has_text(object: &Map<String, Value>, key: &str) -> bool {
    object
        .get(key)
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}

//! Field validation rules
//!
//! Messages are advisory: they are attached to field state and shown under
//! the control. Submission is gated separately by [`native_violation`].

use super::definition::FieldDefinition;
use regex::Regex;
use std::sync::OnceLock;

pub const REQUIRED_MESSAGE: &str = "Dette feltet er påkrevd.";
pub const INVALID_EMAIL_MESSAGE: &str = "Vennligst skriv inn en gyldig e-postadresse.";

/// Native messages used when a submit attempt is blocked
pub const VALUE_MISSING_MESSAGE: &str = "Fyll ut dette feltet.";
pub const TYPE_MISMATCH_EMAIL_MESSAGE: &str = "Skriv inn en gyldig e-postadresse.";

/// Control type reported by email inputs
pub const EMAIL_CONTROL: &str = "email";
/// Control type reported by plain text inputs (and unknown input types)
pub const TEXT_CONTROL: &str = "text";
/// Control type reported by textareas
pub const TEXTAREA_CONTROL: &str = "textarea";
/// Control type reported by selects
pub const SELECT_CONTROL: &str = "select-one";

/// Control types a browser applies `minLength` to when checking a submit
const MIN_LENGTH_CONTROLS: &[&str] = &[
    TEXT_CONTROL,
    "search",
    "url",
    "tel",
    EMAIL_CONTROL,
    "password",
    TEXTAREA_CONTROL,
];

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"))
}

pub fn min_length_message(raw: &str) -> String {
    format!("Krever minst {raw} tegn.")
}

pub fn max_length_message(raw: &str) -> String {
    format!("Kan ikke overstige {raw} tegn.")
}

fn too_short_message(raw: &str) -> String {
    format!("Bruk minst {raw} tegn.")
}

/// Validate a value against its field definition.
///
/// Returns the error message, or an empty string when the value is valid.
/// Rules run in order and a later match replaces an earlier message.
pub fn validate(field: &FieldDefinition, value: &str, control_type: &str) -> String {
    let mut message = String::new();

    if field.required && value.trim().is_empty() {
        message = REQUIRED_MESSAGE.to_string();
    } else if control_type == EMAIL_CONTROL && !value.is_empty() && !email_pattern().is_match(value)
    {
        message = match field.error_message.as_deref() {
            Some(custom) if !custom.is_empty() => custom.to_string(),
            _ => INVALID_EMAIL_MESSAGE.to_string(),
        };
    }

    if control_type == TEXT_CONTROL || control_type == TEXTAREA_CONTROL {
        let len = value.chars().count();
        if let Some(min) = field.min_length.as_ref().filter(|min| min.len_below(len)) {
            message = min_length_message(&min.raw);
        }
        if let Some(max) = field.max_length.as_ref().filter(|max| max.len_above(len)) {
            message = max_length_message(&max.raw);
        }
    }

    message
}

/// Constraint check that blocks submission, emulating a browser's built-in
/// form validation. Returns the message for the first broken constraint.
pub fn native_violation(field: &FieldDefinition, value: &str, control_type: &str) -> Option<String> {
    if field.required && value.is_empty() {
        return Some(VALUE_MISSING_MESSAGE.to_string());
    }
    if value.is_empty() || control_type == SELECT_CONTROL {
        return None;
    }
    if control_type == EMAIL_CONTROL && !looks_like_email_address(value) {
        return Some(TYPE_MISMATCH_EMAIL_MESSAGE.to_string());
    }
    if !MIN_LENGTH_CONTROLS.contains(&control_type) {
        return None;
    }
    if let Some(min) = field
        .min_length
        .as_ref()
        .filter(|min| min.len_below(value.chars().count()))
    {
        return Some(too_short_message(&min.raw));
    }
    None
}

/// Loose `local@domain` shape check, without whitespace
fn looks_like_email_address(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::definition::LengthLimit;

    fn required(field_type: &str) -> FieldDefinition {
        let mut field = FieldDefinition::new("f", "Felt", field_type);
        field.required = true;
        field
    }

    fn with_lengths(min: Option<&str>, max: Option<&str>) -> FieldDefinition {
        let mut field = FieldDefinition::new("f", "Felt", "text");
        field.min_length = min.and_then(LengthLimit::parse);
        field.max_length = max.and_then(LengthLimit::parse);
        field
    }

    mod required_rule {
        use super::*;

        #[test]
        fn test_blank_values_fail_for_every_type() {
            for (field_type, control) in [
                ("text", TEXT_CONTROL),
                ("email", EMAIL_CONTROL),
                ("textarea", TEXTAREA_CONTROL),
                ("select", SELECT_CONTROL),
                ("date", "date"),
            ] {
                let field = required(field_type);
                for value in ["", "   ", "\n\t"] {
                    assert_eq!(validate(&field, value, control), REQUIRED_MESSAGE);
                }
            }
        }

        #[test]
        fn test_filled_values_pass() {
            let field = required("text");
            assert_eq!(validate(&field, "Alice", TEXT_CONTROL), "");
            assert_eq!(validate(&field, " x ", TEXT_CONTROL), "");
        }

        #[test]
        fn test_optional_blank_is_valid() {
            let field = FieldDefinition::new("f", "Felt", "text");
            assert_eq!(validate(&field, "", TEXT_CONTROL), "");
        }
    }

    mod email_rule {
        use super::*;

        #[test]
        fn test_invalid_address() {
            let field = FieldDefinition::new("e", "E-post", "email");
            assert_eq!(validate(&field, "abc", EMAIL_CONTROL), INVALID_EMAIL_MESSAGE);
        }

        #[test]
        fn test_valid_address() {
            let field = FieldDefinition::new("e", "E-post", "email");
            assert_eq!(validate(&field, "a@b.co", EMAIL_CONTROL), "");
        }

        #[test]
        fn test_missing_dot_after_at() {
            let field = FieldDefinition::new("e", "E-post", "email");
            assert_ne!(validate(&field, "a@b", EMAIL_CONTROL), "");
        }

        #[test]
        fn test_custom_message() {
            let mut field = FieldDefinition::new("e", "E-post", "email");
            field.error_message = Some("Ugyldig adresse".to_string());
            assert_eq!(validate(&field, "abc", EMAIL_CONTROL), "Ugyldig adresse");
        }

        #[test]
        fn test_empty_custom_message_falls_back() {
            let mut field = FieldDefinition::new("e", "E-post", "email");
            field.error_message = Some(String::new());
            assert_eq!(validate(&field, "abc", EMAIL_CONTROL), INVALID_EMAIL_MESSAGE);
        }

        #[test]
        fn test_email_rule_only_for_email_controls() {
            let field = FieldDefinition::new("e", "E-post", "text");
            assert_eq!(validate(&field, "abc", TEXT_CONTROL), "");
        }

        #[test]
        fn test_required_wins_over_email_on_blank() {
            let field = required("email");
            assert_eq!(validate(&field, " ", EMAIL_CONTROL), REQUIRED_MESSAGE);
        }
    }

    mod length_rules {
        use super::*;

        #[test]
        fn test_min_length_mentions_limit() {
            let field = with_lengths(Some("3"), None);
            let message = validate(&field, "ab", TEXT_CONTROL);
            assert_eq!(message, "Krever minst 3 tegn.");
            assert!(message.contains('3'));
        }

        #[test]
        fn test_min_length_satisfied() {
            let field = with_lengths(Some("3"), None);
            assert_eq!(validate(&field, "abc", TEXT_CONTROL), "");
        }

        #[test]
        fn test_max_length() {
            let field = with_lengths(None, Some("5"));
            assert_eq!(validate(&field, "abcdef", TEXTAREA_CONTROL), "Kan ikke overstige 5 tegn.");
            assert_eq!(validate(&field, "abcde", TEXTAREA_CONTROL), "");
        }

        #[test]
        fn test_length_counts_characters() {
            let field = with_lengths(None, Some("3"));
            assert_eq!(validate(&field, "æøå", TEXT_CONTROL), "");
        }

        #[test]
        fn test_length_overrides_required() {
            let mut field = with_lengths(Some("2"), None);
            field.required = true;
            assert_eq!(validate(&field, " ", TEXT_CONTROL), "Krever minst 2 tegn.");
        }

        #[test]
        fn test_length_ignored_for_other_controls() {
            let mut field = with_lengths(Some("10"), Some("1"));
            field.field_type = "email".to_string();
            assert_eq!(validate(&field, "a@b.co", EMAIL_CONTROL), "");
            assert_eq!(validate(&field, "2024-01-01", "date"), "");
        }

        #[test]
        fn test_max_wins_when_both_fail() {
            // minLength larger than maxLength: both rules match, the later one wins
            let field = with_lengths(Some("10"), Some("2"));
            assert_eq!(validate(&field, "abcd", TEXT_CONTROL), "Kan ikke overstige 2 tegn.");
        }
    }

    mod native_check {
        use super::*;

        #[test]
        fn test_required_empty_blocks() {
            let field = required("text");
            assert_eq!(
                native_violation(&field, "", TEXT_CONTROL).as_deref(),
                Some(VALUE_MISSING_MESSAGE)
            );
        }

        #[test]
        fn test_whitespace_satisfies_native_required() {
            let field = required("text");
            assert!(native_violation(&field, "  ", TEXT_CONTROL).is_none());
        }

        #[test]
        fn test_required_select_on_placeholder_blocks() {
            let field = required("select");
            assert!(native_violation(&field, "", SELECT_CONTROL).is_some());
            assert!(native_violation(&field, "Ja", SELECT_CONTROL).is_none());
        }

        #[test]
        fn test_email_shape() {
            let field = FieldDefinition::new("e", "E-post", "email");
            assert!(native_violation(&field, "abc", EMAIL_CONTROL).is_some());
            assert!(native_violation(&field, "a b@c.no", EMAIL_CONTROL).is_some());
            assert!(native_violation(&field, "a@b", EMAIL_CONTROL).is_none());
            assert!(native_violation(&field, "", EMAIL_CONTROL).is_none());
        }

        #[test]
        fn test_too_short_only_when_non_empty() {
            let field = with_lengths(Some("3"), None);
            assert!(native_violation(&field, "", TEXT_CONTROL).is_none());
            assert_eq!(
                native_violation(&field, "ab", TEXT_CONTROL).as_deref(),
                Some("Bruk minst 3 tegn.")
            );
        }

        #[test]
        fn test_too_short_ignored_for_non_text_controls() {
            let field = with_lengths(Some("3"), None);
            assert!(native_violation(&field, "7", "number").is_none());
            assert!(native_violation(&field, "x", "date").is_none());
            assert!(native_violation(&field, "ab", "password").is_some());
            assert!(native_violation(&field, "ab", TEXTAREA_CONTROL).is_some());
        }
    }
}

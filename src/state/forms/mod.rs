//! Form domain layer
//!
//! Loading, validation and runtime state for forms described by JSON files:
//! - `loader`: bytes to a validated [`FormDefinition`]
//! - `validator`: per-field messages and the submit-blocking check
//! - `field`: rendered controls and their values
//! - `form_state`: focus, blur/change validation and submission
//! - `container`: upload prompt and asynchronous file reads

mod container;
mod definition;
mod field;
mod form_state;
mod loader;
mod validator;

pub use container::{FileRead, FormContainer};
pub use field::{ControlKind, FieldStatus, FormField, DEFAULT_TEXTAREA_ROWS};
pub use form_state::{Form, LoadedForm, SubmissionPayload, SubmitHandler};

#[cfg(test)]
pub use definition::FieldDefinition;
#[cfg(test)]
pub use field::SELECT_PLACEHOLDER;
#[cfg(test)]
pub use loader::load;

//! Form rendering module
//!
//! - `field_renderer`: one label, control and error per field
//! - `form_view`: the loaded form with its submit button

mod field_renderer;
mod form_view;

pub use form_view::draw_form;

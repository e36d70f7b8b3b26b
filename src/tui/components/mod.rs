//! Reusable UI components for the editor TUI

pub mod error_list;
pub mod form_field;
pub mod tag_input;

pub use error_list::ErrorList;
pub use form_field::{FormField, FormFieldType};
pub use tag_input::TagInput;

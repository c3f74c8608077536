//! TUI components

mod form_field;
mod help;

pub use form_field::{label_column, FieldKind, FormField};
pub use help::HelpOverlay;

//! Screen modules for the editor TUI

pub mod editor;
pub mod home;

pub use editor::{EditorField, EditorScreen};
pub use home::HomeScreen;

//! Terminal user interface for writing and publishing articles
//!
//! The home screen is the application root; the editor screen hosts the
//! new article form and sends it in the background so the form keeps
//! drawing while a request is in flight.

pub mod app;
pub mod components;
pub mod events;
pub mod screens;
pub mod traits;
pub mod ui;

pub use app::{App, Router, Screen};
pub use events::AppEvent;

pub use screens::{editor::EditorScreen, home::HomeScreen};

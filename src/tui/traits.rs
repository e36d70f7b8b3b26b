//! Core traits for the editor TUI screens

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::tui::app::Screen as ScreenType;

/// Actions that can be returned from screen event handling
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenAction {
    /// Navigate to a different screen
    NavigateTo(ScreenType),
    /// Publish the article being edited
    Submit,
    /// Quit the application
    Quit,
    /// No action taken
    None,
}

/// Core trait for all TUI screens
pub trait Screen {
    /// Draw the screen content
    fn draw(&mut self, f: &mut Frame, area: Rect);

    /// Handle keyboard input and return the action for the app to apply
    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction;

    /// Get the screen type identifier
    fn screen_type(&self) -> ScreenType;

    /// Shortcut help shown in the F1 popup
    fn help_text(&self) -> &'static str;
}

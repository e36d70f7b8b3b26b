//! Form field component for user input

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::ui::Styles;

/// Type of form field
#[derive(Debug, Clone, PartialEq)]
pub enum FormFieldType {
    Text,
    /// Multi-line; Enter inserts a newline
    TextArea,
}

/// Individual form field. The cursor is counted in characters.
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub field_type: FormFieldType,
    pub is_focused: bool,
    pub cursor_position: usize,
}

impl FormField {
    pub fn new(label: &str, field_type: FormFieldType) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            placeholder: String::new(),
            field_type,
            is_focused: false,
            cursor_position: 0,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self.cursor_position = self.char_count();
        self
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' && self.field_type != FormFieldType::TextArea {
            return;
        }
        let index = self.byte_index();
        self.value.insert(index, c);
        self.cursor_position += 1;
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Remove the character before the cursor. Returns true if the value changed.
    pub fn delete_char(&mut self) -> bool {
        if self.cursor_position == 0 {
            return false;
        }
        self.cursor_position -= 1;
        let index = self.byte_index();
        self.value.remove(index);
        true
    }

    /// Remove the character under the cursor. Returns true if the value changed.
    pub fn delete_char_forward(&mut self) -> bool {
        if self.cursor_position >= self.char_count() {
            return false;
        }
        let index = self.byte_index();
        self.value.remove(index);
        true
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.char_count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.char_count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_position = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Row and display column of the cursor, relative to the text origin
    pub fn cursor_offset(&self) -> (u16, u16) {
        let before = &self.value[..self.byte_index()];
        let row = before.matches('\n').count();
        let column = before.rsplit('\n').next().unwrap_or("").width();
        (row as u16, column as u16)
    }

    /// Render the form field
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let showing_placeholder = self.value.is_empty() && !self.placeholder.is_empty();
        let display_text = if showing_placeholder {
            &self.placeholder
        } else {
            &self.value
        };

        let border_style = if self.is_focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };

        let block = Block::default()
            .title(self.label.as_str())
            .borders(Borders::ALL)
            .border_style(border_style);

        let text_style = if showing_placeholder {
            Styles::inactive()
        } else {
            Styles::default()
        };

        let (cursor_row, cursor_column) = self.cursor_offset();
        let inner_height = area.height.saturating_sub(2);
        let scroll = if inner_height > 0 && cursor_row >= inner_height {
            cursor_row + 1 - inner_height
        } else {
            0
        };

        let paragraph = Paragraph::new(display_text.to_string())
            .style(text_style)
            .scroll((scroll, 0))
            .block(block);

        f.render_widget(paragraph, area);

        if self.is_focused {
            let cursor_x = area.x + 1 + cursor_column;
            let cursor_y = area.y + 1 + cursor_row - scroll;
            if cursor_x < area.x + area.width.saturating_sub(1)
                && cursor_y < area.y + area.height.saturating_sub(1)
            {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }
}

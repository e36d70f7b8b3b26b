//! Tag input: a one-line entry box plus the current tags as chips

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::editor::DraftAction;
use crate::tui::ui::Styles;

use super::form_field::{FormField, FormFieldType};

#[derive(Debug, Clone)]
pub struct TagInput {
    pub input: FormField,
    /// Chip selected with Left/Right while the entry box is empty
    pub selected_tag: Option<usize>,
    pub is_focused: bool,
}

impl Default for TagInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TagInput {
    pub fn new() -> Self {
        Self {
            input: FormField::new("Tags", FormFieldType::Text).with_placeholder("Enter tags"),
            selected_tag: None,
            is_focused: false,
        }
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
        self.input.set_focus(focused);
        if !focused {
            self.selected_tag = None;
        }
    }

    /// Handle a key against the current tag list. Returns the action to
    /// dispatch when the key adds or removes a tag.
    pub fn handle_key(&mut self, key: KeyEvent, tags: &[String]) -> Option<DraftAction> {
        if let Some(i) = self.selected_tag {
            if i >= tags.len() {
                self.selected_tag = None;
            }
        }

        match key.code {
            KeyCode::Enter => {
                let tag = self.input.value.trim().to_string();
                if tag.is_empty() {
                    return None;
                }
                self.input.clear();
                Some(DraftAction::AddTag(tag))
            }
            KeyCode::Backspace if self.input.is_empty() => {
                let index = self.selected_tag.take().or_else(|| tags.len().checked_sub(1))?;
                Some(DraftAction::RemoveTag(tags[index].clone()))
            }
            KeyCode::Backspace => {
                self.input.delete_char();
                None
            }
            KeyCode::Delete => match self.selected_tag.take() {
                Some(index) => Some(DraftAction::RemoveTag(tags[index].clone())),
                None => {
                    self.input.delete_char_forward();
                    None
                }
            },
            KeyCode::Left if self.input.is_empty() && !tags.is_empty() => {
                self.selected_tag = Some(match self.selected_tag {
                    None => tags.len() - 1,
                    Some(i) => i.saturating_sub(1),
                });
                None
            }
            KeyCode::Right if self.selected_tag.is_some() => {
                self.selected_tag = self
                    .selected_tag
                    .map(|i| i + 1)
                    .filter(|&i| i < tags.len());
                None
            }
            KeyCode::Left => {
                self.input.move_cursor_left();
                None
            }
            KeyCode::Right => {
                self.input.move_cursor_right();
                None
            }
            KeyCode::Home => {
                self.input.move_cursor_to_start();
                None
            }
            KeyCode::End => {
                self.input.move_cursor_to_end();
                None
            }
            KeyCode::Esc => {
                self.selected_tag = None;
                None
            }
            KeyCode::Char(c) => {
                self.selected_tag = None;
                self.input.insert_char(c);
                None
            }
            _ => None,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, tags: &[String]) {
        let border_style = if self.is_focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };
        let block = Block::default()
            .title("Tags (Enter to add, Backspace to remove)")
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        f.render_widget(block, area);

        if inner.height == 0 {
            return;
        }

        let entry = Paragraph::new(if self.input.is_empty() {
            self.input.placeholder.clone()
        } else {
            self.input.value.clone()
        })
        .style(if self.input.is_empty() {
            Styles::inactive()
        } else {
            Styles::default()
        });
        f.render_widget(entry, Rect { height: 1, ..inner });

        if inner.height > 1 {
            let mut spans = Vec::with_capacity(tags.len() * 2);
            for (i, tag) in tags.iter().enumerate() {
                let style = if Some(i) == self.selected_tag {
                    Styles::selected()
                } else {
                    Styles::tag()
                };
                spans.push(Span::styled(format!(" × {} ", tag), style));
                spans.push(Span::raw(" "));
            }
            let chips = Paragraph::new(Line::from(spans));
            f.render_widget(chips, Rect { y: inner.y + 1, height: 1, ..inner });
        }

        if self.is_focused && self.selected_tag.is_none() {
            let (_, column) = self.input.cursor_offset();
            let cursor_x = inner.x + column;
            if cursor_x < inner.x + inner.width {
                f.set_cursor(cursor_x, inner.y);
            }
        }
    }
}

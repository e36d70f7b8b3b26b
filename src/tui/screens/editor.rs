//! New article screen

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::editor::{ArticleEditor, DraftAction};
use crate::models::CurrentUser;
use crate::tui::{
    app::Screen as ScreenType,
    components::{ErrorList, FormField, FormFieldType, TagInput},
    traits::{Screen, ScreenAction},
    ui::Styles,
};

/// Focusable parts of the form, top to bottom
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorField {
    Title,
    Description,
    Body,
    Tags,
    Publish,
}

const FIELDS: [EditorField; 5] = [
    EditorField::Title,
    EditorField::Description,
    EditorField::Body,
    EditorField::Tags,
    EditorField::Publish,
];

pub struct EditorScreen {
    pub editor: ArticleEditor,
    pub current_field: usize,

    pub title_input: FormField,
    pub description_input: FormField,
    pub body_input: FormField,
    pub tag_input: TagInput,
}

impl EditorScreen {
    pub fn new(current_user: Option<CurrentUser>) -> Self {
        let mut screen = Self {
            editor: ArticleEditor::new(current_user),
            current_field: 0,

            title_input: FormField::new("Title", FormFieldType::Text)
                .with_placeholder("Article Title"),
            description_input: FormField::new("Description", FormFieldType::Text)
                .with_placeholder("What's this article about?"),
            body_input: FormField::new("Body", FormFieldType::TextArea)
                .with_placeholder("Write your article (in markdown)"),
            tag_input: TagInput::new(),
        };

        screen.update_field_focus();
        screen
    }

    pub fn focused_field(&self) -> EditorField {
        FIELDS[self.current_field]
    }

    pub fn focus(&mut self, field: EditorField) {
        if let Some(index) = FIELDS.iter().position(|f| *f == field) {
            self.current_field = index;
            self.update_field_focus();
        }
    }

    fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELDS.len();
        self.update_field_focus();
    }

    fn previous_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            FIELDS.len() - 1
        } else {
            self.current_field - 1
        };
        self.update_field_focus();
    }

    fn update_field_focus(&mut self) {
        let focused = self.focused_field();
        self.title_input.set_focus(focused == EditorField::Title);
        self.description_input.set_focus(focused == EditorField::Description);
        self.body_input.set_focus(focused == EditorField::Body);
        self.tag_input.set_focus(focused == EditorField::Tags);
    }

    /// Edit one of the text inputs and push its value into the draft
    fn edit_text(&mut self, field: EditorField, key: KeyEvent) {
        let input = match field {
            EditorField::Title => &mut self.title_input,
            EditorField::Description => &mut self.description_input,
            EditorField::Body => &mut self.body_input,
            EditorField::Tags | EditorField::Publish => return,
        };

        let changed = match key.code {
            KeyCode::Char(c) => {
                input.insert_char(c);
                true
            }
            KeyCode::Enter => {
                input.insert_newline();
                true
            }
            KeyCode::Backspace => input.delete_char(),
            KeyCode::Delete => input.delete_char_forward(),
            KeyCode::Left => {
                input.move_cursor_left();
                false
            }
            KeyCode::Right => {
                input.move_cursor_right();
                false
            }
            KeyCode::Home => {
                input.move_cursor_to_start();
                false
            }
            KeyCode::End => {
                input.move_cursor_to_end();
                false
            }
            _ => false,
        };

        if changed {
            let text = input.value.clone();
            self.editor.dispatch(match field {
                EditorField::Title => DraftAction::SetTitle(text),
                EditorField::Description => DraftAction::SetDescription(text),
                _ => DraftAction::SetBody(text),
            });
        }
    }

    fn draw_title(&self, f: &mut Frame, area: Rect) {
        let (title, style) = if self.editor.is_loading() {
            ("New Article - Publishing...", Styles::warning())
        } else {
            ("New Article", Styles::title())
        };

        let widget = Paragraph::new(title)
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(widget, area);
    }

    fn draw_publish_button(&self, f: &mut Frame, area: Rect) {
        let focused = self.focused_field() == EditorField::Publish;
        let style = if self.editor.is_loading() {
            Styles::button_disabled()
        } else {
            Styles::button()
        };
        let border_style = if focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };

        let button = Paragraph::new("Publish Article")
            .alignment(Alignment::Center)
            .style(style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style),
            );

        let width = area.width.min(21);
        f.render_widget(
            button,
            Rect {
                x: area.x + area.width - width,
                width,
                ..area
            },
        );
    }
}

impl Screen for EditorScreen {
    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let errors = ErrorList::new(self.editor.errors());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),               // Title bar
                Constraint::Length(errors.height()), // Errors
                Constraint::Length(3),               // Title
                Constraint::Length(3),               // Description
                Constraint::Min(5),                  // Body
                Constraint::Length(4),               // Tags
                Constraint::Length(3),               // Publish
            ])
            .split(area);

        self.draw_title(f, chunks[0]);
        errors.render(f, chunks[1]);
        self.title_input.render(f, chunks[2]);
        self.description_input.render(f, chunks[3]);
        self.body_input.render(f, chunks[4]);
        self.tag_input
            .render(f, chunks[5], &self.editor.draft().tag_list);
        self.draw_publish_button(f, chunks[6]);
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => ScreenAction::Submit,
                _ => ScreenAction::None,
            };
        }

        match key.code {
            KeyCode::Esc if self.focused_field() != EditorField::Tags
                || self.tag_input.selected_tag.is_none() =>
            {
                return ScreenAction::NavigateTo(ScreenType::Home);
            }
            KeyCode::Tab => {
                self.next_field();
                return ScreenAction::None;
            }
            KeyCode::BackTab => {
                self.previous_field();
                return ScreenAction::None;
            }
            KeyCode::Up => {
                self.previous_field();
                return ScreenAction::None;
            }
            KeyCode::Down => {
                self.next_field();
                return ScreenAction::None;
            }
            _ => {}
        }

        match self.focused_field() {
            field @ (EditorField::Title | EditorField::Description) => {
                if key.code == KeyCode::Enter {
                    self.next_field();
                } else {
                    self.edit_text(field, key);
                }
            }
            EditorField::Body => self.edit_text(EditorField::Body, key),
            EditorField::Tags => {
                let action = self
                    .tag_input
                    .handle_key(key, &self.editor.draft().tag_list);
                if let Some(action) = action {
                    self.editor.dispatch(action);
                }
            }
            EditorField::Publish => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
                    && !self.editor.is_loading()
                {
                    return ScreenAction::Submit;
                }
            }
        }

        ScreenAction::None
    }

    fn screen_type(&self) -> ScreenType {
        ScreenType::Editor
    }

    fn help_text(&self) -> &'static str {
        "New Article:\n\
        Tab / Shift+Tab / Up / Down - Move between fields\n\
        Enter in Body - New line\n\
        Enter in Tags - Add tag\n\
        Backspace on empty Tags - Remove last tag\n\
        Left/Right on empty Tags - Select tag, Delete removes it\n\
        Enter on Publish / Ctrl+S - Publish article\n\
        Esc - Back to home (discards the draft)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut EditorScreen, text: &str) {
        for c in text.chars() {
            let action = if c == '\n' {
                screen.handle_key_event(key(KeyCode::Enter))
            } else {
                screen.handle_key_event(key(KeyCode::Char(c)))
            };
            assert_eq!(action, ScreenAction::None);
        }
    }

    fn screen_text(screen: &mut EditorScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                screen.draw(f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_typing_updates_draft_immediately() {
        let mut screen = EditorScreen::new(None);

        type_text(&mut screen, "Hello");
        assert_eq!(screen.editor.draft().title, "Hello");

        screen.handle_key_event(key(KeyCode::Backspace));
        assert_eq!(screen.editor.draft().title, "Hell");

        screen.handle_key_event(key(KeyCode::Tab));
        type_text(&mut screen, "About it");
        assert_eq!(screen.editor.draft().description, "About it");

        screen.handle_key_event(key(KeyCode::Tab));
        type_text(&mut screen, "# Intro\nbody");
        assert_eq!(screen.editor.draft().body, "# Intro\nbody");
    }

    #[test]
    fn test_enter_in_title_moves_on_without_submitting() {
        let mut screen = EditorScreen::new(None);
        type_text(&mut screen, "Hello");
        assert_eq!(screen.handle_key_event(key(KeyCode::Enter)), ScreenAction::None);
        assert_eq!(screen.focused_field(), EditorField::Description);
        assert_eq!(screen.editor.draft().title, "Hello");
    }

    #[test]
    fn test_tags_are_added_and_removed() {
        let mut screen = EditorScreen::new(None);
        screen.focus(EditorField::Tags);

        type_text(&mut screen, "rust");
        screen.handle_key_event(key(KeyCode::Enter));
        type_text(&mut screen, "tui");
        screen.handle_key_event(key(KeyCode::Enter));
        type_text(&mut screen, "rust");
        screen.handle_key_event(key(KeyCode::Enter));
        assert_eq!(screen.editor.draft().tag_list, vec!["rust", "tui", "rust"]);

        // Select the first chip and delete it: every "rust" goes
        for _ in 0..3 {
            screen.handle_key_event(key(KeyCode::Left));
        }
        screen.handle_key_event(key(KeyCode::Delete));
        assert_eq!(screen.editor.draft().tag_list, vec!["tui"]);

        screen.handle_key_event(key(KeyCode::Backspace));
        assert!(screen.editor.draft().tag_list.is_empty());
    }

    #[test]
    fn test_submit_triggers() {
        let mut screen = EditorScreen::new(None);
        assert_eq!(
            screen.handle_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            ScreenAction::Submit
        );
        assert!(screen.editor.draft().title.is_empty());

        screen.focus(EditorField::Publish);
        assert_eq!(screen.handle_key_event(key(KeyCode::Enter)), ScreenAction::Submit);
    }

    #[test]
    fn test_escape_goes_home() {
        let mut screen = EditorScreen::new(None);
        assert_eq!(
            screen.handle_key_event(key(KeyCode::Esc)),
            ScreenAction::NavigateTo(ScreenType::Home)
        );
    }

    #[test]
    fn test_render_shows_form_and_errors() {
        let mut screen = EditorScreen::new(None);
        let text = screen_text(&mut screen);
        assert!(text.contains("Article Title"));
        assert!(text.contains("Publish Article"));
        assert!(!text.contains("sign in"));

        // Without a user the submit is refused and the reason is listed
        assert!(screen.editor.begin_submit().is_err());
        let text = screen_text(&mut screen);
        assert!(text.contains("You need to sign in to publish an article"));
    }
}

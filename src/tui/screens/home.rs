//! Home screen: the application root

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::{Article, CurrentUser};
use crate::tui::{
    app::Screen as ScreenType,
    traits::{Screen, ScreenAction},
    ui::{truncate, Styles},
};

pub struct HomeScreen {
    pub current_user: Option<CurrentUser>,
    pub api_url: String,
    /// Articles published in this session, newest first
    pub published: Vec<Article>,
}

impl HomeScreen {
    pub fn new(current_user: Option<CurrentUser>, api_url: &str) -> Self {
        Self {
            current_user,
            api_url: api_url.to_string(),
            published: Vec::new(),
        }
    }

    pub fn record_published(&mut self, article: Article) {
        self.published.insert(0, article);
    }

    pub fn last_published(&self) -> Option<&Article> {
        self.published.first()
    }

    fn draw_title(&self, f: &mut Frame, area: Rect) {
        let signed_in = match &self.current_user {
            Some(user) => format!("Signed in as {}", user.username),
            None => "Not signed in".to_string(),
        };

        let title = Paragraph::new(vec![
            Line::from(Span::styled("conduit", Styles::title())),
            Line::from(format!("{} | {}", signed_in, self.api_url)),
        ])
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn draw_published(&self, f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = if self.published.is_empty() {
            vec![Line::from(Span::styled(
                "Nothing published yet. Press n to write a new article.",
                Styles::inactive(),
            ))]
        } else {
            self.published
                .iter()
                .flat_map(|article| {
                    let tags = if article.tag_list.is_empty() {
                        String::new()
                    } else {
                        format!("  [{}]", article.tag_list.join(", "))
                    };
                    vec![
                        Line::from(vec![
                            Span::styled(truncate(&article.title, 60), Styles::success()),
                            Span::styled(tags, Styles::info()),
                        ]),
                        Line::from(Span::styled(
                            format!(
                                "  /article/{} · {}",
                                article.slug,
                                article.created_at.format("%Y-%m-%d %H:%M")
                            ),
                            Styles::inactive(),
                        )),
                    ]
                })
                .collect()
        };

        let list = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title("Published this session")
                    .borders(Borders::ALL)
                    .border_style(Styles::inactive_border()),
            );
        f.render_widget(list, area);
    }
}

impl Screen for HomeScreen {
    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        self.draw_title(f, chunks[0]);
        self.draw_published(f, chunks[1]);

        let instructions = Paragraph::new("n/Enter: New article | q/Esc: Quit | F1: Help")
            .style(Styles::info())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Styles::inactive_border()),
            );
        f.render_widget(instructions, chunks[2]);
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Char('n') | KeyCode::Enter => ScreenAction::NavigateTo(ScreenType::Editor),
            KeyCode::Char('q') | KeyCode::Esc => ScreenAction::Quit,
            _ => ScreenAction::None,
        }
    }

    fn screen_type(&self) -> ScreenType {
        ScreenType::Home
    }

    fn help_text(&self) -> &'static str {
        "Home:\n\
        n / Enter - Write a new article\n\
        q / Esc - Quit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_home_keys() {
        let mut home = HomeScreen::new(None, "http://localhost/api");
        assert_eq!(
            home.handle_key_event(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE)),
            ScreenAction::NavigateTo(ScreenType::Editor)
        );
        assert_eq!(
            home.handle_key_event(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            ScreenAction::Quit
        );
        assert_eq!(
            home.handle_key_event(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
            ScreenAction::None
        );
    }
}

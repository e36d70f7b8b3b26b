//! Main TUI application state and logic

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::events::AppEvent;
use super::screens::{EditorScreen, HomeScreen};
use super::traits::{Screen as ScreenView, ScreenAction};
use super::ui::centered_rect;
use crate::api::ArticleApi;
use crate::config::Config;
use crate::editor::{EditorError, Navigator, SubmitReport};
use crate::models::CurrentUser;

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Home,
    Editor,
}

/// Tracks the active screen; the editor navigates through it
#[derive(Debug, Clone)]
pub struct Router {
    pub current_screen: Screen,
    pub previous_screen: Option<Screen>,
}

impl Default for Router {
    fn default() -> Self {
        Self {
            current_screen: Screen::Home,
            previous_screen: None,
        }
    }
}

impl Router {
    pub fn navigate_to(&mut self, screen: Screen) {
        debug!("Navigating from {:?} to {:?}", self.current_screen, screen);
        self.previous_screen = Some(self.current_screen);
        self.current_screen = screen;
    }
}

impl Navigator for Router {
    fn navigate_home(&mut self) {
        self.navigate_to(Screen::Home);
    }
}

/// Main TUI application state
pub struct App {
    pub router: Router,
    /// Application configuration
    pub config: Config,
    pub current_user: Option<CurrentUser>,
    api: Arc<dyn ArticleApi>,

    // Screen states
    pub home: HomeScreen,
    pub editor: EditorScreen,

    // Global application state
    pub should_quit: bool,
    pub show_help_popup: bool,
    pub status_message: Option<String>,
    pub error_message: Option<String>,

    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl App {
    /// Create a new TUI application
    pub fn new(config: Config, current_user: Option<CurrentUser>, api: Arc<dyn ArticleApi>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            router: Router::default(),
            home: HomeScreen::new(current_user.clone(), &config.api_url),
            editor: EditorScreen::new(current_user.clone()),
            config,
            current_user,
            api,

            should_quit: false,
            show_help_popup: false,
            status_message: None,
            error_message: None,

            events_tx,
            events_rx,
        }
    }

    pub fn current_screen(&self) -> Screen {
        self.router.current_screen
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        if self.current_user.is_none() {
            self.set_error("Not signed in; publishing will be refused".to_string());
        } else {
            self.set_status("Ready".to_string());
        }

        loop {
            terminal.draw(|f| self.draw(f))?;

            self.process_pending_events();

            if crossterm::event::poll(EVENT_POLL_INTERVAL)? {
                if let Event::Key(key) = crossterm::event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle keyboard input events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        // Global shortcuts
        match key.code {
            KeyCode::F(1) => {
                self.show_help_popup = !self.show_help_popup;
                return;
            }
            KeyCode::Esc if self.show_help_popup => {
                self.show_help_popup = false;
                return;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        if self.show_help_popup {
            return;
        }

        let screen = self.active_screen();
        let action = screen.handle_key_event(key);
        debug!("{:?} on {:?} -> {:?}", key.code, screen.screen_type(), action);
        self.apply_action(action);
    }

    fn active_screen(&mut self) -> &mut dyn ScreenView {
        match self.router.current_screen {
            Screen::Home => &mut self.home as &mut dyn ScreenView,
            Screen::Editor => &mut self.editor as &mut dyn ScreenView,
        }
    }

    pub fn apply_action(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::NavigateTo(screen) => self.navigate_to_screen(screen),
            ScreenAction::Submit => self.start_submit(),
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::None => {}
        }
    }

    /// Navigate to a specific screen. Entering the editor starts a fresh draft,
    /// unless the previous one is still being published: its result is
    /// applied to `self.editor`, so the form must survive until then.
    pub fn navigate_to_screen(&mut self, screen: Screen) {
        if screen == Screen::Editor
            && self.router.current_screen != Screen::Editor
            && !self.editor.editor.is_loading()
        {
            self.editor = EditorScreen::new(self.current_user.clone());
        }
        self.router.navigate_to(screen);
        self.clear_messages();
    }

    fn start_submit(&mut self) {
        let request = match self.editor.editor.begin_submit() {
            Ok(request) => request,
            Err(EditorError::SubmitInProgress) => return,
            Err(e) => {
                self.set_error(e.to_string());
                return;
            }
        };

        info!("Publishing article {:?}", request.draft.title);
        self.set_status("Publishing article...".to_string());

        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = request.send(api.as_ref()).await;
            // The receiver only goes away when the app is shutting down
            let _ = tx.send(AppEvent::SubmitFinished(result));
        });
    }

    /// Apply every event that background tasks have delivered so far
    pub fn process_pending_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_app_event(event);
        }
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SubmitFinished(result) => {
                match self.editor.editor.finish_submit(result, &mut self.router) {
                    SubmitReport::Published(article) => {
                        self.set_status(format!("Published \"{}\"", article.title));
                        self.home.record_published(article);
                        // Navigation replaced the form, so its draft goes with it
                        self.editor = EditorScreen::new(self.current_user.clone());
                    }
                    SubmitReport::Rejected => {
                        self.set_error("Article was not published".to_string());
                    }
                    SubmitReport::Failed => {
                        self.set_error("Could not reach the server".to_string());
                    }
                }
            }
        }
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        // Main layout: status bar at bottom, content area above
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.active_screen().draw(f, chunks[0]);

        self.draw_status_bar(f, chunks[1]);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    /// Draw status bar with current screen info and shortcuts
    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if let Some(ref msg) = self.status_message {
            format!("Status: {}", msg)
        } else if let Some(ref err) = self.error_message {
            format!("Error: {}", err)
        } else {
            format!(
                "Conduit - {} | Ctrl+C: Quit | F1: Help",
                match self.router.current_screen {
                    Screen::Home => "Home",
                    Screen::Editor => "New Article",
                }
            )
        };

        let style = if self.error_message.is_some() {
            Style::default().fg(Color::Red)
        } else if self.status_message.is_some() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };

        let status_bar = Paragraph::new(status_text)
            .style(style)
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(status_bar, area);
    }

    /// Draw help popup with context-sensitive shortcuts
    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(80, 70, area);

        f.render_widget(Clear, popup_area);

        let help_popup = Paragraph::new(self.get_context_help())
            .block(
                Block::default()
                    .title("Help - Context Shortcuts")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        f.render_widget(help_popup, popup_area);
    }

    /// Get context-sensitive help content
    fn get_context_help(&self) -> String {
        let global_help = "Global Shortcuts:\n\
            Ctrl+C - Quit application\n\
            F1 - Toggle this help\n\n";

        let screen_help = match self.router.current_screen {
            Screen::Home => self.home.help_text(),
            Screen::Editor => self.editor.help_text(),
        };

        format!(
            "{}{}\n\nAPI: {}\nSession file: {}",
            global_help,
            screen_help,
            self.config.api_url,
            self.config.user_file.display()
        )
    }

    /// Set status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.status_message = None;
    }

    /// Clear status and error messages
    pub fn clear_messages(&mut self) {
        self.status_message = None;
        self.error_message = None;
    }
}

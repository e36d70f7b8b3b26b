//! Error list shown above the form

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::ui::Styles;

pub struct ErrorList<'a> {
    errors: &'a [String],
}

impl<'a> ErrorList<'a> {
    pub fn new(errors: &'a [String]) -> Self {
        Self { errors }
    }

    /// Rows needed to draw the list; zero when there is nothing to show
    pub fn height(&self) -> u16 {
        if self.errors.is_empty() {
            0
        } else {
            u16::try_from(self.errors.len())
                .unwrap_or(u16::MAX)
                .saturating_add(2)
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        if self.errors.is_empty() || area.height == 0 {
            return;
        }

        let lines: Vec<Line> = self
            .errors
            .iter()
            .map(|message| Line::from(format!("• {}", message)))
            .collect();

        let list = Paragraph::new(lines).style(Styles::error()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::error()),
        );

        f.render_widget(list, area);
    }
}

//! Page shown when no route matches the current path.

use super::styles::PageStyles;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct NotFoundView<'a> {
    path: &'a str,
    styles: &'a PageStyles,
}

impl<'a> NotFoundView<'a> {
    pub fn new(path: &'a str, styles: &'a PageStyles) -> Self {
        Self { path, styles }
    }
}

impl Widget for NotFoundView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from(Span::styled(
                format!("Nothing lives at {}", self.path),
                self.styles.error,
            )),
            Line::from(""),
            Line::from(Span::styled("Press g to go home.", self.styles.hint)),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Not found"))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::buffer_to_string;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn shows_unmatched_path() {
        let mut terminal = Terminal::new(TestBackend::new(50, 8)).unwrap();
        let styles = PageStyles::default();

        terminal
            .draw(|frame| {
                frame.render_widget(NotFoundView::new("/settings", &styles), frame.area())
            })
            .unwrap();

        let screen = buffer_to_string(terminal.backend().buffer());
        assert!(screen.contains("Nothing lives at /settings"), "{screen}");
        assert!(screen.contains("Press g to go home."), "{screen}");
    }
}

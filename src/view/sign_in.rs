//! Sign-in form widget.

use super::styles::PageStyles;
use crate::state::{SignInField, SignInForm};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Renders the sign-in prompt with a visible cursor on the focused field.
pub struct SignInView<'a> {
    form: &'a SignInForm,
    styles: &'a PageStyles,
}

impl<'a> SignInView<'a> {
    pub fn new(form: &'a SignInForm, styles: &'a PageStyles) -> Self {
        Self { form, styles }
    }

    fn field_line(&self, label: &'static str, value: String, field: SignInField) -> Line<'static> {
        let focused = self.form.focus == field;
        let marker = if focused { "> " } else { "  " };
        let mut spans = vec![Span::raw(marker), Span::raw(label), Span::raw(value)];
        if focused {
            spans.push(Span::styled(
                " ",
                Style::default()
                    .bg(Color::White)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        Line::from(spans)
    }
}

impl Widget for SignInView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = Vec::new();

        match &self.form.error {
            Some(message) => lines.push(Line::from(Span::styled(
                message.clone(),
                self.styles.error,
            ))),
            None => lines.push(Line::from("Sign in to see your notifications.")),
        }
        lines.push(Line::from(""));

        lines.push(self.field_line(
            "Username: ",
            self.form.username.clone(),
            SignInField::Username,
        ));
        let masked = "*".repeat(self.form.password.chars().count());
        lines.push(self.field_line("Password: ", masked, SignInField::Password));

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Tab switch field · Enter sign in · Esc quit",
            self.styles.hint,
        )));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Sign in"))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::buffer_to_string;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(form: &SignInForm) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let styles = PageStyles::default();
        terminal
            .draw(|frame| frame.render_widget(SignInView::new(form, &styles), frame.area()))
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn password_is_masked() {
        let form = SignInForm {
            username: "ada".to_string(),
            password: "secret".to_string(),
            ..SignInForm::default()
        };

        let screen = render(&form);

        assert!(screen.contains("Username: ada"), "{screen}");
        assert!(screen.contains("Password: ******"), "{screen}");
        assert!(!screen.contains("secret"), "{screen}");
    }

    #[test]
    fn retry_message_is_shown() {
        let form = SignInForm::with_message("incorrect username or password. Try again.");

        let screen = render(&form);

        assert!(screen.contains("Try again."), "{screen}");
    }

    #[test]
    fn focused_field_has_marker() {
        let form = SignInForm {
            focus: SignInField::Password,
            ..SignInForm::default()
        };

        let screen = render(&form);

        assert!(screen.contains("> Password:"), "{screen}");
        assert!(screen.contains("  Username:"), "{screen}");
    }
}

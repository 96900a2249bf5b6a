//! TUI rendering and terminal management (impure shell)

mod layout;
mod not_found;
mod notification;
mod sign_in;
mod styles;

pub use layout::render_layout;
pub use not_found::NotFoundView;
pub use notification::{NotificationDetail, NotificationView};
pub use sign_in::SignInView;
pub use styles::{ColorConfig, PageStyles};

use crate::config::keybindings::KeyBindings;
use crate::model::KeyAction;
use crate::router::ROOT_PATH;
use crate::shell::ActiveApplication;
use crate::state::sign_in as form;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app: ActiveApplication,
    key_bindings: KeyBindings,
    styles: PageStyles,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Put the terminal in raw mode on the alternate screen and take over the app.
    pub fn new(app: ActiveApplication, styles: PageStyles) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self::with_terminal(terminal, app, styles))
    }

    /// Run the event loop
    ///
    /// Returns when user quits (q or Ctrl+C, Esc in the sign-in form).
    /// Redraws only after input; idle time is spent blocked on `event::read`.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                    self.draw()?;
                }
                Event::Resize(_, _) => self.draw()?,
                _ => {}
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn with_terminal(terminal: Terminal<B>, app: ActiveApplication, styles: PageStyles) -> Self {
        Self {
            terminal,
            app,
            key_bindings: KeyBindings::default(),
            styles,
        }
    }

    pub fn application(&self) -> &ActiveApplication {
        &self.app
    }

    /// Handle a key press. Returns true when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.app.sign_in_form_mut().is_some() {
            return self.handle_form_key(key);
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        debug!(?action, "Key action");

        match action {
            KeyAction::Quit => return true,
            KeyAction::SelectNext => self.app.select_next(),
            KeyAction::SelectPrevious => self.app.select_previous(),
            KeyAction::Reload => self.app.reload(),
            KeyAction::SignOut => self.app.sign_out(),
            KeyAction::GoHome => self.app.navigate(ROOT_PATH),
        }
        false
    }

    /// Keys go to the sign-in form verbatim, so `q` is a character here.
    fn handle_form_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Enter => {
                self.app.submit_sign_in();
                return false;
            }
            _ => {}
        }

        let Some(current) = self.app.sign_in_form_mut() else {
            return false;
        };
        let taken = std::mem::take(current);
        *current = match key.code {
            KeyCode::Tab | KeyCode::BackTab => form::toggle_focus(taken),
            KeyCode::Backspace => form::handle_backspace(taken),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                form::handle_char_input(taken, ch)
            }
            _ => taken,
        };
        false
    }

    fn draw(&mut self) -> Result<(), TuiError> {
        let app = &self.app;
        let styles = &self.styles;
        self.terminal
            .draw(|frame| render_layout(frame, app, styles))?;
        Ok(())
    }
}

/// Run the mounted application in the terminal until the user quits.
///
/// The terminal is restored even when the event loop fails.
pub fn run_application(app: ActiveApplication, colors: ColorConfig) -> Result<(), TuiError> {
    let mut tui = TuiApp::new(app, PageStyles::new(colors))?;

    let result = tui.run();

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Extract rendered text content from a ratatui Buffer.
#[cfg(test)]
pub(crate) fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;

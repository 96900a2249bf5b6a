//! Screen layout: header, page content, status bar.

use super::not_found::NotFoundView;
use super::notification::NotificationView;
use super::styles::PageStyles;
use crate::shell::{ActiveApplication, Page};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the mounted application into the full frame.
pub fn render_layout(frame: &mut Frame, app: &ActiveApplication, styles: &PageStyles) {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header bar
            Constraint::Min(0),    // Page
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, vertical_chunks[0], app, styles);

    match app.page() {
        Page::Notification(page) => {
            frame.render_widget(NotificationView::new(page, styles), vertical_chunks[1])
        }
        Page::NotFound { path } => {
            frame.render_widget(NotFoundView::new(path, styles), vertical_chunks[1])
        }
    }

    render_status_bar(frame, vertical_chunks[2], app, styles);
}

fn render_header(frame: &mut Frame, area: Rect, app: &ActiveApplication, styles: &PageStyles) {
    let who = match app.session().username() {
        Some(username) => format!("signed in as {username}"),
        None => "signed out".to_string(),
    };
    let api = app.session().context().api();

    let header = Line::from(vec![
        Span::raw(format!(" {} ", api.name)),
        Span::raw(format!("{}  ", app.current_path())),
        Span::raw(format!("[{}]  ", api.region)),
        Span::raw(who),
    ]);

    frame.render_widget(Paragraph::new(header).style(styles.header), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &ActiveApplication, styles: &PageStyles) {
    let text = match app.page() {
        Page::Notification(page) if page.is_awaiting_sign_in() => {
            " Tab: next field | Enter: sign in | Esc: quit"
        }
        Page::Notification(_) => " j/k: select | r: reload | o: sign out | q: quit",
        Page::NotFound { .. } => " g: home | q: quit",
    };

    frame.render_widget(Paragraph::new(text).style(styles.hint), area);
}

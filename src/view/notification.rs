//! Notification list and detail widgets.

use super::sign_in::SignInView;
use super::styles::PageStyles;
use crate::model::{unread_count, Notification};
use crate::state::NotificationPage;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Height of the detail pane below the list, borders included.
const DETAIL_HEIGHT: u16 = 7;

/// Renders whichever state the notification page is in.
pub struct NotificationView<'a> {
    page: &'a NotificationPage,
    styles: &'a PageStyles,
}

impl<'a> NotificationView<'a> {
    pub fn new(page: &'a NotificationPage, styles: &'a PageStyles) -> Self {
        Self { page, styles }
    }
}

impl Widget for NotificationView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.page {
            NotificationPage::SignInRequired(form) => {
                SignInView::new(form, self.styles).render(area, buf);
            }
            NotificationPage::Unavailable { message } => {
                let lines = vec![
                    Line::from(Span::styled(message.clone(), self.styles.error)),
                    Line::from(""),
                    Line::from(Span::styled("Press r to retry.", self.styles.hint)),
                ];
                Paragraph::new(lines)
                    .wrap(Wrap { trim: false })
                    .block(Block::default().borders(Borders::ALL).title("Notifications"))
                    .render(area, buf);
            }
            NotificationPage::Loaded {
                notifications,
                selected,
            } => render_loaded(notifications, *selected, self.styles, area, buf),
        }
    }
}

fn render_loaded(
    notifications: &[Notification],
    selected: usize,
    styles: &PageStyles,
    area: Rect,
    buf: &mut Buffer,
) {
    let title = format!(
        "Notifications ({} unread)",
        unread_count(notifications)
    );

    if notifications.is_empty() {
        Paragraph::new(vec![
            Line::from("No notifications yet."),
            Line::from(Span::styled("Press r to reload.", styles.hint)),
        ])
        .block(Block::default().borders(Borders::ALL).title(title))
        .render(area, buf);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(DETAIL_HEIGHT)])
        .split(area);

    let items: Vec<ListItem> = notifications
        .iter()
        .map(|n| {
            let (marker, style) = if n.read {
                ("  ", styles.read)
            } else {
                ("● ", styles.unread)
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(n.title.clone(), style),
                Span::raw("  "),
                Span::styled(n.created_at.format(TIMESTAMP_FORMAT).to_string(), styles.hint),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(styles.selected);
    let mut state = ListState::default().with_selected(Some(selected));
    StatefulWidget::render(list, chunks[0], buf, &mut state);

    if let Some(notification) = notifications.get(selected) {
        NotificationDetail::new(notification, styles).render(chunks[1], buf);
    }
}

/// Full text of one notification.
pub struct NotificationDetail<'a> {
    notification: &'a Notification,
    styles: &'a PageStyles,
}

impl<'a> NotificationDetail<'a> {
    pub fn new(notification: &'a Notification, styles: &'a PageStyles) -> Self {
        Self {
            notification,
            styles,
        }
    }
}

impl Widget for NotificationDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let n = self.notification;
        let mut meta = vec![Span::styled(
            n.created_at.format(TIMESTAMP_FORMAT).to_string(),
            self.styles.hint,
        )];
        if let Some(category) = &n.category {
            meta.push(Span::raw(" · "));
            meta.push(Span::raw(category.clone()));
        }

        Paragraph::new(vec![Line::from(meta), Line::from(n.message.clone())])
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(n.title.clone()))
            .render(area, buf);
    }
}

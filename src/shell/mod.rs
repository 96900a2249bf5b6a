//! Application Shell.
//!
//! [`ApplicationShell`] is the unmounted shell. [`ApplicationShell::mount`] consumes
//! it and returns the [`ActiveApplication`], so the Unmounted → Mounted transition
//! happens exactly once and there is no way back.

use crate::capability::NotificationApi;
use crate::router::{RouteTable, ViewId};
use crate::session::Session;
use crate::state::{NotificationPage, SignInForm};
use tracing::{info, warn};

/// The page currently rendered by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Notification(NotificationPage),
    /// No route matched the path.
    NotFound { path: String },
}

/// Shell before mounting.
#[derive(Debug)]
pub struct ApplicationShell {
    routes: RouteTable,
}

impl ApplicationShell {
    pub fn new(routes: RouteTable) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Mount the shell at `path`.
    ///
    /// Never fails: a path without a route mounts the not-found page.
    pub fn mount(
        self,
        mut session: Session,
        notifications: Box<dyn NotificationApi>,
        path: &str,
    ) -> ActiveApplication {
        let page = resolve_page(&self.routes, &mut session, notifications.as_ref(), path);
        info!(path, not_found = matches!(page, Page::NotFound { .. }), "Shell mounted");

        ActiveApplication {
            routes: self.routes,
            session,
            notifications,
            current_path: path.to_string(),
            page,
        }
    }
}

fn resolve_page(
    routes: &RouteTable,
    session: &mut Session,
    notifications: &dyn NotificationApi,
    path: &str,
) -> Page {
    match routes.resolve(path) {
        Ok(entry) => match entry.view() {
            ViewId::Notification => {
                Page::Notification(NotificationPage::load(session, notifications))
            }
        },
        Err(not_found) => {
            warn!(path = %not_found.path, "No route for path");
            Page::NotFound {
                path: not_found.path,
            }
        }
    }
}

/// Mounted shell: current path, page, and the session behind it.
pub struct ActiveApplication {
    routes: RouteTable,
    session: Session,
    notifications: Box<dyn NotificationApi>,
    current_path: String,
    page: Page,
}

impl std::fmt::Debug for ActiveApplication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveApplication")
            .field("current_path", &self.current_path)
            .field("page", &self.page)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ActiveApplication {
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// The view mounted at the current path, if any route matched.
    pub fn current_view(&self) -> Option<ViewId> {
        self.routes.resolve(&self.current_path).ok().map(|e| e.view())
    }

    /// Navigate to `path`, remounting the resolved view.
    pub fn navigate(&mut self, path: &str) {
        self.page = resolve_page(
            &self.routes,
            &mut self.session,
            self.notifications.as_ref(),
            path,
        );
        self.current_path = path.to_string();
        info!(path, "Navigated");
    }

    /// Fetch again for the current page.
    pub fn reload(&mut self) {
        if let Page::Notification(page) = &mut self.page {
            if !page.is_awaiting_sign_in() {
                *page = NotificationPage::load(&mut self.session, self.notifications.as_ref());
            }
        }
    }

    /// Submit the sign-in form of the current page.
    pub fn submit_sign_in(&mut self) {
        if let Page::Notification(page) = &mut self.page {
            let current = std::mem::replace(
                page,
                NotificationPage::SignInRequired(SignInForm::default()),
            );
            *page = current.submit_sign_in(&mut self.session, self.notifications.as_ref());
        }
    }

    /// End the session and return the view to its sign-in state.
    pub fn sign_out(&mut self) {
        self.session.sign_out();
        if let Page::Notification(page) = &mut self.page {
            *page = NotificationPage::SignInRequired(SignInForm::default());
        }
    }

    pub fn sign_in_form_mut(&mut self) -> Option<&mut SignInForm> {
        match &mut self.page {
            Page::Notification(page) => page.sign_in_form_mut(),
            Page::NotFound { .. } => None,
        }
    }

    pub fn select_next(&mut self) {
        if let Page::Notification(page) = &mut self.page {
            page.select_next();
        }
    }

    pub fn select_previous(&mut self) {
        if let Page::Notification(page) = &mut self.page {
            page.select_previous();
        }
    }
}

//! Notification view state machine.
//!
//! ```text
//! SignInRequired --sign in ok--> fetch --ok--> Loaded
//!       ^   |                          \--err--> Unavailable
//!       |   \--sign in fails--> SignInRequired (retry message)
//!       \------ token rejected / session expired during fetch
//! ```

use super::sign_in::{self, SignInForm};
use crate::capability::NotificationApi;
use crate::model::{unread_count, ApiError, AuthenticationError, Notification};
use crate::session::Session;
use tracing::{debug, warn};

/// State of the notification view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationPage {
    /// No usable session; the user must sign in.
    SignInRequired(SignInForm),
    /// Notifications fetched for the signed-in user.
    Loaded {
        notifications: Vec<Notification>,
        selected: usize,
    },
    /// The notification API failed for a reason signing in again will not fix.
    Unavailable { message: String },
}

impl NotificationPage {
    /// Fetch notifications for the current session.
    ///
    /// Falls back to the sign-in form when no session is active or the token is
    /// rejected.
    pub fn load(session: &mut Session, api: &dyn NotificationApi) -> Self {
        let token = match session.access_token() {
            Ok(token) => token,
            Err(AuthenticationError::NoActiveSession) => {
                debug!("Notification view needs a session");
                return NotificationPage::SignInRequired(SignInForm::default());
            }
            Err(e) => return NotificationPage::SignInRequired(SignInForm::with_message(e.to_string())),
        };

        match api.fetch_notifications(session.context().api(), &token) {
            Ok(notifications) => {
                debug!(
                    count = notifications.len(),
                    unread = unread_count(&notifications),
                    "Notifications loaded"
                );
                NotificationPage::Loaded {
                    notifications,
                    selected: 0,
                }
            }
            Err(ApiError::Unauthorized) => {
                warn!("Notification API rejected the session token");
                session.sign_out();
                NotificationPage::SignInRequired(SignInForm::with_message(
                    "Your session is no longer valid. Sign in again.",
                ))
            }
            Err(e) => {
                warn!(error = %e, "Notification fetch failed");
                NotificationPage::Unavailable {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Submit the sign-in form and, on success, fetch notifications.
    ///
    /// No-op outside the sign-in state.
    pub fn submit_sign_in(self, session: &mut Session, api: &dyn NotificationApi) -> Self {
        let form = match self {
            NotificationPage::SignInRequired(form) => form,
            other => return other,
        };

        let (form, credentials) = sign_in::submit(form);
        let Some(credentials) = credentials else {
            return NotificationPage::SignInRequired(form);
        };

        match session.authenticate(&credentials) {
            Ok(()) => Self::load(session, api),
            Err(e) => NotificationPage::SignInRequired(form.rejected(&e)),
        }
    }

    pub fn is_awaiting_sign_in(&self) -> bool {
        matches!(self, NotificationPage::SignInRequired(_))
    }

    pub fn sign_in_form_mut(&mut self) -> Option<&mut SignInForm> {
        match self {
            NotificationPage::SignInRequired(form) => Some(form),
            _ => None,
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        match self {
            NotificationPage::Loaded { notifications, .. } => notifications,
            _ => &[],
        }
    }

    pub fn selected(&self) -> Option<&Notification> {
        match self {
            NotificationPage::Loaded {
                notifications,
                selected,
            } => notifications.get(*selected),
            _ => None,
        }
    }

    /// Move selection down, wrapping to the top.
    pub fn select_next(&mut self) {
        if let NotificationPage::Loaded {
            notifications,
            selected,
        } = self
        {
            if !notifications.is_empty() {
                *selected = (*selected + 1) % notifications.len();
            }
        }
    }

    /// Move selection up, wrapping to the bottom.
    pub fn select_previous(&mut self) {
        if let NotificationPage::Loaded {
            notifications,
            selected,
        } = self
        {
            if !notifications.is_empty() {
                *selected = selected
                    .checked_sub(1)
                    .unwrap_or(notifications.len() - 1);
            }
        }
    }
}

#[cfg(test)]
#[path = "notification_page_tests.rs"]
mod tests;

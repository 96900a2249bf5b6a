//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without a terminal.

pub mod notification_page;
pub mod sign_in;

// Re-export for convenience
pub use notification_page::NotificationPage;
pub use sign_in::{SignInField, SignInForm};

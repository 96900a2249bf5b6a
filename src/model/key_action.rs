//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
/// Only consulted outside the sign-in form; the form consumes raw keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Select the next notification. Default: j/↓
    SelectNext,
    /// Select the previous notification. Default: k/↑
    SelectPrevious,
    /// Fetch notifications again. Default: r
    Reload,
    /// End the current session. Default: o
    SignOut,
    /// Navigate back to the root route. Default: g/Home
    GoHome,
    /// Quit the application. Default: q/Ctrl+c
    Quit,
}

//! Page styling configuration.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== PageStyles =====

/// Styles shared by all pages.
#[derive(Debug, Clone, Copy)]
pub struct PageStyles {
    pub header: Style,
    pub unread: Style,
    pub read: Style,
    pub selected: Style,
    pub error: Style,
    pub hint: Style,
}

impl PageStyles {
    pub fn new(colors: ColorConfig) -> Self {
        if !colors.colors_enabled() {
            return Self {
                header: Style::default().add_modifier(Modifier::BOLD),
                unread: Style::default().add_modifier(Modifier::BOLD),
                read: Style::default(),
                selected: Style::default().add_modifier(Modifier::REVERSED),
                error: Style::default().add_modifier(Modifier::BOLD),
                hint: Style::default(),
            };
        }

        Self {
            header: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            unread: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            read: Style::default().fg(Color::Gray),
            selected: Style::default().bg(Color::DarkGray),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            hint: Style::default().fg(Color::DarkGray),
        }
    }
}

impl Default for PageStyles {
    fn default() -> Self {
        Self::new(ColorConfig::from_env_and_args(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    /// Restores `NO_COLOR` to unset when dropped.
    struct NoColorGuard;

    impl NoColorGuard {
        fn new() -> Self {
            env::remove_var("NO_COLOR");
            NoColorGuard
        }
    }

    impl Drop for NoColorGuard {
        fn drop(&mut self) {
            env::remove_var("NO_COLOR");
        }
    }

    #[test]
    #[serial(no_color)]
    fn no_color_env_var_disables_colors() {
        let _guard = NoColorGuard::new();

        env::set_var("NO_COLOR", "1");

        assert!(!ColorConfig::from_env_and_args(false).colors_enabled());
    }

    #[test]
    #[serial(no_color)]
    fn no_color_env_var_with_empty_value_still_disables_colors() {
        let _guard = NoColorGuard::new();

        env::set_var("NO_COLOR", "");

        assert!(!ColorConfig::from_env_and_args(false).colors_enabled());
    }

    #[test]
    #[serial(no_color)]
    fn colors_enabled_without_flag_or_env_var() {
        let _guard = NoColorGuard::new();

        assert!(ColorConfig::from_env_and_args(false).colors_enabled());
    }

    #[test]
    fn no_color_flag_disables_colors() {
        assert!(!ColorConfig::from_env_and_args(true).colors_enabled());
    }

    #[test]
    fn monochrome_styles_use_no_foreground_color() {
        let styles = PageStyles::new(ColorConfig::from_env_and_args(true));
        assert_eq!(styles.error.fg, None);
        assert_eq!(styles.unread.fg, None);
    }
}

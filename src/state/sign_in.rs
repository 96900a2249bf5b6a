//! Sign-in form state (pure state transitions).
//!
//! All functions take the form by value and return the updated form,
//! testable without a terminal.

use crate::capability::Credentials;
use crate::model::AuthenticationError;

/// Which input of the form receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignInField {
    #[default]
    Username,
    Password,
}

/// Username/password form shown when the view needs a session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignInForm {
    pub username: String,
    pub password: String,
    pub focus: SignInField,
    /// Message from the last failed attempt, shown above the inputs.
    pub error: Option<String>,
}

impl SignInForm {
    /// Empty form carrying a message (e.g. "session expired").
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Form after a rejected attempt: keeps the username, clears the password,
    /// focuses the password field.
    pub fn rejected(self, err: &AuthenticationError) -> Self {
        Self {
            username: self.username,
            password: String::new(),
            focus: SignInField::Password,
            error: Some(format!("{err}. Try again.")),
        }
    }
}

/// Append a character to the focused field.
pub fn handle_char_input(mut form: SignInForm, ch: char) -> SignInForm {
    match form.focus {
        SignInField::Username => form.username.push(ch),
        SignInField::Password => form.password.push(ch),
    }
    form
}

/// Delete the last character of the focused field.
pub fn handle_backspace(mut form: SignInForm) -> SignInForm {
    match form.focus {
        SignInField::Username => {
            form.username.pop();
        }
        SignInField::Password => {
            form.password.pop();
        }
    }
    form
}

/// Move focus to the other field.
pub fn toggle_focus(mut form: SignInForm) -> SignInForm {
    form.focus = match form.focus {
        SignInField::Username => SignInField::Password,
        SignInField::Password => SignInField::Username,
    };
    form
}

/// Submit the form.
///
/// Returns credentials when both fields are filled in. Otherwise the form comes back
/// with an error message and focus on the first empty field.
pub fn submit(mut form: SignInForm) -> (SignInForm, Option<Credentials>) {
    if form.username.trim().is_empty() {
        form.focus = SignInField::Username;
        form.error = Some("Enter a username".to_string());
        return (form, None);
    }
    if form.password.is_empty() {
        form.focus = SignInField::Password;
        form.error = Some("Enter a password".to_string());
        return (form, None);
    }

    let credentials = Credentials::new(form.username.trim(), form.password.clone());
    form.error = None;
    (form, Some(credentials))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: SignInForm, text: &str) -> SignInForm {
        text.chars().fold(form, handle_char_input)
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let form = type_str(SignInForm::default(), "ada");
        let form = toggle_focus(form);
        let form = type_str(form, "pw");

        assert_eq!(form.username, "ada");
        assert_eq!(form.password, "pw");
        assert_eq!(form.focus, SignInField::Password);
    }

    #[test]
    fn backspace_removes_last_char_of_focused_field() {
        let form = type_str(SignInForm::default(), "adam");
        let form = handle_backspace(form);
        assert_eq!(form.username, "ada");

        let empty = handle_backspace(SignInForm::default());
        assert_eq!(empty.username, "", "backspace on empty field is a no-op");
    }

    #[test]
    fn toggle_focus_cycles() {
        let form = toggle_focus(toggle_focus(SignInForm::default()));
        assert_eq!(form.focus, SignInField::Username);
    }

    #[test]
    fn submit_without_username_focuses_username() {
        let form = SignInForm {
            password: "pw".to_string(),
            focus: SignInField::Password,
            ..SignInForm::default()
        };

        let (form, credentials) = submit(form);

        assert!(credentials.is_none());
        assert_eq!(form.focus, SignInField::Username);
        assert_eq!(form.error.as_deref(), Some("Enter a username"));
    }

    #[test]
    fn submit_without_password_focuses_password() {
        let (form, credentials) = submit(type_str(SignInForm::default(), "ada"));

        assert!(credentials.is_none());
        assert_eq!(form.focus, SignInField::Password);
    }

    #[test]
    fn submit_with_both_fields_yields_trimmed_credentials() {
        let form = SignInForm {
            username: "  ada ".to_string(),
            password: "pw".to_string(),
            focus: SignInField::Password,
            error: Some("old".to_string()),
        };

        let (form, credentials) = submit(form);

        assert_eq!(credentials, Some(Credentials::new("ada", "pw")));
        assert_eq!(form.error, None);
    }

    #[test]
    fn rejected_keeps_username_and_clears_password() {
        let form = SignInForm {
            username: "ada".to_string(),
            password: "wrong".to_string(),
            ..SignInForm::default()
        };

        let form = form.rejected(&AuthenticationError::InvalidCredentials);

        assert_eq!(form.username, "ada");
        assert_eq!(form.password, "");
        assert_eq!(form.focus, SignInField::Password);
        assert_eq!(
            form.error.as_deref(),
            Some("incorrect username or password. Try again.")
        );
    }
}

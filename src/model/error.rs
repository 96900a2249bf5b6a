//! Error types for the notification app.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`BootstrapError`] - startup failures; always fatal, never mounts the shell
//!   - [`ConfigurationError`] - a record field is missing, a placeholder, or malformed
//!   - [`CloudConfigurationError`] - the generic cloud configurator rejected the record
//!   - [`AuthConfigurationError`] - the identity capability rejected the parameters
//! - [`AuthenticationError`] - sign-in and token failures; recoverable per user
//! - [`TokenError`] - identity capability could not hand out a token for a handle
//! - [`ApiError`] - remote notification API failures
//! - [`RouteNotFound`] - a path has no route entry; renders the not-found view
//!
//! # Recovery Strategy
//!
//! Bootstrap errors abort startup with a visible message. Authentication errors surface
//! as a sign-in retry prompt inside the notification view. A missing route renders the
//! not-found page while the shell stays mounted.

use std::fmt;
use thiserror::Error;

/// Names of the Configuration Record fields, used to point at the failing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    Region,
    AuthRegion,
    IdentityPoolId,
    AppClientId,
    ApiName,
    ApiEndpoint,
    ApiRegion,
}

impl ConfigField {
    /// All fields in declaration order.
    pub const ALL: [ConfigField; 7] = [
        ConfigField::Region,
        ConfigField::AuthRegion,
        ConfigField::IdentityPoolId,
        ConfigField::AppClientId,
        ConfigField::ApiName,
        ConfigField::ApiEndpoint,
        ConfigField::ApiRegion,
    ];

    /// Key used for this field in the config file.
    pub fn key(self) -> &'static str {
        match self {
            ConfigField::Region => "region",
            ConfigField::AuthRegion => "auth_region",
            ConfigField::IdentityPoolId => "identity_pool_id",
            ConfigField::AppClientId => "app_client_id",
            ConfigField::ApiName => "api_name",
            ConfigField::ApiEndpoint => "api_endpoint",
            ConfigField::ApiRegion => "api_region",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A Configuration Record field is unusable.
///
/// Raised before any capability is configured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Field is empty or absent.
    #[error("configuration field `{field}` is missing")]
    Missing { field: ConfigField },

    /// Field still holds a template placeholder such as `<AWS_REGION>`.
    #[error("configuration field `{field}` is an unresolved placeholder: {value}")]
    Placeholder { field: ConfigField, value: String },

    /// Region field is not a region identifier.
    #[error("configuration field `{field}` is not a valid region identifier: {value:?}")]
    InvalidRegion { field: ConfigField, value: String },

    /// Endpoint field is not an absolute http(s) URL.
    #[error("configuration field `{field}` is not a valid endpoint ({reason}): {value:?}")]
    InvalidEndpoint {
        field: ConfigField,
        value: String,
        reason: String,
    },
}

impl ConfigurationError {
    /// The field this error points at.
    pub fn field(&self) -> ConfigField {
        match self {
            ConfigurationError::Missing { field }
            | ConfigurationError::Placeholder { field, .. }
            | ConfigurationError::InvalidRegion { field, .. }
            | ConfigurationError::InvalidEndpoint { field, .. } => *field,
        }
    }
}

/// The generic cloud configurator refused the record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CloudConfigurationError {
    #[error("cloud configuration rejected: {reason}")]
    Rejected { reason: String },
}

/// The identity capability rejected the supplied parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthConfigurationError {
    #[error("identity provider rejected configuration: {reason}")]
    Rejected { reason: String },
}

/// Startup failure. Always fatal: the shell is never mounted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    CloudConfiguration(#[from] CloudConfigurationError),

    #[error(transparent)]
    AuthConfiguration(#[from] AuthConfigurationError),

    /// The generic configurator produced a context for a different region than the
    /// record names, so the identity capability cannot be configured against it.
    #[error("cloud context region {actual} does not match configured region {expected}")]
    ContextMismatch { expected: String, actual: String },

    /// `initialize` was called after a previous call already configured capabilities.
    #[error("session initializer has already run")]
    AlreadyInitialized,
}

/// Sign-in or session failure. Recoverable: the user is prompted to sign in again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthenticationError {
    #[error("incorrect username or password")]
    InvalidCredentials,

    #[error("no active session")]
    NoActiveSession,

    #[error("session expired, sign in again")]
    SessionExpired,

    #[error("identity provider is not configured")]
    NotConfigured,
}

/// Identity capability could not produce a token for a session handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("unknown session")]
    UnknownSession,
}

/// Remote notification API failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request was not authorized")]
    Unauthorized,

    #[error("notification service unavailable: {0}")]
    Unavailable(String),

    #[error("could not decode notifications: {0}")]
    Decode(String),
}

/// Requested path has no route entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no route for path {path:?}")]
pub struct RouteNotFound {
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_reports_field_key() {
        let err = ConfigurationError::Placeholder {
            field: ConfigField::IdentityPoolId,
            value: "<COGNITO_USER_POOL_ID>".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("identity_pool_id"), "got: {message}");
        assert!(message.contains("<COGNITO_USER_POOL_ID>"), "got: {message}");
        assert_eq!(err.field(), ConfigField::IdentityPoolId);
    }

    #[test]
    fn bootstrap_error_wraps_configuration_error_transparently() {
        let inner = ConfigurationError::Missing {
            field: ConfigField::ApiEndpoint,
        };
        let outer: BootstrapError = inner.clone().into();
        assert_eq!(outer.to_string(), inner.to_string());
        assert!(matches!(outer, BootstrapError::Configuration(_)));
    }

    #[test]
    fn bootstrap_error_from_auth_configuration_error() {
        let err: BootstrapError = AuthConfigurationError::Rejected {
            reason: "unknown pool".to_string(),
        }
        .into();
        assert!(matches!(err, BootstrapError::AuthConfiguration(_)));
    }

    #[test]
    fn config_field_keys_are_unique() {
        let mut keys: Vec<_> = ConfigField::ALL.iter().map(|f| f.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), ConfigField::ALL.len());
    }

    #[test]
    fn route_not_found_mentions_path() {
        let err = RouteNotFound {
            path: "/settings".to_string(),
        };
        assert_eq!(err.to_string(), "no route for path \"/settings\"");
    }
}

//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod identifiers;
pub mod key_action;
pub mod notification;

// Re-export for convenience
pub use error::{
    ApiError, AuthConfigurationError, AuthenticationError, BootstrapError,
    CloudConfigurationError, ConfigField, ConfigurationError, RouteNotFound, TokenError,
};
pub use identifiers::{
    is_placeholder, ApiEndpoint, ApiName, AppClientId, IdentityPoolId, InvalidEndpoint,
    InvalidIdentifier, RegionId,
};
pub use key_action::KeyAction;
pub use notification::{parse_notifications, unread_count, Notification, NotificationDecodeError};

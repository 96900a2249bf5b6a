//! Seams to the external capabilities the bootstrap drives.
//!
//! The identity provider, the generic cloud configurator and the notification API
//! are black boxes. Each is a trait here; the bootstrap receives implementations by
//! injection and never reaches for ambient global state.
//!
//! - [`local`]: in-process implementations used by the binary
//! - `recording`: recording doubles for tests (unit tests, or the `test-doubles` feature)

use crate::config::{AuthParameters, DeploymentConfig};
use crate::model::{
    ApiEndpoint, ApiError, ApiName, AuthConfigurationError, AuthenticationError,
    CloudConfigurationError, Notification, RegionId, TokenError,
};
use chrono::{DateTime, Utc};
use std::fmt;

pub mod local;
#[cfg(any(test, feature = "test-doubles"))]
pub mod recording;

pub use local::{FileNotifications, LocalCloud, LocalIdentityProvider};

/// Generic cloud capability: establishes region and API endpoint context.
pub trait CloudConfigurator {
    /// Configure from the full record and return the established context.
    ///
    /// # Errors
    ///
    /// Returns [`CloudConfigurationError`] if the capability refuses the record.
    fn configure(&self, config: &DeploymentConfig) -> Result<CloudContext, CloudConfigurationError>;
}

/// Identity capability: sign-in, tokens and credential refresh.
pub trait IdentityProvider {
    /// Bind the provider to an identity pool and app client.
    ///
    /// Takes the context produced by [`CloudConfigurator::configure`], so it cannot be
    /// called before the generic configuration step has completed.
    ///
    /// # Errors
    ///
    /// Returns [`AuthConfigurationError`] if the parameters are rejected.
    fn configure(
        &self,
        context: &CloudContext,
        config: &DeploymentConfig,
    ) -> Result<(), AuthConfigurationError>;

    /// Sign a user in against the given pool and client.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticationError`] for bad credentials or an unconfigured provider.
    fn authenticate(
        &self,
        params: &AuthParameters,
        credentials: &Credentials,
    ) -> Result<SessionHandle, AuthenticationError>;

    /// Current access token for a session.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Expired`] when the token needs a refresh.
    fn token(&self, handle: &SessionHandle) -> Result<AccessToken, TokenError>;

    /// Exchange an expired session for a fresh one.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticationError`] when the session can no longer be refreshed.
    fn refresh(&self, handle: &SessionHandle) -> Result<SessionHandle, AuthenticationError>;

    /// Invalidate a session.
    fn sign_out(&self, handle: &SessionHandle);
}

/// Remote notification API.
pub trait NotificationApi {
    /// Fetch the signed-in user's notifications.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] when the token is rejected.
    fn fetch_notifications(
        &self,
        api: &ApiBinding,
        token: &AccessToken,
    ) -> Result<Vec<Notification>, ApiError>;
}

/// A named API bound to its endpoint and region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBinding {
    pub name: ApiName,
    pub endpoint: ApiEndpoint,
    pub region: RegionId,
}

/// Context established by the generic cloud configuration step.
///
/// Proof that step one ran; the identity step requires a reference to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudContext {
    region: RegionId,
    api: ApiBinding,
}

impl CloudContext {
    pub fn new(region: RegionId, api: ApiBinding) -> Self {
        Self { region, api }
    }

    /// Context a well-behaved configurator derives from the record.
    pub fn from_config(config: &DeploymentConfig) -> Self {
        Self {
            region: config.region().clone(),
            api: ApiBinding {
                name: config.api_name().clone(),
                endpoint: config.api_endpoint().clone(),
                region: config.api_region().clone(),
            },
        }
    }

    pub fn region(&self) -> &RegionId {
        &self.region
    }

    pub fn api(&self) -> &ApiBinding {
        &self.api
    }
}

/// Username and password for a sign-in attempt.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque handle for an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionHandle {
    id: String,
    username: String,
}

impl SessionHandle {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Bearer token attached to API calls.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

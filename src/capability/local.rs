//! In-process capability implementations.
//!
//! Stand-ins for the managed identity provider and the remote notification API so
//! the shell can run without network access. The identity provider checks that
//! every sign-in targets the pool and client it was configured with.

use super::{
    AccessToken, ApiBinding, CloudConfigurator, CloudContext, Credentials, IdentityProvider,
    NotificationApi, SessionHandle,
};
use crate::config::{AuthParameters, DeploymentConfig, LocalUser};
use crate::model::{
    parse_notifications, ApiError, AuthConfigurationError, AuthenticationError,
    CloudConfigurationError, Notification, TokenError,
};
use chrono::{DateTime, Duration, Utc};
use std::cell::{Cell, RefCell};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::num::NonZeroU64;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Generic configurator that derives the context straight from the record.
#[derive(Debug, Default)]
pub struct LocalCloud;

impl CloudConfigurator for LocalCloud {
    fn configure(&self, config: &DeploymentConfig) -> Result<CloudContext, CloudConfigurationError> {
        let context = CloudContext::from_config(config);
        debug!(
            region = %context.region(),
            api = %context.api().name,
            endpoint = %context.api().endpoint,
            "Local cloud context established"
        );
        Ok(context)
    }
}

#[derive(Debug)]
struct LocalSession {
    username: String,
    expires_at: DateTime<Utc>,
}

/// Identity provider backed by a fixed user list.
#[derive(Debug)]
pub struct LocalIdentityProvider {
    users: Vec<LocalUser>,
    token_ttl: Duration,
    configured: RefCell<Option<AuthParameters>>,
    sessions: RefCell<HashMap<String, LocalSession>>,
    next_session: Cell<u64>,
}

impl LocalIdentityProvider {
    /// Tokens live for `token_ttl_secs`; a zero lifetime is unrepresentable.
    pub fn new(users: Vec<LocalUser>, token_ttl_secs: NonZeroU64) -> Self {
        let ttl_secs = i64::try_from(token_ttl_secs.get()).unwrap_or(i64::MAX / 1_000);
        Self::with_token_ttl(
            users,
            Duration::try_seconds(ttl_secs).unwrap_or(Duration::MAX),
        )
    }

    fn with_token_ttl(users: Vec<LocalUser>, token_ttl: Duration) -> Self {
        Self {
            users,
            token_ttl,
            configured: RefCell::new(None),
            sessions: RefCell::new(HashMap::new()),
            next_session: Cell::new(1),
        }
    }

    fn open_session(&self, params: &AuthParameters, username: &str) -> SessionHandle {
        let n = self.next_session.get();
        self.next_session.set(n + 1);

        let id = format!("{}-{}", params.identity_pool_id, n);
        let expires_at = Utc::now()
            .checked_add_signed(self.token_ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.sessions.borrow_mut().insert(
            id.clone(),
            LocalSession {
                username: username.to_string(),
                expires_at,
            },
        );
        SessionHandle::new(id, username)
    }
}

impl IdentityProvider for LocalIdentityProvider {
    fn configure(
        &self,
        context: &CloudContext,
        config: &DeploymentConfig,
    ) -> Result<(), AuthConfigurationError> {
        let params = config.auth_parameters();
        info!(
            cloud_region = %context.region(),
            auth_region = %params.region,
            identity_pool_id = %params.identity_pool_id,
            app_client_id = %params.app_client_id,
            users = self.users.len(),
            "Local identity provider configured"
        );
        *self.configured.borrow_mut() = Some(params);
        Ok(())
    }

    fn authenticate(
        &self,
        params: &AuthParameters,
        credentials: &Credentials,
    ) -> Result<SessionHandle, AuthenticationError> {
        let configured = self.configured.borrow();
        let Some(expected) = configured.as_ref() else {
            return Err(AuthenticationError::NotConfigured);
        };
        if expected != params {
            warn!(
                requested_pool = %params.identity_pool_id,
                requested_client = %params.app_client_id,
                "Sign-in targeted a pool or client this provider is not configured for"
            );
            return Err(AuthenticationError::NotConfigured);
        }

        let known = self
            .users
            .iter()
            .any(|u| u.username == credentials.username && u.password == credentials.password);
        if !known {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.open_session(params, &credentials.username))
    }

    fn token(&self, handle: &SessionHandle) -> Result<AccessToken, TokenError> {
        let sessions = self.sessions.borrow();
        let session = sessions.get(handle.id()).ok_or(TokenError::UnknownSession)?;
        if Utc::now() >= session.expires_at {
            return Err(TokenError::Expired);
        }
        Ok(AccessToken::new(
            format!("local.{}.{}", handle.id(), session.username),
            session.expires_at,
        ))
    }

    fn refresh(&self, handle: &SessionHandle) -> Result<SessionHandle, AuthenticationError> {
        let removed = self.sessions.borrow_mut().remove(handle.id());
        let Some(session) = removed else {
            return Err(AuthenticationError::SessionExpired);
        };
        let configured = self.configured.borrow().clone();
        let params = configured.ok_or(AuthenticationError::NotConfigured)?;
        Ok(self.open_session(&params, &session.username))
    }

    fn sign_out(&self, handle: &SessionHandle) {
        self.sessions.borrow_mut().remove(handle.id());
    }
}

/// Notification API reading a JSON array from disk.
///
/// Without a file every fetch returns an empty list.
#[derive(Debug, Default)]
pub struct FileNotifications {
    path: Option<PathBuf>,
}

impl FileNotifications {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl NotificationApi for FileNotifications {
    fn fetch_notifications(
        &self,
        api: &ApiBinding,
        token: &AccessToken,
    ) -> Result<Vec<Notification>, ApiError> {
        if token.value().is_empty() || token.is_expired_at(Utc::now()) {
            return Err(ApiError::Unauthorized);
        }

        let Some(path) = &self.path else {
            debug!(api = %api.name, "No notifications file configured");
            return Ok(Vec::new());
        };

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ApiError::Unavailable(format!("{}: {}", path.display(), e)))?;
        let mut notifications =
            parse_notifications(&contents).map_err(|e| ApiError::Decode(e.to_string()))?;
        notifications.sort_by_key(|n| Reverse(n.created_at));

        debug!(api = %api.name, count = notifications.len(), "Fetched notifications");
        Ok(notifications)
    }
}

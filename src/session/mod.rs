//! Session Initializer.
//!
//! Turns a raw [`ConfigurationRecord`] into a ready [`Session`]:
//!
//! 1. validate the record (no capability is touched if this fails)
//! 2. generic cloud configure, producing a [`CloudContext`]
//! 3. check the context matches the record's region
//! 4. identity configure, which needs the context from step 2
//!
//! The initializer runs at most once. After step 2 has started it no longer owns
//! any capability and every further call fails with
//! [`BootstrapError::AlreadyInitialized`].

use crate::capability::{
    AccessToken, ApiBinding, CloudConfigurator, CloudContext, Credentials, IdentityProvider,
    SessionHandle,
};
use crate::config::{AuthParameters, ConfigurationRecord, DeploymentConfig};
use crate::model::{AuthenticationError, BootstrapError, TokenError};
use tracing::{debug, info, warn};

enum InitializerState {
    Pending {
        cloud: Box<dyn CloudConfigurator>,
        identity: Box<dyn IdentityProvider>,
    },
    Consumed,
}

/// One-shot bootstrap of the cloud and identity capabilities.
pub struct SessionInitializer {
    state: InitializerState,
}

impl SessionInitializer {
    pub fn new(cloud: Box<dyn CloudConfigurator>, identity: Box<dyn IdentityProvider>) -> Self {
        Self {
            state: InitializerState::Pending { cloud, identity },
        }
    }

    /// Whether a previous call already configured capabilities.
    pub fn is_initialized(&self) -> bool {
        matches!(self.state, InitializerState::Consumed)
    }

    /// Validate the record and configure both capabilities in order.
    ///
    /// # Errors
    ///
    /// - [`BootstrapError::Configuration`] if the record is malformed; the initializer
    ///   stays pending and no capability has been called
    /// - [`BootstrapError::CloudConfiguration`] / [`BootstrapError::AuthConfiguration`]
    ///   if a capability refuses the record
    /// - [`BootstrapError::ContextMismatch`] if the generic step established a context
    ///   for another region
    /// - [`BootstrapError::AlreadyInitialized`] on any call after the first one that
    ///   reached the capabilities
    pub fn initialize(&mut self, record: &ConfigurationRecord) -> Result<Session, BootstrapError> {
        if self.is_initialized() {
            warn!("Session initializer called again after it already ran");
            return Err(BootstrapError::AlreadyInitialized);
        }

        let config = record.validate().inspect_err(|e| {
            warn!(field = %e.field(), error = %e, "Configuration record rejected");
        })?;

        let InitializerState::Pending { cloud, identity } =
            std::mem::replace(&mut self.state, InitializerState::Consumed)
        else {
            return Err(BootstrapError::AlreadyInitialized);
        };

        let cloud_context = cloud.configure(&config).inspect_err(|e| {
            warn!(error = %e, "Generic cloud configuration failed");
        })?;
        info!(
            region = %cloud_context.region(),
            api = %cloud_context.api().name,
            "Generic cloud configuration complete"
        );

        if cloud_context.region() != config.region() {
            warn!(
                expected = %config.region(),
                actual = %cloud_context.region(),
                "Cloud context does not match configured region"
            );
            return Err(BootstrapError::ContextMismatch {
                expected: config.region().to_string(),
                actual: cloud_context.region().to_string(),
            });
        }

        identity.configure(&cloud_context, &config).inspect_err(|e| {
            warn!(error = %e, "Identity provider configuration failed");
        })?;
        info!(
            identity_pool_id = %config.identity_pool_id(),
            app_client_id = %config.app_client_id(),
            "Identity provider configured"
        );

        Ok(Session {
            context: SessionContext {
                config,
                cloud: cloud_context,
            },
            identity,
            handle: None,
        })
    }
}

/// Configuration established by the initializer, shared by every later call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    config: DeploymentConfig,
    cloud: CloudContext,
}

impl SessionContext {
    pub fn config(&self) -> &DeploymentConfig {
        &self.config
    }

    pub fn cloud(&self) -> &CloudContext {
        &self.cloud
    }

    pub fn auth_parameters(&self) -> AuthParameters {
        self.config.auth_parameters()
    }

    /// The API views call for data.
    pub fn api(&self) -> &ApiBinding {
        self.cloud.api()
    }
}

/// A configured identity capability plus the user's session, if one is active.
///
/// The session handle never leaves this type; callers only see tokens.
pub struct Session {
    context: SessionContext,
    identity: Box<dyn IdentityProvider>,
    handle: Option<SessionHandle>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("context", &self.context)
            .field("active", &self.handle.is_some())
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Signed-in user name, if a session is active.
    pub fn username(&self) -> Option<&str> {
        self.handle.as_ref().map(SessionHandle::username)
    }

    /// Sign in against the configured identity pool and app client.
    ///
    /// Replaces any previous session.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`AuthenticationError`]; the previous session, if any,
    /// is kept in that case.
    pub fn authenticate(&mut self, credentials: &Credentials) -> Result<(), AuthenticationError> {
        let params = self.context.auth_parameters();
        let handle = self
            .identity
            .authenticate(&params, credentials)
            .inspect_err(|e| {
                warn!(username = %credentials.username, error = %e, "Sign-in failed");
            })?;

        info!(username = %handle.username(), "Signed in");
        if let Some(previous) = self.handle.replace(handle) {
            self.identity.sign_out(&previous);
        }
        Ok(())
    }

    /// Token for the active session, refreshing once if it has expired.
    ///
    /// # Errors
    ///
    /// - [`AuthenticationError::NoActiveSession`] if nobody is signed in
    /// - [`AuthenticationError::SessionExpired`] if the session could not be refreshed;
    ///   the session is dropped
    pub fn access_token(&mut self) -> Result<AccessToken, AuthenticationError> {
        let handle = self
            .handle
            .as_ref()
            .ok_or(AuthenticationError::NoActiveSession)?;

        match self.identity.token(handle) {
            Ok(token) => Ok(token),
            Err(TokenError::Expired) => {
                debug!("Access token expired, refreshing session");
                let refreshed = match self.identity.refresh(handle) {
                    Ok(refreshed) => refreshed,
                    Err(e) => {
                        warn!(error = %e, "Session refresh failed");
                        self.handle = None;
                        return Err(AuthenticationError::SessionExpired);
                    }
                };
                let token = self.identity.token(&refreshed);
                self.handle = Some(refreshed);
                token.map_err(|e| {
                    warn!(error = %e, "Refreshed session has no usable token");
                    self.handle = None;
                    AuthenticationError::SessionExpired
                })
            }
            Err(TokenError::UnknownSession) => {
                warn!("Identity provider no longer knows this session");
                self.handle = None;
                Err(AuthenticationError::SessionExpired)
            }
        }
    }

    /// End the active session. No-op when nobody is signed in.
    pub fn sign_out(&mut self) {
        if let Some(handle) = self.handle.take() {
            info!(username = %handle.username(), "Signed out");
            self.identity.sign_out(&handle);
        }
    }
}

#[cfg(test)]
mod tests;

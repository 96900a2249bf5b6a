//! Recording capability doubles.
//!
//! Every double writes to a shared [`CallLog`], so a test can hand the doubles to
//! the bootstrap by value and still observe exactly which calls reached which
//! capability, in which order, with which parameters.

use super::{
    AccessToken, ApiBinding, CloudConfigurator, CloudContext, Credentials, IdentityProvider,
    NotificationApi, SessionHandle,
};
use crate::config::{AuthParameters, DeploymentConfig};
use crate::model::{
    ApiError, AuthConfigurationError, AuthenticationError, CloudConfigurationError, Notification,
    RegionId, TokenError,
};
use chrono::{Duration, Utc};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// One observed capability call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CloudConfigure {
        region: String,
    },
    IdentityConfigure {
        context_region: String,
        identity_pool_id: String,
        app_client_id: String,
    },
    Authenticate {
        identity_pool_id: String,
        app_client_id: String,
        username: String,
    },
    Token {
        session_id: String,
    },
    Refresh {
        session_id: String,
    },
    SignOut {
        session_id: String,
    },
    FetchNotifications {
        api: String,
    },
}

/// Ordered, shared record of capability calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    /// Snapshot of all calls so far.
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Index of the first call matching `pred`.
    pub fn position(&self, pred: impl Fn(&Call) -> bool) -> Option<usize> {
        self.0.borrow().iter().position(pred)
    }

    /// Last `Authenticate` call, if any.
    pub fn last_authenticate(&self) -> Option<Call> {
        self.0
            .borrow()
            .iter()
            .rev()
            .find(|c| matches!(c, Call::Authenticate { .. }))
            .cloned()
    }
}

/// Generic configurator double.
#[derive(Debug)]
pub struct RecordingCloud {
    log: CallLog,
    reject: Option<String>,
    region_override: Option<RegionId>,
}

impl RecordingCloud {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            reject: None,
            region_override: None,
        }
    }

    /// Refuse every configuration with `reason`.
    pub fn rejecting(mut self, reason: impl Into<String>) -> Self {
        self.reject = Some(reason.into());
        self
    }

    /// Report a context for `region` regardless of the record.
    pub fn with_region(mut self, region: RegionId) -> Self {
        self.region_override = Some(region);
        self
    }
}

impl CloudConfigurator for RecordingCloud {
    fn configure(&self, config: &DeploymentConfig) -> Result<CloudContext, CloudConfigurationError> {
        self.log.record(Call::CloudConfigure {
            region: config.region().to_string(),
        });
        if let Some(reason) = &self.reject {
            return Err(CloudConfigurationError::Rejected {
                reason: reason.clone(),
            });
        }

        let context = CloudContext::from_config(config);
        Ok(match &self.region_override {
            Some(region) => CloudContext::new(region.clone(), context.api().clone()),
            None => context,
        })
    }
}

/// Identity provider double.
///
/// Accepts any credentials unless a password is pinned with
/// [`RecordingIdentity::accepting_password`].
#[derive(Debug)]
pub struct RecordingIdentity {
    log: CallLog,
    reject_configuration: Option<String>,
    password: Option<String>,
    expired_tokens: Cell<u32>,
    refresh_fails: bool,
    issued: Cell<u32>,
}

impl RecordingIdentity {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            reject_configuration: None,
            password: None,
            expired_tokens: Cell::new(0),
            refresh_fails: false,
            issued: Cell::new(0),
        }
    }

    /// Refuse `configure` with `reason`.
    pub fn rejecting_configuration(mut self, reason: impl Into<String>) -> Self {
        self.reject_configuration = Some(reason.into());
        self
    }

    /// Only accept sign-ins using `password`.
    pub fn accepting_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Report the next `count` token requests as expired.
    pub fn expiring_next_tokens(self, count: u32) -> Self {
        self.expired_tokens.set(count);
        self
    }

    /// Make every refresh fail.
    pub fn failing_refresh(mut self) -> Self {
        self.refresh_fails = true;
        self
    }

    fn issue(&self, username: &str) -> SessionHandle {
        let n = self.issued.get() + 1;
        self.issued.set(n);
        SessionHandle::new(format!("session-{n}"), username)
    }
}

impl IdentityProvider for RecordingIdentity {
    fn configure(
        &self,
        context: &CloudContext,
        config: &DeploymentConfig,
    ) -> Result<(), AuthConfigurationError> {
        self.log.record(Call::IdentityConfigure {
            context_region: context.region().to_string(),
            identity_pool_id: config.identity_pool_id().to_string(),
            app_client_id: config.app_client_id().to_string(),
        });
        match &self.reject_configuration {
            Some(reason) => Err(AuthConfigurationError::Rejected {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    fn authenticate(
        &self,
        params: &AuthParameters,
        credentials: &Credentials,
    ) -> Result<SessionHandle, AuthenticationError> {
        self.log.record(Call::Authenticate {
            identity_pool_id: params.identity_pool_id.to_string(),
            app_client_id: params.app_client_id.to_string(),
            username: credentials.username.clone(),
        });
        if let Some(password) = &self.password {
            if password != &credentials.password {
                return Err(AuthenticationError::InvalidCredentials);
            }
        }
        Ok(self.issue(&credentials.username))
    }

    fn token(&self, handle: &SessionHandle) -> Result<AccessToken, TokenError> {
        self.log.record(Call::Token {
            session_id: handle.id().to_string(),
        });
        let remaining = self.expired_tokens.get();
        if remaining > 0 {
            self.expired_tokens.set(remaining - 1);
            return Err(TokenError::Expired);
        }
        Ok(AccessToken::new(
            format!("token-for-{}", handle.id()),
            Utc::now() + Duration::minutes(30),
        ))
    }

    fn refresh(&self, handle: &SessionHandle) -> Result<SessionHandle, AuthenticationError> {
        self.log.record(Call::Refresh {
            session_id: handle.id().to_string(),
        });
        if self.refresh_fails {
            return Err(AuthenticationError::SessionExpired);
        }
        Ok(self.issue(handle.username()))
    }

    fn sign_out(&self, handle: &SessionHandle) {
        self.log.record(Call::SignOut {
            session_id: handle.id().to_string(),
        });
    }
}

/// Notification API double returning a canned response.
#[derive(Debug)]
pub struct RecordingNotifications {
    log: CallLog,
    response: Result<Vec<Notification>, ApiError>,
}

impl RecordingNotifications {
    pub fn new(log: &CallLog, notifications: Vec<Notification>) -> Self {
        Self {
            log: log.clone(),
            response: Ok(notifications),
        }
    }

    /// Fail every fetch with `error`.
    pub fn failing(log: &CallLog, error: ApiError) -> Self {
        Self {
            log: log.clone(),
            response: Err(error),
        }
    }
}

impl NotificationApi for RecordingNotifications {
    fn fetch_notifications(
        &self,
        api: &ApiBinding,
        _token: &AccessToken,
    ) -> Result<Vec<Notification>, ApiError> {
        self.log.record(Call::FetchNotifications {
            api: api.name.to_string(),
        });
        self.response.clone()
    }
}

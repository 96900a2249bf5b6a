//! Tests for the session initializer and session lifecycle.

use super::*;
use crate::capability::recording::{Call, CallLog, RecordingCloud, RecordingIdentity};
use crate::model::{ConfigField, ConfigurationError, RegionId};

// ===== Test Helpers =====

fn valid_record() -> ConfigurationRecord {
    ConfigurationRecord {
        region: "us-east-1".to_string(),
        auth_region: "us-east-1".to_string(),
        identity_pool_id: "pool123".to_string(),
        app_client_id: "client456".to_string(),
        api_name: "MLNApp".to_string(),
        api_endpoint: "https://api.example.com".to_string(),
        api_region: "us-east-1".to_string(),
    }
}

fn initializer(log: &CallLog) -> SessionInitializer {
    SessionInitializer::new(
        Box::new(RecordingCloud::new(log)),
        Box::new(RecordingIdentity::new(log)),
    )
}

fn ready_session(log: &CallLog, identity: RecordingIdentity) -> Session {
    SessionInitializer::new(Box::new(RecordingCloud::new(log)), Box::new(identity))
        .initialize(&valid_record())
        .expect("valid record initializes")
}

// ===== initialize =====

#[test]
fn initialize_configures_cloud_then_identity() {
    let log = CallLog::new();
    let mut init = initializer(&log);

    init.initialize(&valid_record()).unwrap();

    assert_eq!(
        log.calls(),
        vec![
            Call::CloudConfigure {
                region: "us-east-1".to_string()
            },
            Call::IdentityConfigure {
                context_region: "us-east-1".to_string(),
                identity_pool_id: "pool123".to_string(),
                app_client_id: "client456".to_string(),
            },
        ]
    );
}

#[test]
fn placeholder_record_fails_before_any_capability_call() {
    let log = CallLog::new();
    let mut init = initializer(&log);

    let err = init.initialize(&ConfigurationRecord::default()).unwrap_err();

    assert!(
        matches!(
            err,
            BootstrapError::Configuration(ConfigurationError::Placeholder {
                field: ConfigField::Region,
                ..
            })
        ),
        "got {err:?}"
    );
    assert!(log.is_empty(), "no capability may be configured: {:?}", log.calls());
    assert!(!init.is_initialized());
}

#[test]
fn configuration_error_leaves_initializer_usable() {
    let log = CallLog::new();
    let mut init = initializer(&log);

    let mut broken = valid_record();
    broken.api_endpoint = "<API_GATEWAY_URL>".to_string();
    assert!(init.initialize(&broken).is_err());

    init.initialize(&valid_record())
        .expect("a corrected record can still initialize");
    assert_eq!(log.len(), 2);
}

#[test]
fn second_initialize_is_rejected_without_touching_capabilities() {
    let log = CallLog::new();
    let mut init = initializer(&log);

    init.initialize(&valid_record()).unwrap();
    let calls_after_first = log.calls();

    let second = init.initialize(&valid_record());

    assert_eq!(second.unwrap_err(), BootstrapError::AlreadyInitialized);
    assert_eq!(log.calls(), calls_after_first, "no re-registration allowed");
    assert!(init.is_initialized());
}

#[test]
fn cloud_rejection_stops_before_identity() {
    let log = CallLog::new();
    let mut init = SessionInitializer::new(
        Box::new(RecordingCloud::new(&log).rejecting("account suspended")),
        Box::new(RecordingIdentity::new(&log)),
    );

    let err = init.initialize(&valid_record()).unwrap_err();

    assert!(matches!(err, BootstrapError::CloudConfiguration(_)));
    assert_eq!(
        log.position(|c| matches!(c, Call::IdentityConfigure { .. })),
        None
    );
}

#[test]
fn identity_rejection_is_auth_configuration_error() {
    let log = CallLog::new();
    let mut init = SessionInitializer::new(
        Box::new(RecordingCloud::new(&log)),
        Box::new(RecordingIdentity::new(&log).rejecting_configuration("unknown app client")),
    );

    let err = init.initialize(&valid_record()).unwrap_err();

    assert_eq!(
        err,
        BootstrapError::AuthConfiguration(crate::model::AuthConfigurationError::Rejected {
            reason: "unknown app client".to_string()
        })
    );
    assert!(init.is_initialized(), "capabilities were consumed");
}

#[test]
fn context_for_wrong_region_is_caught_between_steps() {
    let log = CallLog::new();
    let mut init = SessionInitializer::new(
        Box::new(RecordingCloud::new(&log).with_region(RegionId::new("eu-west-1").unwrap())),
        Box::new(RecordingIdentity::new(&log)),
    );

    let err = init.initialize(&valid_record()).unwrap_err();

    assert_eq!(
        err,
        BootstrapError::ContextMismatch {
            expected: "us-east-1".to_string(),
            actual: "eu-west-1".to_string(),
        }
    );
    assert_eq!(log.len(), 1, "identity must not be configured");
}

#[test]
fn session_context_exposes_configured_api() {
    let log = CallLog::new();
    let session = ready_session(&log, RecordingIdentity::new(&log));

    let api = session.context().api();
    assert_eq!(api.name.as_str(), "MLNApp");
    assert_eq!(api.endpoint.as_url().host_str(), Some("api.example.com"));
    assert!(!session.is_active());
}

// ===== Session =====

#[test]
fn authenticate_passes_configured_pool_and_client() {
    let log = CallLog::new();
    let mut session = ready_session(&log, RecordingIdentity::new(&log));

    session
        .authenticate(&Credentials::new("ada", "pw"))
        .unwrap();

    assert_eq!(
        log.last_authenticate(),
        Some(Call::Authenticate {
            identity_pool_id: "pool123".to_string(),
            app_client_id: "client456".to_string(),
            username: "ada".to_string(),
        })
    );
    assert!(session.is_active());
    assert_eq!(session.username(), Some("ada"));
}

#[test]
fn failed_authenticate_keeps_session_inactive() {
    let log = CallLog::new();
    let mut session = ready_session(&log, RecordingIdentity::new(&log).accepting_password("right"));

    let err = session
        .authenticate(&Credentials::new("ada", "wrong"))
        .unwrap_err();

    assert_eq!(err, AuthenticationError::InvalidCredentials);
    assert!(!session.is_active());
}

#[test]
fn reauthenticate_signs_out_previous_session() {
    let log = CallLog::new();
    let mut session = ready_session(&log, RecordingIdentity::new(&log));

    session.authenticate(&Credentials::new("ada", "pw")).unwrap();
    session.authenticate(&Credentials::new("bob", "pw")).unwrap();

    assert!(log.calls().contains(&Call::SignOut {
        session_id: "session-1".to_string()
    }));
    assert_eq!(session.username(), Some("bob"));
}

#[test]
fn access_token_without_session_is_no_active_session() {
    let log = CallLog::new();
    let mut session = ready_session(&log, RecordingIdentity::new(&log));

    assert_eq!(
        session.access_token().unwrap_err(),
        AuthenticationError::NoActiveSession
    );
}

#[test]
fn expired_token_is_refreshed_once() {
    let log = CallLog::new();
    let mut session = ready_session(&log, RecordingIdentity::new(&log).expiring_next_tokens(1));
    session.authenticate(&Credentials::new("ada", "pw")).unwrap();

    let token = session.access_token().unwrap();

    assert_eq!(token.value(), "token-for-session-2");
    assert!(log.calls().contains(&Call::Refresh {
        session_id: "session-1".to_string()
    }));
    assert!(session.is_active());
}

#[test]
fn failed_refresh_drops_session() {
    let log = CallLog::new();
    let mut session = ready_session(
        &log,
        RecordingIdentity::new(&log)
            .expiring_next_tokens(1)
            .failing_refresh(),
    );
    session.authenticate(&Credentials::new("ada", "pw")).unwrap();

    assert_eq!(
        session.access_token().unwrap_err(),
        AuthenticationError::SessionExpired
    );
    assert!(!session.is_active());
}

#[test]
fn sign_out_forgets_handle() {
    let log = CallLog::new();
    let mut session = ready_session(&log, RecordingIdentity::new(&log));
    session.authenticate(&Credentials::new("ada", "pw")).unwrap();

    session.sign_out();
    session.sign_out();

    assert!(!session.is_active());
    let sign_outs = log
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::SignOut { .. }))
        .count();
    assert_eq!(sign_outs, 1, "second sign_out is a no-op");
}

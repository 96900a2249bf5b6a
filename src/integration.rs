//! Bootstrap composition.
//!
//! Runs the startup sequence serially:
//! configuration → generic configure → auth configure → mount.
//! No step begins before its predecessor has completed.

use crate::capability::{
    CloudConfigurator, FileNotifications, IdentityProvider, LocalCloud, LocalIdentityProvider,
    NotificationApi,
};
use crate::config::{ConfigurationRecord, LocalSettings};
use crate::model::BootstrapError;
use crate::router::RouteTable;
use crate::session::SessionInitializer;
use crate::shell::{ActiveApplication, ApplicationShell};
use tracing::info;

/// The external capabilities the application is wired to.
pub struct Capabilities {
    pub cloud: Box<dyn CloudConfigurator>,
    pub identity: Box<dyn IdentityProvider>,
    pub notifications: Box<dyn NotificationApi>,
}

/// Build the in-process capability set from `[local]` settings.
pub fn local_capabilities(settings: &LocalSettings) -> Capabilities {
    Capabilities {
        cloud: Box::new(LocalCloud),
        identity: Box::new(LocalIdentityProvider::new(
            settings.users.clone(),
            settings.token_ttl_secs,
        )),
        notifications: Box::new(FileNotifications::new(settings.notifications_file.clone())),
    }
}

/// Initialize the session and mount the shell at `path`.
///
/// # Errors
///
/// Returns [`BootstrapError`] when the record is invalid or a capability rejects it.
/// Nothing is mounted in that case.
pub fn bootstrap(
    record: &ConfigurationRecord,
    capabilities: Capabilities,
    routes: RouteTable,
    path: &str,
) -> Result<ActiveApplication, BootstrapError> {
    let Capabilities {
        cloud,
        identity,
        notifications,
    } = capabilities;

    let session = SessionInitializer::new(cloud, identity).initialize(record)?;
    info!("Session ready, mounting shell");

    Ok(ApplicationShell::new(routes).mount(session, notifications, path))
}

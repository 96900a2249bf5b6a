//! Notification App
//!
//! Bootstrap for a notification client: a validated deployment configuration,
//! a session initializer that configures the cloud context and identity provider
//! in order, a route table, and a terminal application shell.
//!
//! Pure core (`model`, `config::record`, `router`, `state`) and impure shell
//! (`session`, `shell`, `view`, `logging`) are kept apart; external services are
//! reached only through the traits in `capability`.

pub mod capability;
pub mod config;
pub mod logging;
pub mod model;
pub mod router;
pub mod session;
pub mod shell;
pub mod state;
pub mod view;

// Bootstrap composition
pub mod integration;

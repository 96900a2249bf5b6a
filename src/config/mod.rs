//! Configuration module.
//!
//! - [`record`]: the deployment Configuration Record and its validation
//! - [`loader`]: config file discovery and the Defaults → File → Env → CLI chain
//! - [`keybindings`]: key to action mapping for the terminal shell

pub mod keybindings;
pub mod loader;
pub mod record;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    LocalSettings, LocalUser, ResolvedConfig,
};
pub use record::{AuthParameters, ConfigurationRecord, DeploymentConfig};

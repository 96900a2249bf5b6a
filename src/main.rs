//! Notification App - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

/// Notification App - terminal client for the notification service
#[derive(Parser, Debug)]
#[command(name = "notification-app")]
#[command(version)]
#[command(about = "Terminal client that signs in and lists your notifications")]
pub struct Args {
    /// Path to configuration file (TOML, or an aws-exports `.json` document)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Route to open at startup [default: /]
    #[arg(long)]
    pub path: Option<String>,

    /// Validate the configuration, print every issue, then exit
    #[arg(long)]
    pub check: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file =
            notification_app::config::load_config_with_precedence(args.config.clone())?;
        let merged = notification_app::config::merge_config(config_file);
        let with_env = notification_app::config::apply_env_overrides(merged);
        notification_app::config::apply_cli_overrides(with_env, args.path.clone())
    };

    if args.check {
        let issues = config.deployment.issues();
        if issues.is_empty() {
            println!("configuration OK");
            return Ok(());
        }
        for issue in &issues {
            eprintln!("{issue}");
        }
        std::process::exit(1);
    }

    notification_app::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let capabilities = notification_app::integration::local_capabilities(&config.local);
    let app = match notification_app::integration::bootstrap(
        &config.deployment,
        capabilities,
        notification_app::router::RouteTable::default(),
        &config.initial_path,
    ) {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "Startup failed");
            eprintln!("notification-app: startup failed: {e}");
            std::process::exit(1);
        }
    };

    let colors = notification_app::view::ColorConfig::from_env_and_args(args.no_color);
    notification_app::view::run_application(app, colors)?;

    Ok(())
}

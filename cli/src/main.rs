//! Mottu API server
//!
//! ```sh
//! # Run with default config (~/.config/mottu-api/config.toml)
//! mottu-api
//!
//! # Custom config path and port
//! mottu-api --config /etc/mottu-api/config.toml --api-port 8080
//!
//! # Validate config without starting
//! mottu-api --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use mottu_api::config::AppConfig;
use mottu_api::server::{init_tracing, ServerHandle, ServerOptions};

#[derive(Parser, Debug)]
#[command(
    name = "mottu-api",
    version,
    about = "REST API for motorcycle fleet and maintenance management",
    long_about = "Mottu API: motos, maintenance records and JWT users over REST, \
                  with Swagger UI at /docs.\n\n\
                  Default config: ~/.config/mottu-api/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "MOTTU_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip seeding demo data into empty tables.
    #[arg(long)]
    no_seed: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(port) = self.api_port {
            config.server.api_port = port;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(mottu_api::default_config_path);

    let config = match AppConfig::load(&config_path) {
        Ok(mut cfg) => {
            cli.apply_overrides(&mut cfg);
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) if cli.check => {
            eprintln!("Configuration is invalid: {}", e);
            return Err(e.into());
        }
        Err(e) => {
            let mut cfg = AppConfig::default();
            cli.apply_overrides(&mut cfg);
            init_tracing(&cfg);
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            cfg
        }
    };

    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.api_address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!("   Protected   : {}", config.security.protect_resources);
        return Ok(());
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        seed: !cli.no_seed,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}

//! Toll Fee Service — CLI Server
//!
//! Headless congestion tax service suitable for deployment as a systemd
//! service, Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/toll-fee/config.toml)
//! toll-fee-service
//!
//! # Custom config path
//! toll-fee-service --config /etc/toll-fee/config.toml
//!
//! # Override the listen port
//! toll-fee-service --port 9090
//!
//! # Validate config without starting
//! toll-fee-service --check
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use toll_fee::config::AppConfig;
use toll_fee::server::{init_tracing, ServerHandle, ServerOptions};

/// Toll Fee Service — congestion tax calculation over HTTP.
#[derive(Parser, Debug)]
#[command(
    name = "toll-fee-service",
    version,
    about = "Congestion tax calculation for vehicles passing toll stations",
    long_about = "Toll Fee Service — REST API that records toll station passages \
                  and returns each vehicle's daily fee.\n\n\
                  Default config: ~/.config/toll-fee/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "TOLL_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen host.
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(toll_fee::default_config_path);

    let mut config = if config_path.exists() {
        match AppConfig::load(&config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                // Only a missing file falls back to defaults
                eprintln!("Invalid configuration {}: {}", config_path.display(), e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        AppConfig::default()
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Fares       : {} breakpoints", config.toll.fares.len());
        println!("   Daily cap   : {}", config.toll.max_daily_fare);
        println!("   Exempt days : {}", config.toll.exempt_dates.len());
        println!("   Log level   : {}", config.logging.level);
        return ExitCode::SUCCESS;
    }

    init_tracing(&config);
    if config_path.exists() {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        info!(
            "No configuration at {}, using defaults",
            config_path.display()
        );
    }

    // ── Start server ───────────────────────────────────────────
    let handle = match ServerHandle::start(ServerOptions { config }).await {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    // Wait for shutdown signal, then clean up
    handle.shutdown_signal().wait().await;
    handle.wait().await;

    ExitCode::SUCCESS
}

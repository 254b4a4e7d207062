//! Main entry point for the Rank Tracker
//!
//! Loads configuration and history, then runs the interactive session on a
//! blocking thread while the main task waits for Ctrl+C so the history can be
//! saved before exiting.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use rank_tracker::cli::{save_shared, Console, Session};
use rank_tracker::config::AppConfig;
use rank_tracker::display::Theme;
use rank_tracker::storage::{load_or_empty, JsonFileStorage, MatchStorage};
use rank_tracker::{RankLadder, VERSION};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::signal;
use tracing::{error, info};

/// Rank Tracker - record ranked games and follow your ladder progress
#[derive(Parser)]
#[command(
    name = "rank-tracker",
    version,
    about = "Track ranked games, promotions and statistics from the terminal",
    long_about = "Rank Tracker records each ranked game with its LP change, grade and KDA, \
                 offers promotions and demotions when a division boundary is crossed, \
                 and renders the history and detailed statistics in the terminal."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Data file override
    #[arg(long, value_name = "FILE", help = "Override the JSON history file")]
    data_file: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Disable colors
    #[arg(long, help = "Disable ANSI colors in the output")]
    no_color: bool,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Log the effective settings
fn display_startup_banner(config: &AppConfig) {
    info!("🎮 {} v{}", config.service.name, VERSION);
    info!("   Log level: {}", config.service.log_level);
    info!("   Data file: {}", config.storage.data_file.display());
    info!("   Colors: {}", config.display.color);
    info!("   History limit: {}", config.display.history_limit);
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    // Start with environment-based config
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(data_file) = &args.data_file {
        config.storage.data_file = data_file.clone();
    }

    if args.no_color {
        config.display.color = false;
    }

    rank_tracker::config::validate_config(&config)?;
    Ok(config)
}

/// Wait for Ctrl+C, or SIGTERM on unix
async fn wait_for_shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to listen for Ctrl+C") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<(), anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        result = ctrl_c => {
            result?;
            info!("Received SIGINT (Ctrl+C) signal");
        }
        result = terminate => {
            result?;
            info!("Received SIGTERM signal");
        }
    }

    Ok(())
}

async fn run(config: AppConfig) -> Result<()> {
    let ladder = RankLadder::from_config(&config.ladder)?;
    let theme = Theme::new(config.display.color);
    let storage: Arc<dyn MatchStorage> =
        Arc::new(JsonFileStorage::new(config.storage.data_file.clone()));
    let log = Arc::new(Mutex::new(load_or_empty(&*storage)));

    display_startup_banner(&config);

    let session_task = {
        let log = Arc::clone(&log);
        let storage = Arc::clone(&storage);
        let settings = config.display.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let console = Console::new(io::stdin().lock(), io::stdout());
            let mut session = Session::new(console, log, storage, ladder, theme, settings);
            session.greet()?;
            session.run()
        })
    };

    tokio::select! {
        result = session_task => {
            result.map_err(|e| anyhow!("Session task failed: {}", e))??;
            info!("Session ended");
        }
        signal = wait_for_shutdown_signal() => {
            signal?;
            println!("\n\n💾 Saving before exit...");
            match save_shared(&*storage, &log) {
                Ok(_) => println!("👋 Goodbye!"),
                Err(e) => {
                    error!("Save on interrupt failed: {:#}", e);
                    eprintln!("❌ Could not save: {:#}", e);
                }
            }
            // The session thread is still blocked on stdin
            std::process::exit(0);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        error!("Unexpected error: {:#}", e);
        eprintln!("💥 Unexpected error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

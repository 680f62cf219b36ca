//! tfdkron - declarative Dkron jobs
//!
//! Main entry point for the tfdkron CLI.

mod cli;
mod commands;
mod state_file;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use tfdkron_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};
use tfdkron_core::ProviderHost;
use tfdkron_resource_job::JobResourceExtension;

use cli::{Cli, Commands};

/// Get the .tfdkron directory path.
fn tfdkron_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".tfdkron"))
        .unwrap_or_else(|| PathBuf::from(".tfdkron"))
}

/// Initialize tracing with stderr output and, when enabled, daily log files.
///
/// Stdout is reserved for command output such as `schema`.
fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let file = if logging.file {
        let log_dir = match &logging.dir {
            Some(dir) => PathBuf::from(ConfigLoader::expand_path(dir)),
            None => tfdkron_dir().join("logs"),
        };
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("tfdkron")
            .filename_suffix("log")
            .max_log_files(30)
            .build(&log_dir)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // The guard flushes the file writer on drop; keep it for the whole run.
        static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
            std::sync::OnceLock::new();
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false).boxed())
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .init();
    Ok(())
}

fn load_config(path: &std::path::Path) -> Result<Config> {
    let mut config = ConfigLoader::load_or_default(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    ConfigLoader::apply_env(&mut config);
    Ok(config)
}

/// Cancel in-flight requests on Ctrl-C.
fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling request");
            token.cancel();
        }
    });
    cancel
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_tracing(&config.logging)?;

    let validation = ConfigValidator::validate(&config);
    for warning in &validation.warnings {
        warn!("{}: {}", warning.path, warning.message);
    }
    if !validation.is_valid() {
        for error in &validation.errors {
            eprintln!("Error: {}: {}", error.path, error.message);
        }
        anyhow::bail!("Invalid configuration in {}", cli.config.display());
    }
    debug!("Using Dkron at {}", config.provider.host);

    let host = ProviderHost::from_config(&config.provider)?;
    let mut extension = JobResourceExtension::new();
    host.load_extension(&mut extension).await?;

    let cancel = cancel_on_ctrl_c();
    match cli.command {
        Commands::Schema => commands::schema(&host),
        Commands::Validate { file, type_name } => commands::validate(&host, &file, &type_name),
        Commands::Apply { file, state, type_name } => {
            commands::apply(&host, &file, &state, &type_name, &cancel).await
        }
        Commands::Refresh { state } => commands::refresh(&host, &state, &cancel).await,
        Commands::Import { id, state, type_name } => {
            commands::import(&host, &id, &state, &type_name, &cancel).await
        }
        Commands::Destroy { state } => commands::destroy(&host, &state, &cancel).await,
    }
}

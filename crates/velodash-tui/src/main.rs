//! `velodash` -- terminal dashboard for the Velocité bicycle rental
//! service.
//!
//! Built on [ratatui](https://ratatui.rs) over the service's public API.
//! The pricing screen tracks the service's hourly tariff changes: a
//! background feed re-fetches the snapshot at every wall-clock hour
//! boundary and publishes presentation-ready views into the action loop.
//!
//! Logs are written to a file (default `/tmp/velodash.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and
//! app launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use velodash_api::{RentalClient, TransportConfig};
use velodash_core::ServiceConfig;
use velodash_core::i18n::{Language, Translator};
use velodash_core::pricing::PricingFeed;

use crate::app::App;
use crate::data_bridge::spawn_data_bridge;

/// Terminal dashboard for the Velocité bicycle rental service.
#[derive(Parser, Debug)]
#[command(name = "velodash", version, about)]
struct Cli {
    /// Service base URL (e.g., https://velocite.example.com)
    #[arg(short = 'u', long, env = "VELO_URL")]
    url: Option<String>,

    /// Config profile name (defaults to the profile file's default)
    #[arg(short = 'p', long)]
    profile: Option<String>,

    /// Interface language ("fr" or "en"); overrides the profile
    #[arg(short = 'l', long, env = "VELO_LANG")]
    language: Option<String>,

    /// Log file path (defaults to /tmp/velodash.log)
    #[arg(long, default_value = "/tmp/velodash.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr -- that
/// would corrupt the TUI output. Returns a guard that must be held for
/// the lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "velodash={log_level},velodash_core={log_level},velodash_api={log_level}"
        ))
    });

    let log_dir = cli.log_file.parent().unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("velodash.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Resolve the service config: CLI flags win, then the profile file.
fn resolve_service_config(cli: &Cli) -> Result<ServiceConfig> {
    if let Some(ref url_str) = cli.url {
        let url = url_str
            .parse()
            .map_err(|e| eyre!("invalid service URL '{url_str}': {e}"))?;
        let mut config = ServiceConfig::new(url);
        if let Some(ref lang) = cli.language {
            config.language.clone_from(lang);
        }
        return Ok(config);
    }

    let file = velodash_config::load_config_or_default();
    let mut config = match cli.profile.as_deref() {
        Some(name) => velodash_config::profile_to_service_config(&file, name)?,
        None => velodash_config::default_service_config(&file).ok_or_else(|| {
            eyre!(
                "no service configured -- pass --url or add a profile to {}",
                velodash_config::config_path().display()
            )
        })?,
    };
    if let Some(ref lang) = cli.language {
        config.language.clone_from(lang);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file -- hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let config = resolve_service_config(&cli)?;
    info!(url = %config.url, language = %config.language, "starting velodash");

    let transport = TransportConfig {
        timeout: config.timeout,
        language: Some(config.language.clone()),
    };
    let client = Arc::new(RentalClient::new(config.url.as_str(), &transport)?);
    let feed = PricingFeed::new(Arc::clone(&client));

    let translator = Translator::new(Language::from_tag(&config.language));

    // Wire the app loop to the data bridge
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let mut app = App::new(translator, cmd_tx);
    let cancel = CancellationToken::new();
    let bridge = tokio::spawn(spawn_data_bridge(
        client,
        feed,
        app.action_sender(),
        cmd_rx,
        cancel.clone(),
    ));

    let result = app.run().await;

    // Stop the bridge (which stops the pricing feed) before exiting
    cancel.cancel();
    let _ = bridge.await;

    result
}

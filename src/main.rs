//! Glucoscope: Terminal diabetes risk screening
//!
//! Main entry point for the terminal application.

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use glucoscope::application::AppContext;
use glucoscope::tui::App;
use glucoscope::AppConfig;

fn main() -> Result<ExitCode> {
    let config = AppConfig::from_env()?;

    // Logs written to the terminal would corrupt the TUI (alternate screen):
    // interactive sessions log to a file, non-interactive ones to stdout.
    let interactive = std::io::stdout().is_terminal();
    let (writer, _guard) = if config.log_mode.use_file(interactive) {
        if let Some(parent) = config.log_file.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    tracing::info!("Starting Glucoscope (schema {})...", config.schema.id());

    // Refuse to start without a usable model and dataset.
    let context = match AppContext::load(config) {
        Ok(context) => context,
        Err(e) => {
            tracing::error!("Startup failed: {}", e);
            eprintln!("glucoscope: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut app = App::new(context)?;
    app.run()?;

    tracing::info!("Glucoscope shutdown complete.");
    Ok(ExitCode::SUCCESS)
}

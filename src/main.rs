mod commands;
mod config;
mod host_ui;
mod limits;
mod logging;
mod paths;
mod usage_reset;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::LimitsConfig;
use host_ui::{HostUi, NotifyLevel, TerminalUi};
use limits::credentials::FileCredentialSource;
use limits::http::UreqTransport;
use limits::reporter::{ReportOutcome, UsageReporter};
use std::path::PathBuf;
use std::sync::Arc;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("PI_LIMITS_GIT_SHA"),
    ")"
);

#[derive(Parser)]
#[command(name = "pi-limits")]
#[command(about = "Show AI subscription limits and usage")]
#[command(version, long_version = LONG_VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Credentials file (defaults to ~/.pi/agent/auth.json)
    #[arg(long, global = true)]
    auth_file: Option<PathBuf>,

    /// Leave the widget on screen and exit without waiting for it to clear
    #[arg(long, global = true)]
    keep: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    #[command(name = commands::LIMITS.name, about = commands::LIMITS.description)]
    Limits,
    #[command(name = commands::USAGE.name, about = commands::USAGE.description)]
    Usage,
}

impl Cli {
    fn command_name(&self) -> &'static str {
        match self.command.unwrap_or(Command::Limits) {
            Command::Limits => commands::LIMITS.name,
            Command::Usage => commands::USAGE.name,
        }
    }

    fn build_config(&self) -> Result<LimitsConfig> {
        let mut config = LimitsConfig::from_env()?;
        if let Some(path) = &self.auth_file {
            config.auth_path = path.clone();
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let ui = Arc::new(TerminalUi::new());

    match logging::init() {
        Ok(Some(path)) => ui.notify(
            &format!("Debug log: {}", path.display()),
            NotifyLevel::Info,
        ),
        Ok(None) => {}
        Err(e) => ui.notify(
            &format!("Debug logging disabled: {:#}", e),
            NotifyLevel::Warning,
        ),
    }

    let config = cli.build_config()?;
    tracing::debug!("Configuration: {:?}", config);

    let wait_for_clear = !cli.keep && ui.can_erase_widgets();

    let credentials = FileCredentialSource::new(config.auth_path.clone());
    tracing::debug!("Reading credentials from {}", credentials.path().display());

    let reporter = UsageReporter::new(
        ui,
        Arc::new(credentials),
        Arc::new(UreqTransport::new(config.http_timeout)),
        config,
    );

    let outcome = commands::dispatch(cli.command_name(), &reporter).await;
    if let Some(ReportOutcome::Displayed { lines, clear }) = outcome {
        tracing::debug!("Displayed {} lines", lines.len());
        if wait_for_clear {
            if let Err(e) = clear.await {
                tracing::warn!("Widget clear task failed: {}", e);
            }
        }
    }

    Ok(())
}

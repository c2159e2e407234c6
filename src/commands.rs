//! Commands registered with the host.
//!
//! `/limits` and `/usage` are interchangeable; both run the usage reporter.

use crate::limits::reporter::{ReportOutcome, UsageReporter};

/// Canonical definition of a host command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    /// Command name without the leading `/`
    pub name: &'static str,
    pub description: &'static str,
}

pub const LIMITS: CommandInfo = CommandInfo {
    name: "limits",
    description: "Show AI subscription limits and usage",
};

pub const USAGE: CommandInfo = CommandInfo {
    name: "usage",
    description: "Show AI subscription limits and usage (alias for /limits)",
};

pub const COMMANDS: &[CommandInfo] = &[LIMITS, USAGE];

/// Looks up a command by name, with or without the leading `/`.
pub fn find_command(input: &str) -> Option<&'static CommandInfo> {
    let name = input.trim();
    let name = name.strip_prefix('/').unwrap_or(name);
    COMMANDS.iter().find(|info| info.name == name)
}

/// Runs the command named by `input`. Returns None for unknown commands.
pub async fn dispatch(input: &str, reporter: &UsageReporter) -> Option<ReportOutcome> {
    let command = find_command(input)?;
    tracing::debug!("Running /{}: {}", command.name, command.description);
    Some(reporter.run().await)
}

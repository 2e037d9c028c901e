//! Core library for the `taskpulse` CLI.
//!
//! Fetches task snapshots from a tracker API, diffs day-over-day
//! snapshots into markdown reports, and summarizes a week of reports
//! into a prose digest via an LLM call.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod digest;
pub mod ports;
pub mod report;
pub mod snapshot;
pub mod store;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command
/// execution fails.
pub async fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    let ctx = context::ServiceContext::live();
    commands::dispatch(&ctx, &cli).await
}

#[cfg(test)]
mod tests {
    use super::run;

    #[tokio::test]
    async fn run_errors_on_unknown_subcommand() {
        let result = run(["taskpulse", "unknown"]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn run_errors_without_subcommand() {
        let result = run(["taskpulse"]).await;
        assert!(result.is_err());
    }
}

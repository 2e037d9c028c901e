//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Top-level CLI parser for `taskpulse`.
#[derive(Debug, Parser)]
#[command(name = "taskpulse", version, about = "Track task activity and digest reports")]
pub struct Cli {
    /// Project root holding data/, reports/, weekly/, and taskpulse.yaml.
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch today's tasks from the tracker and save a snapshot.
    Fetch,
    /// Diff two daily snapshots into a markdown report.
    Compare {
        /// Report date (YYYY-MM-DD), compared against the day before.
        /// Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Summarize last week's daily reports into a digest.
    Weekly,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_fetch_subcommand() {
        let cli = Cli::parse_from(["taskpulse", "fetch"]);
        assert!(matches!(cli.command, Command::Fetch));
        assert_eq!(cli.root, std::path::Path::new("."));
    }

    #[test]
    fn parses_compare_with_date() {
        let cli = Cli::parse_from(["taskpulse", "compare", "--date", "2025-11-01"]);
        match cli.command {
            Command::Compare { date } => {
                assert_eq!(date, Some("2025-11-01".parse().unwrap()));
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn compare_date_defaults_to_none() {
        let cli = Cli::parse_from(["taskpulse", "compare"]);
        assert!(matches!(cli.command, Command::Compare { date: None }));
    }

    #[test]
    fn root_is_global() {
        let cli = Cli::parse_from(["taskpulse", "weekly", "--root", "/club"]);
        assert!(matches!(cli.command, Command::Weekly));
        assert_eq!(cli.root, std::path::Path::new("/club"));
    }

    #[test]
    fn rejects_malformed_date() {
        let result = Cli::try_parse_from(["taskpulse", "compare", "--date", "yesterday"]);
        assert!(result.is_err());
    }
}

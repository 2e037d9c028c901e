//! Command dispatch and handlers.

pub mod compare;
pub mod fetch;
pub mod weekly;

use crate::cli::{Cli, Command};
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub async fn dispatch(ctx: &ServiceContext, cli: &Cli) -> Result<(), String> {
    match &cli.command {
        Command::Fetch => fetch::run(ctx, &cli.root).await,
        Command::Compare { date } => compare::run(ctx, &cli.root, *date),
        Command::Weekly => weekly::run(ctx, &cli.root).await,
    }
}

/// Timestamped progress line on stderr, keeping stdout for results.
pub(crate) fn log(ctx: &ServiceContext, msg: &str) {
    eprintln!("[{}] {msg}", ctx.clock.now().format("%Y-%m-%d %H:%M:%S"));
}

//! `taskpulse weekly` command.

use std::path::Path;

use crate::commands::log;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::digest;

/// Execute the `weekly` command.
///
/// Summarizes last week's daily reports into a digest under
/// `<root>/weekly/`, or writes a placeholder when the week has none.
///
/// # Errors
///
/// Returns an error string if digest generation fails.
pub async fn run(ctx: &ServiceContext, root: &Path) -> Result<(), String> {
    let config = Config::load(ctx, root)?;
    log(ctx, "Generating weekly digest");
    let path = digest::generate(ctx, &config, root).await?;
    println!("Weekly digest saved to {}", path.display());
    Ok(())
}

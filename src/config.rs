//! Project configuration loaded from `taskpulse.yaml`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::context::ServiceContext;
use crate::snapshot::diff::DEFAULT_TERMINAL_STATUSES;

/// Config file name looked up under the project root.
pub const CONFIG_FILE: &str = "taskpulse.yaml";

/// Project configuration.
///
/// Every field has a default, so a missing config file is valid. Secrets
/// (`CLICKUP_TOKEN`, `OPENAI_API_KEY`) never live here; the live adapters
/// read them from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracker space whose tasks are snapshotted. Required for `fetch`.
    pub space_id: String,
    /// Status labels treated as finished for completion detection.
    pub terminal_statuses: Vec<String>,
    /// Model used for the weekly digest.
    pub model: String,
    /// Token budget for the weekly digest completion.
    pub max_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            space_id: String::new(),
            terminal_statuses: DEFAULT_TERMINAL_STATUSES.iter().map(ToString::to_string).collect(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 1500,
        }
    }
}

impl Config {
    /// Loads the config from `<root>/taskpulse.yaml`, or defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error string if the file exists but cannot be read or
    /// parsed.
    pub fn load(ctx: &ServiceContext, root: &Path) -> Result<Self, String> {
        let path = root.join(CONFIG_FILE);
        if !ctx.fs.exists(&path) {
            return Ok(Self::default());
        }
        let contents = ctx
            .fs
            .read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse {}: {e}", path.display()))
    }

    /// Terminal statuses as a borrowed slice-friendly view for the differ.
    #[must_use]
    pub fn terminal_statuses(&self) -> Vec<&str> {
        self.terminal_statuses.iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_fixed_terminal_set() {
        let config = Config::default();
        assert_eq!(config.terminal_statuses(), vec!["complete", "closed", "done"]);
        assert!(config.space_id.is_empty());
        assert_eq!(config.model, "gpt-4o-mini");
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let config: Config = serde_yaml::from_str("space_id: \"123\"\n").unwrap();
        assert_eq!(config.space_id, "123");
        assert_eq!(config.terminal_statuses, vec!["complete", "closed", "done"]);
        assert_eq!(config.max_tokens, 1500);
    }

    #[test]
    fn custom_terminal_statuses_round_trip() {
        let yaml = "terminal_statuses:\n  - archived\n  - shipped\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.terminal_statuses(), vec!["archived", "shipped"]);
    }
}

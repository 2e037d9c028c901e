//! Service context bundling all port trait objects.

use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::llm::LlmClient;
use crate::ports::tasks::TaskSource;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Production code
/// uses [`ServiceContext::live`]; tests build the struct directly with
/// in-memory fakes.
pub struct ServiceContext {
    /// Clock for obtaining the current time.
    pub clock: Box<dyn Clock>,
    /// Filesystem for file I/O.
    pub fs: Box<dyn FileSystem>,
    /// Task source for fetching snapshots from the tracker API.
    pub tasks: Box<dyn TaskSource>,
    /// LLM client for digest generation.
    pub llm: Box<dyn LlmClient>,
}

impl ServiceContext {
    /// Creates a live context wired to the real adapters.
    #[must_use]
    pub fn live() -> Self {
        use crate::adapters::live::{LiveClock, LiveFileSystem, LiveLlmClient, LiveTaskSource};

        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            tasks: Box::new(LiveTaskSource::new()),
            llm: Box::new(LiveLlmClient::new()),
        }
    }
}

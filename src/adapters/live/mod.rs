//! Live adapters for real external interactions.

pub mod clock;
pub mod filesystem;
pub mod llm;
pub mod tasks;

pub use clock::LiveClock;
pub use filesystem::LiveFileSystem;
pub use llm::LiveLlmClient;
pub use tasks::LiveTaskSource;

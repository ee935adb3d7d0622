pub mod client;
pub mod config;
pub mod error;
pub mod sinks;
pub mod watcher;

// Re-export the entry points most callers want.
pub use error::WatchError;
pub use watcher::Watcher;

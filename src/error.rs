use crate::client::ClientError;
use crate::config::ConfigError;

/// Watcher-level failures that reach the process boundary.
///
/// Everything else (a single failed fetch inside a cycle, a sink that
/// refused a message) is absorbed with a log line and the loop keeps going.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("login failed: {0}")]
    Login(#[source] ClientError),

    #[error("initial fetch for '{handle}' failed: {source}")]
    Seed {
        handle: String,
        #[source]
        source: ClientError,
    },

    /// The governor saw too many consecutive failing cycles.
    /// Carries the last fetch error so the operator sees what went wrong.
    #[error("giving up after {failures} consecutive failed cycles: {source}")]
    Exhausted {
        failures: u32,
        #[source]
        source: ClientError,
    },
}

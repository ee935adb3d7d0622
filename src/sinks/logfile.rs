use async_trait::async_trait;

use super::{Sink, SinkError};

/// Writes notifications through the log layer. Where they end up (stdout
/// or a file) is decided by the subscriber installed at startup.
#[derive(Debug, Default)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Sink for LogSink {
    fn name(&self) -> &'static str {
        "logfile"
    }

    async fn deliver(&self, message: &str) -> Result<(), SinkError> {
        tracing::info!(target: "vigil::notify", "{message}");
        Ok(())
    }
}

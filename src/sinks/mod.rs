//! Notification sinks and the fan-out dispatcher.
//!
//! Delivery is best-effort. A sink that fails gets a warning in the log
//! and nothing else: the other sinks still get the message and the poll
//! cycle is never aborted by a delivery problem.

pub mod logfile;
pub mod telegram;

use async_trait::async_trait;

pub use logfile::LogSink;
pub use telegram::TelegramSink;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct SinkError(pub String);

#[async_trait]
pub trait Sink: Send + Sync {
    fn name(&self) -> &'static str;
    async fn deliver(&self, message: &str) -> Result<(), SinkError>;
}

pub struct Dispatcher {
    sinks: Vec<Box<dyn Sink>>,
}

impl Dispatcher {
    pub fn new(sinks: Vec<Box<dyn Sink>>) -> Self {
        Self { sinks }
    }

    /// Fans the message out to every configured sink. Returns how many
    /// sinks accepted it; per-sink failures are logged, never propagated.
    pub async fn dispatch(&self, message: &str) -> usize {
        let mut delivered = 0;
        for sink in &self.sinks {
            match sink.deliver(message).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(sink = sink.name(), error = %e, "delivery failed");
                }
            }
        }
        delivered
    }
}

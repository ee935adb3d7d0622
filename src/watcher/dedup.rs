use crate::client::ActivityEntry;

/// Filters activity batches against a high-water-mark timestamp.
///
/// Invariant: the watermark never decreases. 0 means "no floor" — on the
/// first batch everything qualifies.
#[derive(Debug, Default)]
pub struct ActivityDeduplicator {
    watermark: i64,
}

impl ActivityDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn watermark(&self) -> i64 {
        self.watermark
    }

    /// Returns the entries not yet seen (timestamp strictly above the
    /// watermark) and advances the watermark to the maximum timestamp of
    /// the ENTIRE batch when that maximum is positive.
    ///
    /// The batch-wide maximum is deliberate: the watermark tracks the
    /// feed's progress, not just the entries we cared about, so a burst of
    /// irrelevant activity still moves the floor forward and ties are
    /// never re-emitted on the next cycle.
    pub fn sift<'a>(&mut self, batch: &'a [ActivityEntry]) -> Vec<&'a ActivityEntry> {
        let fresh: Vec<&ActivityEntry> = batch
            .iter()
            .filter(|entry| entry.timestamp > self.watermark)
            .collect();

        let batch_max = batch.iter().map(|entry| entry.timestamp).max().unwrap_or(0);
        if batch_max > self.watermark {
            self.watermark = batch_max;
        }

        fresh
    }
}

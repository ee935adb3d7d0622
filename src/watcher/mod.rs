//! The poll loop and its failure governor.
//!
//! One logical worker owns everything mutable here (snapshot store,
//! watermark, failure counter, session). State moves only inside a cycle,
//! synchronously; the only outside influence is the cancellation token.

pub mod dedup;
pub mod diff;
pub mod snapshot;

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::client::{ClientError, RemoteClient};
use crate::config::Config;
use crate::error::WatchError;
use crate::sinks::Dispatcher;

use dedup::ActivityDeduplicator;
use snapshot::{ProfileSnapshot, SnapshotStore, TrackedIdentity};

/// Consecutive failing cycles tolerated before the loop gives up.
const FAILURE_THRESHOLD: u32 = 3;

enum CycleOutcome {
    /// Zero fetch errors. Resets the failure counter.
    Clean,
    /// At least one fetch error. Carries the last one for the governor.
    Failed(ClientError),
    /// Cancellation observed mid-cycle.
    Cancelled,
}

pub struct Watcher<C: RemoteClient> {
    client: C,
    dispatcher: Dispatcher,
    interval: Duration,
    throttle: Duration,
    handles: Vec<String>,
    targets: Vec<TrackedIdentity>,
    store: SnapshotStore,
    dedup: ActivityDeduplicator,
    logged_in: bool,
}

impl<C: RemoteClient> Watcher<C> {
    pub fn new(client: C, dispatcher: Dispatcher, config: &Config) -> Self {
        Self {
            client,
            dispatcher,
            interval: Duration::from_secs(config.interval_seconds),
            throttle: Duration::from_secs(config.sleep_seconds),
            handles: config.target_handles.clone(),
            targets: Vec::new(),
            store: SnapshotStore::new(),
            dedup: ActivityDeduplicator::new(),
            logged_in: false,
        }
    }

    /// Runs the watcher until cancellation or governor exhaustion.
    ///
    /// Whatever way the loop ends, the remote session is closed exactly
    /// once before this returns.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<(), WatchError> {
        let outcome = self.run_inner(&cancel).await;

        if self.logged_in {
            tracing::info!("logging out from the remote service");
            if let Err(e) = self.client.logout().await {
                tracing::warn!(error = %e, "logout failed");
            }
            self.logged_in = false;
        }

        outcome
    }

    async fn run_inner(&mut self, cancel: &CancellationToken) -> Result<(), WatchError> {
        tracing::info!("logging in to the remote service");
        self.client.login().await.map_err(WatchError::Login)?;
        self.logged_in = true;
        tracing::info!("logged in");

        if cancel.is_cancelled() {
            return Ok(());
        }

        self.seed().await?;

        tracing::info!(targets = self.targets.len(), "starting watcher");

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately; the first cycle should run
        // a full period after seeding, like every later one.
        interval.tick().await;

        let mut failures: u32 = 0;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                _ = interval.tick() => {}
            }

            match self.cycle(cancel).await {
                CycleOutcome::Clean => failures = 0,
                CycleOutcome::Failed(source) => {
                    failures += 1;
                    tracing::warn!(failures, "cycle had fetch errors");
                    if failures >= FAILURE_THRESHOLD {
                        return Err(WatchError::Exhausted { failures, source });
                    }
                }
                CycleOutcome::Cancelled => return Ok(()),
            }
        }
    }

    /// Fetches an initial snapshot for every tracked handle. Any failure
    /// here is fatal: the watcher cannot diff against a hole.
    async fn seed(&mut self) -> Result<(), WatchError> {
        let handles = self.handles.clone();
        for handle in handles {
            tracing::info!(handle = %handle, "fetching initial profile");
            let data = self
                .client
                .fetch_profile(&handle)
                .await
                .map_err(|source| WatchError::Seed {
                    handle: handle.clone(),
                    source,
                })?;

            self.store.put(data.id, ProfileSnapshot::from(&data));
            self.targets.push(TrackedIdentity {
                id: data.id,
                handle,
            });
        }
        Ok(())
    }

    /// One fetch -> dedup -> diff -> dispatch pass.
    ///
    /// Fetch errors are absorbed here: the failed call contributes no
    /// watermark or snapshot update and the cycle carries on, reporting
    /// Failed at the end so the governor can count it (once per cycle,
    /// however many fetches broke).
    async fn cycle(&mut self, cancel: &CancellationToken) -> CycleOutcome {
        let mut last_error: Option<ClientError> = None;

        tracing::debug!("requesting recent activity");
        match self.client.fetch_recent_activity().await {
            Ok(batch) => {
                let fresh = self.dedup.sift(&batch);
                for entry in fresh {
                    for target in self
                        .targets
                        .iter()
                        .filter(|t| entry.referenced_ids.contains(&t.id))
                    {
                        let message = format!(
                            "[{}] [{}] {}",
                            target.handle,
                            event_clock(entry.timestamp),
                            entry.text
                        );
                        self.dispatcher.dispatch(&message).await;
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "activity fetch failed");
                last_error = Some(e);
            }
        }

        for i in 0..self.targets.len() {
            if cancel.is_cancelled() {
                return CycleOutcome::Cancelled;
            }

            let target = self.targets[i].clone();
            tracing::debug!(handle = %target.handle, "refreshing profile");

            match self.client.fetch_profile(&target.handle).await {
                Ok(fresh) => {
                    if let Some(old) = self.store.get(target.id) {
                        let outcome = diff::compare(old, &fresh);
                        if outcome.changed {
                            let mut message =
                                format!("[{}] [{}] :\n", target.handle, wall_clock());
                            message.push_str(&outcome.messages.join("\n"));
                            self.store.put(target.id, outcome.updated);
                            self.dispatcher.dispatch(&message).await;
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(handle = %target.handle, error = %e, "profile fetch failed");
                    last_error = Some(e);
                }
            }

            // Throttle outbound requests between identities. The pause is
            // cancellable so shutdown never waits on it.
            tokio::select! {
                _ = cancel.cancelled() => return CycleOutcome::Cancelled,
                _ = tokio::time::sleep(self.throttle) => {}
            }
        }

        match last_error {
            None => CycleOutcome::Clean,
            Some(e) => CycleOutcome::Failed(e),
        }
    }
}

fn event_clock(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

fn wall_clock() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

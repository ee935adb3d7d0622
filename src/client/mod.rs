//! The remote-service capability.
//!
//! The watcher only ever talks to the remote service through this trait:
//! log in, log out, fetch one profile, fetch the recent-activity feed.
//! Keeping the seam this narrow lets the diff engine and deduplicator run
//! against canned fixtures in tests, with no network anywhere.

pub mod http;

use std::collections::HashSet;

use async_trait::async_trait;
use serde::Deserialize;

pub use http::HttpRemoteClient;

/// A profile as the remote service reports it right now.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileData {
    /// Remote-assigned numeric id. Stable for the account's lifetime.
    pub id: u64,
    pub handle: String,
    pub biography: String,
    pub follower_count: i64,
    pub following_count: i64,
    pub post_count: i64,
    pub tag_count: i64,
}

/// One raw entry from the activity feed. Read once, then either dispatched
/// or discarded; never stored.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityEntry {
    /// Unix seconds.
    pub timestamp: i64,
    pub kind: String,
    /// Identity ids this entry references (likes, follows, mentions, ...).
    pub referenced_ids: HashSet<u64>,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("fetch failed: {0}")]
    Fetch(String),
}

#[async_trait]
pub trait RemoteClient: Send {
    async fn login(&mut self) -> Result<(), ClientError>;
    async fn logout(&mut self) -> Result<(), ClientError>;
    async fn fetch_profile(&self, handle: &str) -> Result<ProfileData, ClientError>;
    async fn fetch_recent_activity(&self) -> Result<Vec<ActivityEntry>, ClientError>;
}

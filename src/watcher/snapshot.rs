use std::collections::HashMap;

use crate::client::ProfileData;

/// One of the fixed set of remote accounts the watcher observes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedIdentity {
    pub id: u64,
    pub handle: String,
}

/// Last-known profile attribute values for a tracked identity.
///
/// Replaced wholesale when the diff engine finds a delta, never mutated
/// field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSnapshot {
    pub handle: String,
    pub biography: String,
    pub follower_count: i64,
    pub following_count: i64,
    pub post_count: i64,
    pub tag_count: i64,
}

impl From<&ProfileData> for ProfileSnapshot {
    fn from(data: &ProfileData) -> Self {
        Self {
            handle: data.handle.clone(),
            biography: data.biography.clone(),
            follower_count: data.follower_count,
            following_count: data.following_count,
            post_count: data.post_count,
            tag_count: data.tag_count,
        }
    }
}

/// Identity id -> last-known snapshot. Bounded by the tracked set, so no
/// eviction. Owned exclusively by the poll loop.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    snapshots: HashMap<u64, ProfileSnapshot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: u64) -> Option<&ProfileSnapshot> {
        self.snapshots.get(&id)
    }

    pub fn put(&mut self, id: u64, snapshot: ProfileSnapshot) {
        self.snapshots.insert(id, snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

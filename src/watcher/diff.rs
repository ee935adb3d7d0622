use crate::client::ProfileData;
use crate::watcher::snapshot::ProfileSnapshot;

/// Result of comparing a fresh profile against the stored snapshot.
#[derive(Debug, Clone)]
pub struct DiffOutcome {
    pub changed: bool,
    pub updated: ProfileSnapshot,
    /// One line per differing field, in a fixed order.
    pub messages: Vec<String>,
}

/// Pure projection: old snapshot + fresh data -> outcome.
///
/// Fields are checked in a fixed order (biography, followers, following,
/// posts, tags) so message ordering is reproducible. Counts are compared
/// exactly; there is nothing approximate about an integer follower count.
pub fn compare(old: &ProfileSnapshot, fresh: &ProfileData) -> DiffOutcome {
    let mut updated = old.clone();
    let mut messages = Vec::new();

    if fresh.biography != old.biography {
        messages.push(format!(
            "User {} biography changed from {} to {}",
            old.handle, old.biography, fresh.biography
        ));
        updated.biography = fresh.biography.clone();
    }
    if fresh.follower_count != old.follower_count {
        messages.push(format!(
            "User {} followers changed from {} to {}",
            old.handle, old.follower_count, fresh.follower_count
        ));
        updated.follower_count = fresh.follower_count;
    }
    if fresh.following_count != old.following_count {
        messages.push(format!(
            "User {} following changed from {} to {}",
            old.handle, old.following_count, fresh.following_count
        ));
        updated.following_count = fresh.following_count;
    }
    if fresh.post_count != old.post_count {
        messages.push(format!(
            "User {} posts changed from {} to {}",
            old.handle, old.post_count, fresh.post_count
        ));
        updated.post_count = fresh.post_count;
    }
    if fresh.tag_count != old.tag_count {
        messages.push(format!(
            "User {} tags changed from {} to {}",
            old.handle, old.tag_count, fresh.tag_count
        ));
        updated.tag_count = fresh.tag_count;
    }

    DiffOutcome {
        changed: !messages.is_empty(),
        updated,
        messages,
    }
}

use std::collections::HashSet;

use vigil::client::ActivityEntry;
use vigil::watcher::dedup::ActivityDeduplicator;

// Helper to create an activity entry with the fields the dedup cares about
fn entry(timestamp: i64, referenced: &[u64]) -> ActivityEntry {
    ActivityEntry {
        timestamp,
        kind: "like".to_string(),
        referenced_ids: referenced.iter().copied().collect::<HashSet<u64>>(),
        text: format!("event at {}", timestamp),
    }
}

#[test]
fn test_empty_batch_is_a_noop() {
    let mut dedup = ActivityDeduplicator::new();

    let fresh = dedup.sift(&[]);

    assert!(fresh.is_empty());
    assert_eq!(dedup.watermark(), 0, "empty batch must not move the floor");
}

#[test]
fn test_first_batch_everything_qualifies() {
    let mut dedup = ActivityDeduplicator::new();
    let batch = vec![entry(100, &[1]), entry(200, &[2]), entry(150, &[])];

    let fresh = dedup.sift(&batch);

    // Watermark starts at 0 ("no floor"), so all three pass.
    assert_eq!(fresh.len(), 3);
    assert_eq!(dedup.watermark(), 200);
}

#[test]
fn test_only_entries_above_the_floor_qualify() {
    // watermark=1000, batch=[ts:900, ts:1100] -> one qualifying entry,
    // new watermark 1100.
    let mut dedup = ActivityDeduplicator::new();
    let _ = dedup.sift(&[entry(1000, &[])]); // raise the floor to 1000
    assert_eq!(dedup.watermark(), 1000);

    let batch = vec![entry(900, &[]), entry(1100, &[42])];
    let fresh = dedup.sift(&batch);

    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].timestamp, 1100);
    assert_eq!(dedup.watermark(), 1100);
}

#[test]
fn test_entries_at_the_watermark_are_already_seen() {
    let mut dedup = ActivityDeduplicator::new();
    let _ = dedup.sift(&[entry(500, &[1])]);

    // A tie with the watermark never re-qualifies, regardless of content.
    let batch = [entry(500, &[1]), entry(400, &[2])];
    let fresh = dedup.sift(&batch);

    assert!(fresh.is_empty());
    assert_eq!(dedup.watermark(), 500, "stale batch must not lower the floor");
}

#[test]
fn test_irrelevant_entries_still_advance_the_watermark() {
    // An entry that references nobody tracked still counts towards the
    // batch maximum, so the next cycle does not recheck the same boundary.
    let mut dedup = ActivityDeduplicator::new();

    let batch = [entry(700, &[])];
    let fresh = dedup.sift(&batch);
    assert_eq!(fresh.len(), 1);
    assert_eq!(dedup.watermark(), 700);

    // Replay of the same feed: nothing qualifies anymore.
    let replay_batch = [entry(700, &[])];
    let replay = dedup.sift(&replay_batch);
    assert!(replay.is_empty());
}

#[test]
fn test_nonpositive_batch_maximum_leaves_watermark_unchanged() {
    let mut dedup = ActivityDeduplicator::new();

    let batch = [entry(0, &[1])];
    let fresh = dedup.sift(&batch);

    assert!(fresh.is_empty(), "ts 0 is not above the 0 floor");
    assert_eq!(dedup.watermark(), 0);
}

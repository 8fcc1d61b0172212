use std::sync::Arc;

use soundboard::status::StatusFeed;
use soundboard_test_utils::init_tracing;

#[tokio::test]
async fn concurrent_updates_hit_their_own_entries() {
    init_tracing();

    let feed = Arc::new(StatusFeed::new());

    let mut handles = Vec::new();
    for i in 0..64 {
        let feed = Arc::clone(&feed);
        handles.push(tokio::spawn(async move {
            let token = feed.begin(format!("op {i} running"));
            // Let other operations insert at the head before we come back.
            tokio::task::yield_now().await;
            feed.update(token, format!("op {i} done"));
        }));
    }
    for handle in handles {
        handle.await.expect("feed task panicked");
    }

    let snapshot = feed.snapshot();
    assert_eq!(snapshot.len(), 64);
    for i in 0..64 {
        assert!(
            snapshot.contains(&format!("op {i} done")),
            "entry for op {i} was overwritten by another operation"
        );
    }
}

#[tokio::test]
async fn update_finds_entry_after_later_insertions() {
    init_tracing();

    let feed = StatusFeed::new();
    let first = feed.begin("playing a.mp3");
    for i in 0..10 {
        feed.begin(format!("playing clip {i}"));
    }
    feed.update(first, "stopped a.mp3");

    let snapshot = feed.snapshot();
    // The first entry is the oldest, so it sits at the tail.
    assert_eq!(snapshot.last().map(String::as_str), Some("stopped a.mp3"));
}

#[tokio::test]
async fn entries_are_newest_first() {
    init_tracing();

    let feed = StatusFeed::new();
    feed.begin("playing a.mp3");
    feed.begin("playing b.mp3");

    assert_eq!(feed.snapshot(), vec!["playing b.mp3", "playing a.mp3"]);
}

#[tokio::test]
async fn both_updates_land_regardless_of_order() {
    init_tracing();

    let feed = StatusFeed::new();
    let t1 = feed.begin("playing a.mp3");
    let t2 = feed.begin("playing b.mp3");

    // Reverse completion order relative to creation.
    feed.update(t2, "stopped b.mp3");
    feed.update(t1, "stopped a.mp3");

    let snapshot = feed.snapshot();
    assert!(snapshot.contains(&"stopped a.mp3".to_string()));
    assert!(snapshot.contains(&"stopped b.mp3".to_string()));
}

#[tokio::test]
async fn length_never_decreases_without_clear() {
    init_tracing();

    let feed = StatusFeed::new();
    let mut prev = 0;
    let mut tokens = Vec::new();
    for i in 0..20 {
        tokens.push(feed.begin(format!("op {i}")));
        assert!(feed.len() >= prev);
        prev = feed.len();

        if i % 3 == 0 {
            feed.update(tokens[i / 2], format!("op rewritten at {i}"));
            assert!(feed.len() >= prev);
            prev = feed.len();
        }
    }
    assert_eq!(feed.len(), 20);
}

#[tokio::test]
async fn clear_resets_the_feed() {
    init_tracing();

    let feed = StatusFeed::new();
    for i in 0..5 {
        feed.begin(format!("op {i}"));
    }
    assert_eq!(feed.len(), 5);

    feed.clear();
    assert_eq!(feed.snapshot().len(), 0);
    assert!(feed.is_empty());

    feed.begin("op after clear");
    assert_eq!(feed.len(), 1);
}

#[tokio::test]
async fn update_after_clear_is_dropped() {
    init_tracing();

    let feed = StatusFeed::new();
    let token = feed.begin("saving catalog");
    feed.clear();

    feed.update(token, "catalog saved");
    assert!(feed.is_empty());
}

#[tokio::test]
async fn mutations_wake_a_waiting_view() {
    init_tracing();

    let feed = Arc::new(StatusFeed::new());

    // A mutation before anyone waits is remembered.
    feed.begin("playing a.mp3");
    soundboard_test_utils::with_timeout(feed.changed()).await;

    // And one that happens while a view is parked wakes it.
    let waiter = {
        let feed = Arc::clone(&feed);
        tokio::spawn(async move { feed.changed().await })
    };
    tokio::task::yield_now().await;
    feed.clear();
    soundboard_test_utils::with_timeout(async { waiter.await.expect("waiter panicked") }).await;
}

// src/status.rs

//! Shared feed of per-operation status lines.
//!
//! Every long-running action (playback, download, catalog save/load) opens an
//! entry here when it starts and rewrites that same entry once when it ends.
//! Entries are addressed by an [`EntryToken`] handed out at creation, so an
//! update always lands on the entry it belongs to no matter how many other
//! operations have inserted entries at the head in the meantime.

use std::sync::Mutex;

use tokio::sync::Notify;
use tracing::debug;

/// Stable identity of one feed entry.
///
/// Valid for the lifetime of the entry; not an index into the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryToken(u64);

#[derive(Debug)]
struct StatusEntry {
    token: EntryToken,
    text: String,
}

#[derive(Debug, Default)]
struct FeedState {
    /// Newest first.
    entries: Vec<StatusEntry>,
    next_token: u64,
}

/// Ordered, concurrently mutable log of operation status lines.
///
/// `begin`/`update`/`clear` serialize on an internal lock and may be called
/// from any task; `snapshot` returns a consistent point-in-time copy for
/// rendering. Each mutation fires the change notification so the view can
/// redraw without polling.
#[derive(Debug, Default)]
pub struct StatusFeed {
    state: Mutex<FeedState>,
    notify: Notify,
}

impl StatusFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new entry at the head of the feed and return its token.
    pub fn begin(&self, text: impl Into<String>) -> EntryToken {
        let text = text.into();
        let token = {
            let mut state = self.state.lock().unwrap();
            let token = EntryToken(state.next_token);
            state.next_token += 1;
            state.entries.insert(0, StatusEntry { token, text });
            token
        };
        self.notify.notify_one();
        token
    }

    /// Replace the text of the entry identified by `token`.
    ///
    /// An update whose entry is gone (the feed was cleared after `begin`)
    /// is dropped silently; the operation it belonged to has nothing left
    /// to report into.
    pub fn update(&self, token: EntryToken, text: impl Into<String>) {
        {
            let mut state = self.state.lock().unwrap();
            match state.entries.iter_mut().find(|e| e.token == token) {
                Some(entry) => entry.text = text.into(),
                None => {
                    debug!(?token, "update for entry no longer in feed; dropped");
                    return;
                }
            }
        }
        self.notify.notify_one();
    }

    /// Empty the feed, e.g. when the view is reset.
    pub fn clear(&self) {
        self.state.lock().unwrap().entries.clear();
        self.notify.notify_one();
    }

    /// Current entry texts, newest first.
    pub fn snapshot(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.entries.iter().map(|e| e.text.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves after the next mutation of the feed.
    ///
    /// A mutation that happens while nobody is waiting is remembered, so a
    /// single consumer never misses a redraw; several mutations in quick
    /// succession may coalesce into one wake-up.
    pub async fn changed(&self) {
        self.notify.notified().await;
    }
}

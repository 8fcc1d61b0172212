// src/registry.rs

//! Registry of in-flight playback processes.
//!
//! Each spawned player process is registered here for as long as it runs, so
//! a single broadcast can interrupt everything that is currently audible.
//! The registry never touches the child processes itself: `stop_all` only
//! raises each playback's stop signal, and the task supervising that child
//! reacts from its own wait loop.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;
use tracing::debug;

/// Identity of a registered playback process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessId(pub u64);

#[derive(Debug, Default)]
struct RegistryState {
    handles: HashMap<ProcessId, Arc<Notify>>,
    next_id: u64,
}

/// Set of currently-playing, interruptible processes.
#[derive(Debug, Default)]
pub struct ProcessRegistry {
    active: Mutex<RegistryState>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a freshly spawned playback to the active set.
    ///
    /// The returned guard carries the playback's stop signal and removes the
    /// handle from the set when dropped, on every exit path.
    pub fn register(&self) -> PlaybackGuard<'_> {
        let stop = Arc::new(Notify::new());
        let id = {
            let mut state = self.active.lock().unwrap();
            let id = ProcessId(state.next_id);
            state.next_id += 1;
            state.handles.insert(id, Arc::clone(&stop));
            id
        };
        debug!(?id, "playback registered");
        PlaybackGuard {
            id,
            stop,
            registry: self,
        }
    }

    /// Remove a handle from the active set.
    ///
    /// A handle that is already absent is ignored; a process exiting
    /// naturally can race a stop broadcast.
    pub fn unregister(&self, id: ProcessId) {
        let removed = self.active.lock().unwrap().handles.remove(&id).is_some();
        if removed {
            debug!(?id, "playback unregistered");
        }
    }

    /// Signal every playback registered at the moment of the call.
    ///
    /// Best-effort and non-blocking: nothing is removed here, nothing is
    /// waited on, and a playback registered after the active set has been
    /// snapshotted is unaffected.
    pub fn stop_all(&self) {
        let targets: Vec<Arc<Notify>> = {
            let state = self.active.lock().unwrap();
            state.handles.values().map(Arc::clone).collect()
        };
        debug!(count = targets.len(), "broadcasting stop to active playbacks");
        for stop in targets {
            stop.notify_one();
        }
    }

    pub fn active_count(&self) -> usize {
        self.active.lock().unwrap().handles.len()
    }
}

/// Scoped registration of one playback process.
///
/// Dropping the guard unregisters the playback, which keeps registration and
/// de-registration symmetric even when the supervising task errors out.
#[derive(Debug)]
pub struct PlaybackGuard<'a> {
    id: ProcessId,
    stop: Arc<Notify>,
    registry: &'a ProcessRegistry,
}

impl PlaybackGuard<'_> {
    pub fn id(&self) -> ProcessId {
        self.id
    }

    /// Resolves once a broadcast stop has been requested for this playback.
    ///
    /// A stop raised before the first await is remembered, so the signal
    /// cannot be lost between registration and the supervising wait loop.
    pub async fn stopped(&self) {
        self.stop.notified().await;
    }
}

impl Drop for PlaybackGuard<'_> {
    fn drop(&mut self) {
        self.registry.unregister(self.id);
    }
}

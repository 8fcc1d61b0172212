// src/ops.rs

//! Launches user-triggered operations and reports their lifecycle through
//! the status feed.
//!
//! Each triggered action opens its own feed entry, runs as an independent
//! Tokio task, and rewrites exactly that entry once on completion or
//! failure. Failures end in the entry text; they never escape the task.

use std::sync::Arc;

use tracing::{debug, error};

use crate::controller::Controller;
use crate::status::StatusFeed;

/// Fire-and-forget starter for the long-running soundboard actions.
#[derive(Clone)]
pub struct OperationRunner {
    feed: Arc<StatusFeed>,
    controller: Arc<dyn Controller>,
}

impl OperationRunner {
    pub fn new(feed: Arc<StatusFeed>, controller: Arc<dyn Controller>) -> Self {
        Self { feed, controller }
    }

    pub fn feed(&self) -> &Arc<StatusFeed> {
        &self.feed
    }

    /// Start playback of a clip.
    pub fn play(&self, identifier: impl Into<String>) {
        let identifier = identifier.into();
        let token = self.feed.begin(format!("playing {identifier}"));
        let feed = Arc::clone(&self.feed);
        let controller = Arc::clone(&self.controller);

        tokio::spawn(async move {
            match controller.play_sound(&identifier).await {
                Ok(()) => feed.update(token, format!("finished {identifier}")),
                Err(e) => {
                    error!(clip = %identifier, error = %e, "playback failed");
                    feed.update(token, format!("could not play {identifier}: {e}"));
                }
            }
        });
    }

    /// Start a download into the download directory.
    pub fn download(&self, identifier: impl Into<String>) {
        let identifier = identifier.into();
        let token = self.feed.begin(format!("downloading {identifier}"));
        let feed = Arc::clone(&self.feed);
        let controller = Arc::clone(&self.controller);

        tokio::spawn(async move {
            match controller.download_file(&identifier).await {
                Ok(path) => feed.update(token, format!("downloaded {}", path.display())),
                Err(e) => {
                    error!(url = %identifier, error = %e, "download failed");
                    feed.update(token, format!("could not download {identifier}: {e}"));
                }
            }
        });
    }

    /// Start writing the catalog to disk.
    pub fn save(&self) {
        let token = self.feed.begin("saving catalog");
        let feed = Arc::clone(&self.feed);
        let controller = Arc::clone(&self.controller);

        tokio::spawn(async move {
            match controller.save_catalog().await {
                Ok(()) => feed.update(token, "catalog saved"),
                Err(e) => {
                    error!(error = %e, "catalog save failed");
                    feed.update(token, format!("could not save: {e}"));
                }
            }
        });
    }

    /// Start rereading the catalog from disk.
    pub fn load(&self) {
        let token = self.feed.begin("loading catalog");
        let feed = Arc::clone(&self.feed);
        let controller = Arc::clone(&self.controller);

        tokio::spawn(async move {
            match controller.load_catalog().await {
                Ok(()) => feed.update(token, "catalog loaded"),
                Err(e) => {
                    error!(error = %e, "catalog load failed");
                    feed.update(token, format!("could not load: {e}"));
                }
            }
        });
    }

    /// Broadcast a stop to everything playing. Immediate; no feed entry of
    /// its own.
    pub fn stop_all(&self) {
        debug!("stop-all requested");
        self.controller.stop_all_sounds();
    }
}

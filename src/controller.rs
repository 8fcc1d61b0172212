// src/controller.rs

//! Capability surface between the front end / operation runner and the
//! domain operations: playback, download, catalog persistence.
//!
//! The runner talks to a [`Controller`] instead of concrete plumbing. This
//! makes it easy to swap in a fake controller in tests while keeping the
//! production implementation in [`LocalController`].

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use reqwest::Client;
use tracing::info;
use url::Url;

use crate::catalog::{Catalog, CATALOG_FILE};
use crate::errors::Result;
use crate::player::Player;
use crate::registry::ProcessRegistry;
use crate::search;

/// Directory downloaded clips are written to, relative to the working
/// directory.
pub const DOWNLOAD_DIR: &str = "download";

/// Boxed future returned by [`Controller`] methods.
pub type ControllerFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Narrow interface the operation runner depends on.
///
/// Production code uses [`LocalController`]; tests can provide their own
/// implementation that doesn't spawn processes or touch the network.
pub trait Controller: Send + Sync {
    /// Play a clip, resolving when playback ends or fails. The identifier
    /// may be a local path or a remote locator.
    fn play_sound<'a>(&'a self, identifier: &'a str) -> ControllerFuture<'a, ()>;

    /// Fetch a remote clip into the download directory, returning the local
    /// path it was written to.
    fn download_file<'a>(&'a self, identifier: &'a str) -> ControllerFuture<'a, PathBuf>;

    /// Write the catalog back to disk.
    fn save_catalog(&self) -> ControllerFuture<'_, ()>;

    /// Replace the in-memory catalog with the on-disk one.
    fn load_catalog(&self) -> ControllerFuture<'_, ()>;

    /// Broadcast a stop to every playback in flight.
    fn stop_all_sounds(&self);
}

/// Production controller: plays through an external player process, keeps
/// the catalog in memory, and persists it to the working directory.
#[derive(Debug)]
pub struct LocalController {
    registry: Arc<ProcessRegistry>,
    player: Player,
    http: Client,
    catalog: Mutex<Catalog>,
    catalog_path: PathBuf,
}

impl LocalController {
    pub fn new(registry: Arc<ProcessRegistry>, catalog: Catalog, player_program: &str) -> Self {
        let http = Client::new();
        Self {
            player: Player::new(player_program, Arc::clone(&registry), http.clone()),
            registry,
            http,
            catalog: Mutex::new(catalog),
            catalog_path: PathBuf::from(CATALOG_FILE),
        }
    }

    /// Bind a clip to a board key.
    pub fn assign(&self, key: char, clip: impl Into<String>) {
        self.catalog.lock().unwrap().assign(key, clip);
    }

    /// Unbind a board key, returning the clip it pointed at.
    pub fn remove(&self, key: char) -> Option<String> {
        self.catalog.lock().unwrap().remove(key)
    }

    pub fn clip_for(&self, key: char) -> Option<String> {
        self.catalog.lock().unwrap().get(key).map(str::to_string)
    }

    /// Key/clip pairs in key order, for listing.
    pub fn catalog_entries(&self) -> Vec<(String, String)> {
        self.catalog
            .lock()
            .unwrap()
            .entries()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Fuzzy-search `.mp3` files under the working directory.
    pub fn search_local(&self, query: &str) -> Vec<PathBuf> {
        search::search_local(Path::new("."), query)
    }

    /// Search the instant API for downloadable clips.
    pub async fn search_remote(&self, query: &str) -> Result<Vec<String>> {
        search::search_remote(&self.http, query).await
    }

    async fn download_inner(&self, identifier: &str) -> Result<PathBuf> {
        let url = Url::parse(identifier)
            .with_context(|| format!("parsing download URL '{identifier}'"))?;

        std::fs::create_dir_all(DOWNLOAD_DIR).context("creating download directory")?;

        let response = self.http.get(url.clone()).send().await?.error_for_status()?;
        let data = response.bytes().await?;

        let name = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|name| !name.is_empty())
            .unwrap_or("clip.mp3");
        let target = Path::new(DOWNLOAD_DIR).join(name);

        std::fs::write(&target, &data)
            .with_context(|| format!("writing {}", target.display()))?;
        info!(url = %identifier, path = %target.display(), "download complete");
        Ok(target)
    }
}

impl Controller for LocalController {
    fn play_sound<'a>(&'a self, identifier: &'a str) -> ControllerFuture<'a, ()> {
        Box::pin(self.player.play(identifier))
    }

    fn download_file<'a>(&'a self, identifier: &'a str) -> ControllerFuture<'a, PathBuf> {
        Box::pin(self.download_inner(identifier))
    }

    fn save_catalog(&self) -> ControllerFuture<'_, ()> {
        Box::pin(async move {
            let snapshot = self.catalog.lock().unwrap().clone();
            snapshot.save(&self.catalog_path)
        })
    }

    fn load_catalog(&self) -> ControllerFuture<'_, ()> {
        Box::pin(async move {
            let loaded = Catalog::load(&self.catalog_path)?;
            *self.catalog.lock().unwrap() = loaded;
            Ok(())
        })
    }

    fn stop_all_sounds(&self) {
        self.registry.stop_all();
    }
}

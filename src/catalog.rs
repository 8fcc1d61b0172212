// src/catalog.rs

//! On-disk clip catalog.
//!
//! A JSON map of board key to clip identifier, persisted as `data.json` in
//! the working directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::Result;

/// Catalog file name inside the soundboard directory.
pub const CATALOG_FILE: &str = "data.json";

/// Key-to-clip mapping persisted between runs.
///
/// Keys are single characters on the board; clips are local paths or URLs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub sounds: BTreeMap<String, String>,
}

impl Catalog {
    /// Read the catalog from `path`.
    ///
    /// An unreadable file yields an empty catalog so a fresh directory
    /// starts clean; a file that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no catalog on disk; starting empty");
                return Ok(Self::default());
            }
        };
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    pub fn assign(&mut self, key: char, clip: impl Into<String>) {
        self.sounds.insert(key.to_string(), clip.into());
    }

    pub fn remove(&mut self, key: char) -> Option<String> {
        self.sounds.remove(&key.to_string())
    }

    pub fn get(&self, key: char) -> Option<&str> {
        self.sounds.get(&key.to_string()).map(String::as_str)
    }

    /// Key/clip pairs in key order, for listing.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sounds.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }
}

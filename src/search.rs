// src/search.rs

//! Clip lookup: fuzzy filename search on disk and the remote instant API.

use std::path::{Path, PathBuf};

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::errors::{Result, SoundboardError};

/// Endpoint of the myinstants.com instant search API.
pub const INSTANT_API_URL: &str = "https://www.myinstants.com/api/v1/instants/";

/// Minimum query length before the remote API is consulted.
const MIN_API_QUERY_LEN: usize = 3;

/// Recursively collect `.mp3` files under `root` whose path fuzzy-matches
/// `query`. Matching is done on the path relative to `root`; an empty query
/// matches nothing.
pub fn search_local(root: &Path, query: &str) -> Vec<PathBuf> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut matches = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("mp3") {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        if fuzzy_match(query, &relative.to_string_lossy()) {
            matches.push(path.to_path_buf());
        }
    }
    matches
}

/// Ordered-subsequence match: every character of `pattern` occurs in `text`
/// in order, not necessarily adjacent.
pub fn fuzzy_match(pattern: &str, text: &str) -> bool {
    let mut wanted = pattern.chars().peekable();
    for c in text.chars() {
        match wanted.peek() {
            Some(&p) if p == c => {
                wanted.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    wanted.peek().is_none()
}

#[derive(Debug, Deserialize)]
struct InstantResults {
    #[serde(alias = "Results")]
    results: Vec<Instant>,
}

#[derive(Debug, Deserialize)]
struct Instant {
    sound: String,
}

/// Query the instant API for downloadable clips matching `query`.
///
/// Queries shorter than three characters return nothing without touching
/// the network.
pub async fn search_remote(client: &Client, query: &str) -> Result<Vec<String>> {
    if query.chars().count() < MIN_API_QUERY_LEN {
        return Ok(Vec::new());
    }

    let response = client
        .get(INSTANT_API_URL)
        .query(&[("format", "json"), ("name", query)])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SoundboardError::ApiStatus(status.as_u16()));
    }

    let body: InstantResults = response.json().await?;
    debug!(query, hits = body.results.len(), "instant API answered");
    Ok(body.results.into_iter().map(|i| i.sound).collect())
}

// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SoundboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog format error: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search API returned {0}")]
    ApiStatus(u16),

    #[error("player exited with code {0}")]
    PlayerExit(i32),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SoundboardError>;

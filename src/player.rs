// src/player.rs

//! External playback process handling.
//!
//! A clip is played by spawning the configured player binary (`mpg321` by
//! default). Local paths are passed as an argument; remote locators are
//! fetched into memory first and streamed to the player's stdin. While the
//! child runs it is registered in the [`ProcessRegistry`], and its wait loop
//! races process exit against the registry's stop broadcast.

use std::process::Stdio;
use std::sync::Arc;

use anyhow::Context;
use reqwest::Client;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, info};
use url::Url;

use crate::errors::{Result, SoundboardError};
use crate::registry::ProcessRegistry;

/// Player binary used when none is configured.
pub const DEFAULT_PLAYER: &str = "mpg321";

/// Spawns and supervises one player process per clip.
#[derive(Debug, Clone)]
pub struct Player {
    program: String,
    registry: Arc<ProcessRegistry>,
    http: Client,
}

impl Player {
    pub fn new(program: impl Into<String>, registry: Arc<ProcessRegistry>, http: Client) -> Self {
        Self {
            program: program.into(),
            registry,
            http,
        }
    }

    /// Play a clip to completion, or until a stop broadcast interrupts it.
    ///
    /// Blocks its own task for the duration of playback. A stopped playback
    /// is a normal end, not an error.
    pub async fn play(&self, identifier: &str) -> Result<()> {
        if identifier.starts_with("http://") || identifier.starts_with("https://") {
            self.play_remote(identifier).await
        } else {
            self.play_local(identifier).await
        }
    }

    async fn play_local(&self, path: &str) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd
            .spawn()
            .with_context(|| format!("spawning player '{}' for '{path}'", self.program))?;

        self.supervise(child, path).await
    }

    async fn play_remote(&self, locator: &str) -> Result<()> {
        let url =
            Url::parse(locator).with_context(|| format!("parsing clip locator '{locator}'"))?;
        let response = self.http.get(url).send().await?.error_for_status()?;
        let data = response.bytes().await?;

        let mut cmd = Command::new(&self.program);
        cmd.arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .with_context(|| format!("spawning player '{}' for '{locator}'", self.program))?;

        if let Some(mut stdin) = child.stdin.take() {
            let clip = locator.to_string();
            tokio::spawn(async move {
                // The player may exit or be stopped mid-stream; a broken
                // pipe here is not an error.
                if let Err(e) = stdin.write_all(&data).await {
                    debug!(clip = %clip, error = %e, "player stdin closed early");
                }
            });
        }

        self.supervise(child, locator).await
    }

    /// Wait for the child while listening for the registry's stop broadcast.
    ///
    /// The playback is registered for exactly the lifetime of this call; the
    /// guard unregisters it on every exit path.
    async fn supervise(&self, mut child: Child, identifier: &str) -> Result<()> {
        let registration = self.registry.register();

        // Drain stderr so the player cannot block on a full pipe.
        if let Some(stderr) = child.stderr.take() {
            let clip = identifier.to_string();
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(clip = %clip, "player stderr: {}", line);
                }
            });
        }

        info!(clip = %identifier, player = %self.program, "playback started");

        tokio::select! {
            status = child.wait() => {
                let status = status
                    .with_context(|| format!("waiting for player of '{identifier}'"))?;
                if status.success() {
                    info!(clip = %identifier, "playback finished");
                    Ok(())
                } else {
                    Err(SoundboardError::PlayerExit(status.code().unwrap_or(-1)))
                }
            }
            _ = registration.stopped() => {
                info!(clip = %identifier, "stop requested; terminating player");
                if let Err(e) = child.start_kill() {
                    // Already exited on its own; the goal state is reached
                    // either way.
                    debug!(clip = %identifier, error = %e, "player gone before kill");
                }
                let _ = child.wait().await;
                Ok(())
            }
        }
    }
}

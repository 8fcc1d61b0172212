use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use tokio::sync::Notify;

use soundboard::controller::{Controller, ControllerFuture};
use soundboard::errors::Result;

/// A fake controller that:
/// - records every capability call in order
/// - completes immediately unless a gate was installed for the operation
/// - fails operations that have a scripted failure message.
///
/// Operations are keyed by a short label: `"play <id>"`, `"download <id>"`,
/// `"save"`, `"load"`.
#[derive(Default)]
pub struct FakeController {
    calls: Arc<Mutex<Vec<String>>>,
    gates: Arc<Mutex<HashMap<String, Arc<Notify>>>>,
    failures: Arc<Mutex<HashMap<String, String>>>,
    stops: Arc<Mutex<usize>>,
}

impl FakeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far, in arrival order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// How many times `stop_all_sounds` has been invoked.
    pub fn stop_count(&self) -> usize {
        *self.stops.lock().unwrap()
    }

    /// Make `op` block until [`FakeController::release`] is called for it.
    pub fn gate(&self, op: &str) {
        self.gates
            .lock()
            .unwrap()
            .insert(op.to_string(), Arc::new(Notify::new()));
    }

    /// Allow a gated operation to finish.
    pub fn release(&self, op: &str) {
        if let Some(gate) = self.gates.lock().unwrap().get(op) {
            gate.notify_one();
        }
    }

    /// Script `op` to fail with `message` once it runs.
    pub fn fail_with(&self, op: &str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(op.to_string(), message.to_string());
    }

    async fn finish(&self, op: String) -> Result<()> {
        self.calls.lock().unwrap().push(op.clone());

        let gate = self.gates.lock().unwrap().get(&op).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if let Some(message) = self.failures.lock().unwrap().get(&op) {
            return Err(anyhow!("{message}").into());
        }
        Ok(())
    }
}

impl Controller for FakeController {
    fn play_sound<'a>(&'a self, identifier: &'a str) -> ControllerFuture<'a, ()> {
        Box::pin(self.finish(format!("play {identifier}")))
    }

    fn download_file<'a>(&'a self, identifier: &'a str) -> ControllerFuture<'a, PathBuf> {
        Box::pin(async move {
            self.finish(format!("download {identifier}")).await?;
            Ok(PathBuf::from("download").join("clip.mp3"))
        })
    }

    fn save_catalog(&self) -> ControllerFuture<'_, ()> {
        Box::pin(self.finish("save".to_string()))
    }

    fn load_catalog(&self) -> ControllerFuture<'_, ()> {
        Box::pin(self.finish("load".to_string()))
    }

    fn stop_all_sounds(&self) {
        *self.stops.lock().unwrap() += 1;
    }
}

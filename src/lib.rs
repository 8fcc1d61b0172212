// src/lib.rs

pub mod catalog;
pub mod cli;
pub mod console;
pub mod controller;
pub mod errors;
pub mod logging;
pub mod ops;
pub mod player;
pub mod registry;
pub mod search;
pub mod status;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::catalog::{Catalog, CATALOG_FILE};
use crate::cli::CliArgs;
use crate::controller::LocalController;
use crate::ops::OperationRunner;
use crate::registry::ProcessRegistry;
use crate::status::StatusFeed;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the on-disk catalog
/// - the process registry and status feed
/// - the controller and operation runner
/// - the console front end with Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    std::env::set_current_dir(&args.path)
        .with_context(|| format!("entering soundboard directory '{}'", args.path))?;

    let catalog = Catalog::load(Path::new(CATALOG_FILE))?;
    info!(
        clips = catalog.len(),
        player = %args.player,
        "soundboard starting"
    );

    let registry = Arc::new(ProcessRegistry::new());
    let feed = Arc::new(StatusFeed::new());
    let controller = Arc::new(LocalController::new(
        Arc::clone(&registry),
        catalog,
        &args.player,
    ));
    let runner = OperationRunner::new(Arc::clone(&feed), controller.clone());

    console::run(feed, runner, controller).await
}

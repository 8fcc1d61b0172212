// src/console.rs

//! Line-oriented front end.
//!
//! Stands in for a full widget UI at the view boundary: it turns typed
//! commands into runner operations and re-renders the status feed whenever
//! the feed's change notification fires. Everything it knows about the feed
//! comes from `snapshot()`; it never mutates feed state beyond `clear`.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Notify;
use tracing::info;

use crate::controller::LocalController;
use crate::ops::OperationRunner;
use crate::status::StatusFeed;

const HELP: &str = "\
commands:
  play <key|path|url>   play a catalog key, a file or a URL
  stop                  stop all playing clips
  add <key> <clip>      bind a clip to a board key
  rm <key>              unbind a board key
  list                  show the catalog
  find <text>           fuzzy-search local .mp3 files
  search <text>         search the instant API
  download <url>        fetch a clip into download/
  save | load           write / reread the catalog
  status                print the status feed
  clear                 clear the status feed
  quit";

/// Run the interactive loop until `quit`, end of input, or Ctrl-C.
pub async fn run(
    feed: Arc<StatusFeed>,
    runner: OperationRunner,
    controller: Arc<LocalController>,
) -> Result<()> {
    // Ctrl-C → stop everything and leave the loop.
    let shutdown = Arc::new(Notify::new());
    {
        let shutdown = Arc::clone(&shutdown);
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            shutdown.notify_one();
        });
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{HELP}");

    loop {
        tokio::select! {
            _ = feed.changed() => render(&feed),
            _ = shutdown.notified() => {
                info!("interrupt received; stopping playback and exiting");
                runner.stop_all();
                break;
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if !dispatch(line.trim(), &runner, &controller).await {
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
    }

    Ok(())
}

fn render(feed: &StatusFeed) {
    for text in feed.snapshot() {
        println!("  {text}");
    }
}

/// Handle one input line. Returns `false` when the loop should end.
async fn dispatch(line: &str, runner: &OperationRunner, controller: &LocalController) -> bool {
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    match cmd {
        "" => {}
        "play" => match resolve_clip(rest, controller) {
            Some(clip) => runner.play(clip),
            None => println!("nothing to play for '{rest}'"),
        },
        "stop" => runner.stop_all(),
        "add" => {
            let parsed = rest
                .split_once(char::is_whitespace)
                .and_then(|(key, clip)| single_char(key).map(|key| (key, clip.trim())));
            match parsed {
                Some((key, clip)) if !clip.is_empty() => {
                    controller.assign(key, clip);
                    println!("{key} -> {clip}");
                }
                _ => println!("usage: add <key> <clip>"),
            }
        }
        "rm" => match single_char(rest) {
            Some(key) => match controller.remove(key) {
                Some(clip) => println!("unbound {key} ({clip})"),
                None => println!("nothing bound to '{key}'"),
            },
            None => println!("usage: rm <key>"),
        },
        "list" | "ls" => {
            for (key, clip) in controller.catalog_entries() {
                println!("  {key}  {clip}");
            }
        }
        "find" => {
            for path in controller.search_local(rest) {
                println!("  {}", path.display());
            }
        }
        "search" => match controller.search_remote(rest).await {
            Ok(hits) => {
                for url in hits {
                    println!("  {url}");
                }
            }
            Err(e) => println!("search failed: {e}"),
        },
        "download" | "dl" => runner.download(rest),
        "save" => runner.save(),
        "load" => runner.load(),
        "status" => render(runner.feed()),
        "clear" => runner.feed().clear(),
        "help" => println!("{HELP}"),
        "quit" | "exit" => return false,
        other => println!("unknown command '{other}' (try 'help')"),
    }

    true
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// A single character is looked up on the board; anything longer is taken
/// as a path or URL directly.
fn resolve_clip(target: &str, controller: &LocalController) -> Option<String> {
    if target.is_empty() {
        return None;
    }
    match single_char(target) {
        Some(key) => controller.clip_for(key),
        None => Some(target.to_string()),
    }
}

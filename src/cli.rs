// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `soundboard`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "soundboard",
    version,
    about = "Keyboard-driven soundboard with clip download and search.",
    long_about = None
)]
pub struct CliArgs {
    /// Directory holding the soundboard; the process switches there at
    /// startup, so the catalog, searches and downloads are relative to it.
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub path: String,

    /// Player command used for playback.
    #[arg(long, value_name = "CMD", default_value = crate::player::DEFAULT_PLAYER)]
    pub player: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SOUNDBOARD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(lvl: LogLevel) -> Self {
        match lvl {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

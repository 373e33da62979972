//! Spotify Playlist Search CLI Library
//!
//! This library implements the pieces behind the `plsearch` binary: the
//! OAuth 2.0 PKCE authorization flow (including the short-lived local
//! callback server), token lifecycle management, and a concurrent,
//! paginated fuzzy search over the tracks of a playlist.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Typed error kinds shared across the crate
//! - `management` - Persistence: key-value cache store, token and playlist managers
//! - `search` - Pure fuzzy scorer (subsequence + Jaro-Winkler)
//! - `server` - One-shot local HTTP server for the OAuth callback
//! - `session` - Pure session state machine consumed by the CLI runner
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - PKCE verifier/challenge/state generation

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod search;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Starting authentication process...");
/// info!("Found {} matches", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// # Behavior
///
/// This macro terminates the process with exit code 1 after printing.
/// It should only be used at the CLI layer for unrecoverable errors;
/// library code returns [`error::Error`] instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

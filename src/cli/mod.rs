//! # CLI Module
//!
//! The command implementations behind the `plsearch` binary. Each command
//! coordinates the session, persistence and API layers and handles user
//! interaction: progress spinners, tables and colored status output.
//!
//! ## Commands
//!
//! - [`login`] - Runs the full authorization flow, driven by the session
//!   state machine in [`crate::session`]: check the stored session, then
//!   authorize (browser + callback), refresh, or short-circuit when the
//!   session is still valid, finishing with a profile fetch.
//! - [`logout`] - Clears the stored token fields unconditionally.
//! - [`list_playlists`] - Fetches and caches the full playlist listing,
//!   then renders an indexed table of the user's own and collaborative
//!   playlists. The index is the id accepted by `playlist search`.
//! - [`search_playlist`] - Resolves a playlist reference and runs the
//!   concurrent fuzzy track search, rendering matches in playlist order.

mod auth;
mod playlist;

pub use auth::login;
pub use auth::logout;
pub use playlist::list_playlists;
pub use playlist::search_playlist;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner used for long-running fetches, in the house style.
pub(crate) fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

//! Configuration management for the playlist search CLI.
//!
//! Configuration values are resolved from environment variables with
//! shipped defaults, so the tool works without any setup. A `.env` file in
//! the local data directory (`plsearch/.env`) can override any of them.
//!
//! Resolution order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults

use dotenv;
use std::{env, path::PathBuf};

const DEFAULT_CLIENT_ID: &str = "c4ab33f93b55422bb1cf39494023da7d";
const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:1024";
const DEFAULT_REDIRECT_URI: &str = "http://localhost:1024/callback";
const DEFAULT_SCOPE: &str =
    "playlist-read-private playlist-read-collaborative user-read-email user-read-private";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the `plsearch` data directory if it doesn't exist and loads
/// overrides from `plsearch/.env`. A missing `.env` file is not an error
/// since every setting has a default.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/plsearch/.env`
/// - macOS: `~/Library/Application Support/plsearch/.env`
/// - Windows: `%LOCALAPPDATA%/plsearch/.env`
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("plsearch/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    // Overrides are optional.
    let _ = dotenv::from_path(path);
    Ok(())
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Returns the bind address for the local OAuth callback server.
///
/// This is the single fixed, documented callback port; the listener fails
/// with `PortUnavailable` if something else already holds it.
pub fn server_addr() -> String {
    var_or("PLSEARCH_SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the Spotify API client ID used for the PKCE flow.
pub fn spotify_client_id() -> String {
    var_or("SPOTIFY_API_AUTH_CLIENT_ID", DEFAULT_CLIENT_ID)
}

/// Returns the OAuth redirect URI registered for the client.
///
/// Must point at the local callback server ([`server_addr`]) and match the
/// redirect URI registered in the Spotify application settings.
pub fn spotify_redirect_uri() -> String {
    var_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

/// Returns the scope string requested during authorization.
pub fn spotify_scope() -> String {
    var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

/// Returns Spotify's OAuth authorization endpoint.
pub fn spotify_apiauth_url() -> String {
    format!(
        "{}/authorize",
        var_or("SPOTIFY_API_ACCOUNTS_URL", DEFAULT_ACCOUNTS_URL)
    )
}

/// Returns Spotify's token exchange endpoint (authorization code and refresh).
pub fn spotify_apitoken_url() -> String {
    format!(
        "{}/api/token",
        var_or("SPOTIFY_API_ACCOUNTS_URL", DEFAULT_ACCOUNTS_URL)
    )
}

/// Returns the Spotify Web API base URL.
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

//! # Spotify Integration Module
//!
//! The integration layer between the CLI and the Spotify Web API. It owns
//! all HTTP communication: the OAuth 2.0 PKCE authorization flow, token
//! exchange and refresh, profile lookup, and the paginated playlist/track
//! endpoints behind the search pipeline.
//!
//! ## Modules
//!
//! - [`auth`] - Authorization coordinator: builds the authorize URL, opens
//!   the browser, drives the one-shot callback listener, and exchanges the
//!   authorization code (or a refresh token) for tokens.
//! - [`account`] - Authenticated user profile lookup.
//! - [`playlists`] - Playlist listing (follows `next` pages), single
//!   playlist lookup by offset, and the concurrent fan-out/fan-in track
//!   search.
//!
//! ## Error handling
//!
//! Every function returns [`crate::error::Result`]. Non-2xx responses are
//! decoded into [`crate::error::Error::Provider`] with Spotify's message
//! and status surfaced verbatim; transport failures map to `Network`.
//! Nothing here retries automatically.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

pub mod account;
pub mod auth;
pub mod playlists;

/// Timeout applied to every outbound request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the HTTP client used by all API calls.
pub fn http_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Bearer-authenticated GET returning a decoded JSON payload.
///
/// On a non-success status the body is decoded as Spotify's error envelope
/// (`{"error": {"status": ..., "message": ...}}`) and surfaced as
/// [`Error::Provider`].
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    token: &str,
    url: &str,
) -> Result<T> {
    let response = client.get(url).bearer_auth(token).send().await?;
    let status = response.status();

    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| "unknown error".to_string());

    Err(Error::Provider {
        status: status.as_u16(),
        message,
    })
}

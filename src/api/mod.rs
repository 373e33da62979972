//! # API Module
//!
//! HTTP handlers for the short-lived local callback server that completes
//! the OAuth 2.0 PKCE flow.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the single authorization redirect from
//!   Spotify's accounts service, validates the anti-CSRF state token and
//!   resolves the waiting flow with the authorization code (or a typed
//!   failure). The server shuts down after the first resolution.
//! - [`health`] - Status endpoint, mostly useful when debugging the local
//!   server setup.
//!
//! Handlers are plain async functions wired into an axum `Router` by
//! [`crate::server::wait_for_authorization`].

mod callback;
mod health;

pub use callback::{callback, resolve_redirect};
pub use health::health;

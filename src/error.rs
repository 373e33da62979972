use thiserror::Error;

/// Error kinds surfaced by the authentication and search core.
///
/// Every component-level operation returns one of these variants instead of
/// panicking. Nothing is retried automatically; the only built-in recovery
/// path is the explicit expired-token refresh driven by the session state
/// machine.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure talking to Spotify.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx API response; message and status are surfaced verbatim.
    #[error("{message} ({status})")]
    Provider { status: u16, message: String },

    /// The provider reported an error on the redirect, or the user declined.
    #[error("authorization denied: {0}")]
    AuthorizationDenied(String),

    /// The redirect's state token did not match the one we sent. Treated as
    /// a potential CSRF attempt and never retried automatically.
    #[error("authorization state mismatch")]
    StateMismatch,

    /// The default browser could not be opened for the authorize URL.
    #[error("failed to open browser")]
    BrowserLaunch,

    /// The fixed local callback port is already bound.
    #[error("callback address {0} unavailable")]
    PortUnavailable(String),

    /// The callback never arrived within the wait deadline.
    #[error("authorization timed out")]
    AuthorizationTimeout,

    /// The callback listener stopped before any redirect arrived. An
    /// internal failure, not a user denial.
    #[error("callback listener closed before authorization completed")]
    CallbackClosed,

    /// The remote listing has no playlist at the requested offset.
    #[error("playlist with ID of {0} doesn't exist")]
    PlaylistNotFound(String),

    /// No token is stored; the user must log in first.
    #[error("you are not logged in, please run `plsearch auth login`")]
    NotAuthenticated,

    /// The stored token has passed its expiry instant.
    #[error("your session has expired")]
    TokenExpired,

    /// A configured value could not be used (e.g. an unparsable bind address).
    #[error("configuration error: {0}")]
    Config(String),

    /// Local persistence failure (cache store read/write).
    #[error("store error: {0}")]
    Store(String),

    /// The token endpoint answered 2xx but the payload was not decodable.
    #[error("malformed token response: {0}")]
    TokenPayload(String),

    /// A spawned page-fetch task panicked or was cancelled.
    #[error("task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;

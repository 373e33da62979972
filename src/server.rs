use std::{net::SocketAddr, str::FromStr, sync::Arc, time::Duration};

use axum::{Extension, Router, routing::get};
use tokio::sync::{Mutex, oneshot};

use crate::{
    api, config,
    error::{Error, Result},
};

/// How long the listener waits for the browser redirect before giving up.
pub const CALLBACK_WAIT: Duration = Duration::from_secs(180);

/// Shared state between the one-shot listener and the callback handler.
///
/// `resolver` is taken by the first redirect that arrives; once it is gone
/// the outcome is settled and later requests cannot change it. `shutdown`
/// is taken alongside to schedule the deferred server stop.
pub struct CallbackState {
    pub expected_state: String,
    pub resolver: Mutex<Option<oneshot::Sender<Result<String>>>>,
    pub shutdown: Mutex<Option<oneshot::Sender<()>>>,
}

/// Binds the fixed local callback address and blocks until exactly one
/// redirect arrives, resolving with its authorization code.
///
/// Fails with `PortUnavailable` if something else holds the address (no
/// retry; this is a local single-user flow), `AuthorizationDenied` /
/// `StateMismatch` per the redirect contents, and `AuthorizationTimeout`
/// when nothing arrives within [`CALLBACK_WAIT`].
///
/// Shutdown is graceful: the handler triggers it after queueing its
/// response, so the success or failure page reaches the browser before the
/// server stops accepting connections.
pub async fn wait_for_authorization(expected_state: &str) -> Result<String> {
    let addr = SocketAddr::from_str(&config::server_addr())
        .map_err(|e| Error::Config(format!("invalid server address: {}", e)))?;
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|_| Error::PortUnavailable(addr.to_string()))?;

    let (resolve_tx, resolve_rx) = oneshot::channel();
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let state = Arc::new(CallbackState {
        expected_state: expected_state.to_string(),
        resolver: Mutex::new(Some(resolve_tx)),
        shutdown: Mutex::new(Some(shutdown_tx)),
    });

    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)));

    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    await_resolution(resolve_rx, server, CALLBACK_WAIT).await
}

/// Waits for the callback outcome, enforcing the deadline and cleaning up
/// the server task.
///
/// A resolver dropped without resolving means the listener died before any
/// redirect arrived; that is surfaced as `CallbackClosed`, not as a denial.
pub async fn await_resolution(
    resolve_rx: oneshot::Receiver<Result<String>>,
    server: tokio::task::JoinHandle<()>,
    deadline: Duration,
) -> Result<String> {
    match tokio::time::timeout(deadline, resolve_rx).await {
        Ok(Ok(outcome)) => {
            // Let the graceful shutdown finish flushing the response.
            let _ = server.await;
            outcome
        }
        Ok(Err(_)) => {
            server.abort();
            Err(Error::CallbackClosed)
        }
        Err(_) => {
            server.abort();
            Err(Error::AuthorizationTimeout)
        }
    }
}

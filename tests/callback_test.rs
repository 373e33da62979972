use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{Extension, extract::Query};
use plsearch::api::{callback, resolve_redirect};
use plsearch::error::Error;
use plsearch::server::{CallbackState, await_resolution};
use tokio::sync::{Mutex, oneshot};

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_resolve_redirect_success() {
    let code = resolve_redirect(&params(&[("code", "abc"), ("state", "xyz")]), "xyz").unwrap();
    assert_eq!(code, "abc");
}

#[test]
fn test_resolve_redirect_state_mismatch() {
    let outcome = resolve_redirect(&params(&[("code", "abc"), ("state", "other")]), "xyz");
    assert!(matches!(outcome, Err(Error::StateMismatch)));

    // A missing state parameter is also a mismatch
    let outcome = resolve_redirect(&params(&[("code", "abc")]), "xyz");
    assert!(matches!(outcome, Err(Error::StateMismatch)));
}

#[test]
fn test_resolve_redirect_denied() {
    let outcome = resolve_redirect(
        &params(&[("error", "access_denied"), ("state", "xyz")]),
        "xyz",
    );
    assert!(matches!(outcome, Err(Error::AuthorizationDenied(reason)) if reason == "access_denied"));
}

#[test]
fn test_resolve_redirect_denied_takes_precedence_over_state() {
    // The provider reporting an error wins even with a matching state
    let outcome = resolve_redirect(
        &params(&[("error", "access_denied"), ("state", "other")]),
        "xyz",
    );
    assert!(matches!(outcome, Err(Error::AuthorizationDenied(_))));
}

#[test]
fn test_resolve_redirect_missing_code() {
    let outcome = resolve_redirect(&params(&[("state", "xyz")]), "xyz");
    assert!(matches!(outcome, Err(Error::AuthorizationDenied(_))));
}

fn callback_state(expected: &str) -> (Arc<CallbackState>, oneshot::Receiver<plsearch::Result<String>>, oneshot::Receiver<()>) {
    let (resolve_tx, resolve_rx) = oneshot::channel();
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let state = Arc::new(CallbackState {
        expected_state: expected.to_string(),
        resolver: Mutex::new(Some(resolve_tx)),
        shutdown: Mutex::new(Some(shutdown_tx)),
    });
    (state, resolve_rx, shutdown_rx)
}

#[tokio::test]
async fn test_callback_resolves_once_and_schedules_shutdown() {
    let (state, mut resolve_rx, mut shutdown_rx) = callback_state("xyz");

    let page = callback(
        Query(params(&[("code", "abc"), ("state", "xyz")])),
        Extension(Arc::clone(&state)),
    )
    .await;
    assert!(page.0.contains("successful"));

    let outcome = resolve_rx.try_recv().unwrap();
    assert_eq!(outcome.unwrap(), "abc");

    // Shutdown was scheduled after resolving
    assert!(shutdown_rx.try_recv().is_ok());
}

#[tokio::test]
async fn test_second_request_cannot_change_the_outcome() {
    let (state, mut resolve_rx, _shutdown_rx) = callback_state("xyz");

    let _ = callback(
        Query(params(&[("code", "abc"), ("state", "xyz")])),
        Extension(Arc::clone(&state)),
    )
    .await;

    // A later request with a different code finds the outcome settled
    let page = callback(
        Query(params(&[("code", "def"), ("state", "xyz")])),
        Extension(Arc::clone(&state)),
    )
    .await;
    assert!(page.0.contains("already completed"));

    let outcome = resolve_rx.try_recv().unwrap();
    assert_eq!(outcome.unwrap(), "abc");
}

#[tokio::test]
async fn test_callback_reports_denial_to_browser_and_flow() {
    let (state, mut resolve_rx, _shutdown_rx) = callback_state("xyz");

    let page = callback(
        Query(params(&[("error", "access_denied"), ("state", "xyz")])),
        Extension(Arc::clone(&state)),
    )
    .await;
    assert!(page.0.contains("failed"));

    let outcome = resolve_rx.try_recv().unwrap();
    assert!(matches!(outcome, Err(Error::AuthorizationDenied(_))));
}

#[tokio::test]
async fn test_resolution_before_deadline_yields_the_code() {
    let (resolve_tx, resolve_rx) = oneshot::channel();
    let server = tokio::spawn(async {});

    resolve_tx.send(Ok("abc".to_string())).unwrap();
    let outcome = await_resolution(resolve_rx, server, Duration::from_secs(1)).await;
    assert_eq!(outcome.unwrap(), "abc");
}

#[tokio::test]
async fn test_dropped_resolver_is_an_internal_failure_not_a_denial() {
    let (resolve_tx, resolve_rx) = oneshot::channel::<plsearch::Result<String>>();
    let server = tokio::spawn(async {});

    // Listener died without resolving
    drop(resolve_tx);
    let outcome = await_resolution(resolve_rx, server, Duration::from_secs(1)).await;
    assert!(matches!(outcome, Err(Error::CallbackClosed)));
}

#[tokio::test]
async fn test_no_redirect_within_deadline_times_out() {
    let (resolve_tx, resolve_rx) = oneshot::channel::<plsearch::Result<String>>();
    let server = tokio::spawn(async {});

    let outcome = await_resolution(resolve_rx, server, Duration::from_millis(20)).await;
    assert!(matches!(outcome, Err(Error::AuthorizationTimeout)));
    drop(resolve_tx);
}

#[tokio::test]
async fn test_callback_rejects_state_mismatch() {
    let (state, mut resolve_rx, _shutdown_rx) = callback_state("xyz");

    let page = callback(
        Query(params(&[("code", "abc"), ("state", "forged")])),
        Extension(Arc::clone(&state)),
    )
    .await;
    assert!(page.0.contains("state mismatch"));

    let outcome = resolve_rx.try_recv().unwrap();
    assert!(matches!(outcome, Err(Error::StateMismatch)));
}

use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};

use crate::{
    error::{Error, Result},
    server::CallbackState,
};

/// Handles the single OAuth redirect from Spotify.
///
/// The first request takes the resolver and settles the listening flow;
/// any request after that gets a static page and cannot change the
/// already-resolved outcome. The shutdown signal is sent before returning,
/// but the stop is graceful so this response is still flushed to the
/// browser first.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<Arc<CallbackState>>,
) -> Html<&'static str> {
    let Some(resolver) = state.resolver.lock().await.take() else {
        return Html("<h4>Authorization already completed. You can close this window.</h4>");
    };

    let outcome = resolve_redirect(&params, &state.expected_state);
    let page = match &outcome {
        Ok(_) => Html("<h2>Authorization successful.</h2><p>You can close this browser window.</p>"),
        Err(Error::StateMismatch) => Html("<h4>Authorization failed: state mismatch.</h4>"),
        Err(_) => Html("<h4>Authorization failed.</h4>"),
    };

    let _ = resolver.send(outcome);
    if let Some(shutdown) = state.shutdown.lock().await.take() {
        let _ = shutdown.send(());
    }

    page
}

/// Validates the redirect's query parameters against the expected state.
///
/// An `error` parameter means the provider reported a failure or the user
/// declined. A missing or non-matching `state` is treated as a potential
/// CSRF attempt and never retried.
pub fn resolve_redirect(
    params: &HashMap<String, String>,
    expected_state: &str,
) -> Result<String> {
    if let Some(reason) = params.get("error") {
        return Err(Error::AuthorizationDenied(reason.clone()));
    }

    match params.get("state") {
        Some(state) if state == expected_state => {}
        _ => return Err(Error::StateMismatch),
    }

    params
        .get("code")
        .cloned()
        .ok_or_else(|| Error::AuthorizationDenied("missing authorization code".to_string()))
}

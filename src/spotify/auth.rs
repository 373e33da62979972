use chrono::Utc;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::{
    config,
    error::{Error, Result},
    management::TokenManager,
    server,
    session::SessionStatus,
    types::{PkceChallenge, Token},
    utils,
};

/// Outcome of a completed authorization: the code from the redirect plus
/// the verifier that must accompany it in the token exchange.
#[derive(Debug, Clone)]
pub struct Authorization {
    pub code: String,
    pub verifier: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: String,
    expires_in: i64,
}

#[derive(Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: String,
}

/// Runs the user-facing half of the PKCE flow.
///
/// Generates a fresh verifier/challenge pair and state token, opens the
/// authorization URL in the default browser and blocks on the one-shot
/// callback listener until the redirect arrives. The verifier is returned
/// alongside the code and discarded after the exchange; neither is
/// persisted.
///
/// Fails with `BrowserLaunch` if the browser cannot be opened, and with
/// whatever the listener resolves to otherwise (`AuthorizationDenied`,
/// `StateMismatch`, `PortUnavailable`, `AuthorizationTimeout`).
pub async fn begin_authorization() -> Result<Authorization> {
    let pkce = utils::generate_pkce();
    let state = utils::generate_state();
    let auth_url = build_authorize_url(&pkce, &state)?;

    if webbrowser::open(&auth_url).is_err() {
        return Err(Error::BrowserLaunch);
    }

    let code = server::wait_for_authorization(&state).await?;

    Ok(Authorization {
        code,
        verifier: pkce.verifier,
    })
}

/// Builds the authorize URL for one attempt. The query is serialized with
/// proper percent-encoding; the scope in particular is space-separated and
/// must not reach the browser raw.
pub fn build_authorize_url(pkce: &PkceChallenge, state: &str) -> Result<String> {
    let url = Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", config::spotify_client_id()),
            ("response_type", "code".to_string()),
            ("redirect_uri", config::spotify_redirect_uri()),
            ("state", state.to_string()),
            ("scope", config::spotify_scope()),
            ("code_challenge_method", PkceChallenge::METHOD.to_string()),
            ("code_challenge", pkce.challenge.clone()),
            ("show_dialog", "false".to_string()),
        ],
    )
    .map_err(|e| Error::Config(format!("invalid authorize URL: {}", e)))?;

    Ok(url.to_string())
}

/// Exchanges an authorization code for a token using the PKCE verifier.
///
/// The returned token's expiry is absolute: the request instant plus the
/// server-reported `expires_in`.
pub async fn exchange_code(client: &Client, code: &str, verifier: &str) -> Result<Token> {
    request_token(
        client,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &config::spotify_redirect_uri()),
            ("client_id", &config::spotify_client_id()),
            ("code_verifier", verifier),
        ],
    )
    .await
}

/// Exchanges a refresh token for a fresh token.
///
/// The full response is persisted by the caller as-is; refresh tokens may
/// rotate and the old one must never be reused.
pub async fn refresh(client: &Client, refresh_token: &str) -> Result<Token> {
    request_token(
        client,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &config::spotify_client_id()),
        ],
    )
    .await
}

/// Resolves a bearer token valid right now, refreshing once if the stored
/// one has expired.
///
/// This is the auth-or-proceed guard for authenticated operations: the
/// token is resolved once per logical operation (before any fan-out) and
/// passed explicitly into concurrent tasks. An unauthenticated session is
/// an error here; a fresh authorization must be initiated by the user via
/// `auth login`.
pub async fn ensure_access_token(tokens: &mut TokenManager, client: &Client) -> Result<String> {
    match tokens.status(Utc::now()) {
        SessionStatus::Authenticated => tokens.access_token(Utc::now()),
        SessionStatus::Expired => {
            let refresh_token = tokens.refresh_token()?;
            let token = refresh(client, &refresh_token).await?;
            tokens.write(&token).await?;
            Ok(token.access_token)
        }
        SessionStatus::Unauthenticated => Err(Error::NotAuthenticated),
    }
}

async fn request_token(client: &Client, form: &[(&str, &str)]) -> Result<Token> {
    let response = client
        .post(config::spotify_apitoken_url())
        .form(form)
        .send()
        .await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<TokenErrorResponse>(&body)
            .map(|e| {
                if e.error_description.is_empty() {
                    e.error
                } else {
                    format!("{}: {}", e.error, e.error_description)
                }
            })
            .unwrap_or_else(|_| "unknown error".to_string());

        return Err(Error::Provider {
            status: status.as_u16(),
            message,
        });
    }

    let payload: TokenResponse =
        serde_json::from_str(&body).map_err(|e| Error::TokenPayload(e.to_string()))?;

    Ok(Token::with_expiry(
        payload.access_token,
        payload.refresh_token,
        payload.expires_in,
        Utc::now(),
    ))
}

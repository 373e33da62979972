use chrono::Utc;
use reqwest::Client;
use serde_json::json;

use crate::{
    error, info,
    management::{CacheStore, KEY_USER_ID, TokenManager},
    session::{self, Effect, SessionEvent, SessionState},
    spotify, success,
    types::UserProfile,
};

/// Runs the login flow.
///
/// The session state machine decides each step; this runner only executes
/// the effects it emits (network calls, token writes) and feeds the
/// resulting events back in. A valid stored session short-circuits to the
/// profile fetch without starting a fresh authorization.
pub async fn login() {
    let store = match CacheStore::load().await {
        Ok(store) => store,
        Err(e) => error!("Cannot load cache store. Err: {}", e),
    };
    let mut tokens = TokenManager::new(store);
    let client = spotify::http_client();

    let mut profile: Option<UserProfile> = None;
    let mut was_authenticated = false;

    let mut state = SessionState::CheckingSession;
    let mut event: SessionEvent = tokens.status(Utc::now()).into();

    loop {
        let (next, effect) = session::step(state, event);
        state = next;

        match &state {
            SessionState::Ready => {
                let who = profile
                    .as_ref()
                    .map(describe_profile)
                    .unwrap_or_else(|| "unknown user".to_string());
                if was_authenticated {
                    info!("You are already logged in as {}", who);
                } else {
                    success!("Successfully logged in as {}", who);
                }
                return;
            }
            SessionState::Error(reason) => error!("{}", reason),
            SessionState::Authorizing => info!("Authorizing..."),
            SessionState::ExchangingCode => info!("Logging in..."),
            SessionState::Refreshing => info!("Refreshing token..."),
            SessionState::FetchingProfile => info!("Fetching user information..."),
            SessionState::AlreadyAuthenticated => was_authenticated = true,
            SessionState::CheckingSession => {}
        }

        let Some(effect) = effect else {
            error!("Authentication flow stalled in state {:?}", state);
        };

        event = run_effect(effect, &mut tokens, &client, &mut profile).await;
    }
}

/// Clears the stored token fields. Idempotent; logging out twice is fine.
pub async fn logout() {
    let store = match CacheStore::load().await {
        Ok(store) => store,
        Err(e) => error!("Cannot load cache store. Err: {}", e),
    };
    let mut tokens = TokenManager::new(store);

    match tokens.clear().await {
        Ok(()) => success!("Logged out."),
        Err(e) => error!("Failed to clear session. Err: {}", e),
    }
}

async fn run_effect(
    effect: Effect,
    tokens: &mut TokenManager,
    client: &Client,
    profile: &mut Option<UserProfile>,
) -> SessionEvent {
    match effect {
        Effect::BeginAuthorization => match spotify::auth::begin_authorization().await {
            Ok(authorization) => SessionEvent::Authorized {
                code: authorization.code,
                verifier: authorization.verifier,
            },
            Err(e) => SessionEvent::Failed(e.to_string()),
        },

        Effect::ExchangeCode { code, verifier } => {
            match spotify::auth::exchange_code(client, &code, &verifier).await {
                Ok(token) => match tokens.write(&token).await {
                    Ok(()) => SessionEvent::LoggedIn,
                    Err(e) => SessionEvent::Failed(e.to_string()),
                },
                Err(e) => SessionEvent::Failed(e.to_string()),
            }
        }

        Effect::Refresh => {
            let refresh_token = match tokens.refresh_token() {
                Ok(token) => token,
                Err(e) => return SessionEvent::Failed(e.to_string()),
            };
            match spotify::auth::refresh(client, &refresh_token).await {
                Ok(token) => match tokens.write(&token).await {
                    Ok(()) => SessionEvent::LoggedIn,
                    Err(e) => SessionEvent::Failed(e.to_string()),
                },
                Err(e) => SessionEvent::Failed(e.to_string()),
            }
        }

        Effect::FetchProfile => {
            let access_token = match tokens.access_token(Utc::now()) {
                Ok(token) => token,
                Err(e) => return SessionEvent::Failed(e.to_string()),
            };
            match spotify::account::get_profile(client, &access_token).await {
                Ok(user) => {
                    tokens.store_mut().set(KEY_USER_ID, json!(user.id));
                    if let Err(e) = tokens.store().flush().await {
                        return SessionEvent::Failed(e.to_string());
                    }
                    *profile = Some(user);
                    SessionEvent::ProfileFetched
                }
                Err(e) => SessionEvent::Failed(e.to_string()),
            }
        }
    }
}

fn describe_profile(profile: &UserProfile) -> String {
    let name = profile
        .display_name
        .clone()
        .unwrap_or_else(|| profile.id.clone());
    match &profile.email {
        Some(email) => format!("{} ({})", name, email),
        None => name,
    }
}

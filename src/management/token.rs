use chrono::{DateTime, Utc};
use serde_json::json;

use crate::{
    error::{Error, Result},
    management::CacheStore,
    session::SessionStatus,
    types::Token,
};

pub const KEY_TOKEN: &str = "token";
pub const KEY_REFRESH_TOKEN: &str = "refresh_token";
pub const KEY_TOKEN_EXPIRATION: &str = "token_expiration";

/// Owner of the stored token fields.
///
/// Single-writer: only the authorization flow mutates the token (after a
/// successful exchange or refresh, or on logout); everything else reads a
/// snapshot through [`TokenManager::token`] or
/// [`TokenManager::access_token`].
pub struct TokenManager {
    store: CacheStore,
}

impl TokenManager {
    pub fn new(store: CacheStore) -> Self {
        TokenManager { store }
    }

    /// Returns the stored token, or `None` if no access token is present.
    pub fn token(&self) -> Option<Token> {
        let access_token = self.store.get_string(KEY_TOKEN).unwrap_or_default();
        if access_token.is_empty() {
            return None;
        }

        Some(Token {
            access_token,
            refresh_token: self.store.get_string(KEY_REFRESH_TOKEN).unwrap_or_default(),
            expires_at: self
                .store
                .get(KEY_TOKEN_EXPIRATION)
                .and_then(|v| v.as_i64())
                .unwrap_or(0),
        })
    }

    /// Derives the session status at the query instant `now`.
    ///
    /// A token is `Authenticated` strictly before its expiry instant and
    /// `Expired` from that instant on.
    pub fn status(&self, now: DateTime<Utc>) -> SessionStatus {
        match self.token() {
            None => SessionStatus::Unauthenticated,
            Some(token) if now.timestamp() < token.expires_at => SessionStatus::Authenticated,
            Some(_) => SessionStatus::Expired,
        }
    }

    /// Persists a freshly exchanged or refreshed token.
    ///
    /// Always stores whatever the provider returned; refresh tokens rotate
    /// and the old one must not be reused.
    pub async fn write(&mut self, token: &Token) -> Result<()> {
        self.store.set(KEY_TOKEN, json!(token.access_token));
        self.store
            .set(KEY_REFRESH_TOKEN, json!(token.refresh_token));
        self.store
            .set(KEY_TOKEN_EXPIRATION, json!(token.expires_at));
        self.store.flush().await
    }

    /// Clears all token fields. Idempotent; clearing an empty store is fine.
    pub async fn clear(&mut self) -> Result<()> {
        self.store.set(KEY_TOKEN, json!(""));
        self.store.set(KEY_REFRESH_TOKEN, json!(""));
        self.store.set(KEY_TOKEN_EXPIRATION, json!(0));
        self.store.flush().await
    }

    /// Returns a bearer token valid at `now`, for use by authenticated API
    /// calls. Resolved once per logical operation and passed explicitly into
    /// concurrent tasks, not re-read per request.
    pub fn access_token(&self, now: DateTime<Utc>) -> Result<String> {
        match self.status(now) {
            SessionStatus::Unauthenticated => Err(Error::NotAuthenticated),
            SessionStatus::Expired => Err(Error::TokenExpired),
            SessionStatus::Authenticated => Ok(self
                .token()
                .map(|t| t.access_token)
                .unwrap_or_default()),
        }
    }

    /// Returns the stored refresh token, failing when none is present.
    pub fn refresh_token(&self) -> Result<String> {
        let refresh = self.store.get_string(KEY_REFRESH_TOKEN).unwrap_or_default();
        if refresh.is_empty() {
            Err(Error::NotAuthenticated)
        } else {
            Ok(refresh)
        }
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut CacheStore {
        &mut self.store
    }
}

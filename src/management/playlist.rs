use serde_json::json;

use crate::{
    error::Result,
    management::CacheStore,
    types::PlaylistSummary,
};

pub const KEY_PLAYLISTS: &str = "playlists";
pub const KEY_USER_ID: &str = "user_id";

/// Cached playlist listing, persisted under the `playlists` key so that a
/// search can resolve a small index without hitting the API again.
pub struct PlaylistManager {
    store: CacheStore,
}

impl PlaylistManager {
    pub fn new(store: CacheStore) -> Self {
        PlaylistManager { store }
    }

    /// Returns the cached listing; empty if nothing was cached yet or the
    /// cached value doesn't decode.
    pub fn cached(&self) -> Vec<PlaylistSummary> {
        self.store
            .get(KEY_PLAYLISTS)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }

    /// Resolves a listing index against the cache.
    pub fn resolve(&self, index: usize) -> Option<PlaylistSummary> {
        self.cached().into_iter().nth(index)
    }

    pub async fn store_listing(&mut self, playlists: &[PlaylistSummary]) -> Result<()> {
        self.store.set(KEY_PLAYLISTS, json!(playlists));
        self.store.flush().await
    }

    pub fn user_id(&self) -> Option<String> {
        self.store.get_string(KEY_USER_ID)
    }
}

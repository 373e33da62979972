mod playlist;
mod store;
mod token;

pub use playlist::{KEY_PLAYLISTS, KEY_USER_ID, PlaylistManager};
pub use store::CacheStore;
pub use token::{KEY_REFRESH_TOKEN, KEY_TOKEN, KEY_TOKEN_EXPIRATION, TokenManager};

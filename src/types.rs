use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// PKCE verifier/challenge pair for a single authorization attempt.
///
/// The challenge method is always `S256`; see [`PkceChallenge::METHOD`].
#[derive(Debug, Clone)]
pub struct PkceChallenge {
    pub verifier: String,
    pub challenge: String,
}

impl PkceChallenge {
    pub const METHOD: &'static str = "S256";
}

/// A stored access/refresh token pair.
///
/// `expires_at` is an absolute unix instant, computed once at request time
/// from the server-reported `expires_in`. It is never stored as a bare
/// duration, so re-reading it later cannot drift with the clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

impl Token {
    /// Builds a token from a provider response received at `obtained_at`.
    pub fn with_expiry(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        obtained_at: DateTime<Utc>,
    ) -> Self {
        Token {
            access_token,
            refresh_token,
            expires_at: obtained_at.timestamp() + expires_in,
        }
    }
}

/// A playlist resolved for searching: remote id plus its total track count,
/// which drives the page plan. Owner id and the collaborative flag are kept
/// so the cached listing can be filtered for display without refetching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub track_total: u64,
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistsResponse {
    pub items: Vec<RemotePlaylist>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemotePlaylist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub collaborative: bool,
    pub owner: PlaylistOwner,
    pub tracks: PlaylistTracksInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksInfo {
    pub total: u64,
}

impl RemotePlaylist {
    pub fn summary(&self) -> PlaylistSummary {
        PlaylistSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            track_total: self.tracks.total,
            owner_id: self.owner.id.clone(),
            collaborative: self.collaborative,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracksResponse {
    pub items: Vec<PlaylistTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub track: TrackInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackInfo {
    pub id: Option<String>,
    pub name: String,
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

/// A track that matched the search term.
///
/// `position` is the 1-based index within the playlist, stable across pages
/// regardless of which page fetch finished first. `artists` is the artist
/// names joined with `", "` as used for both scoring and display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackCandidate {
    pub position: u64,
    pub name: String,
    pub artists: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    #[tabled(rename = "Playlist ID")]
    pub id: usize,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Total Tracks")]
    pub tracks: u64,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: u64,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Artists")]
    pub artists: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

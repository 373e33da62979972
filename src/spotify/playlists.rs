use std::{future::Future, sync::Arc};

use reqwest::Client;
use tokio::sync::Semaphore;

use crate::{
    config,
    error::{Error, Result},
    management::PlaylistManager,
    search, spotify,
    types::{PlaylistSummary, PlaylistTrack, PlaylistsResponse, TrackCandidate, TracksResponse},
};

/// Page size for playlist listing and track fetches.
pub const PAGE_LIMIT: u64 = 50;

/// Cap on concurrently in-flight page fetches during a search.
const MAX_IN_FLIGHT_PAGES: usize = 8;

/// Fetches the user's complete playlist listing, following `next` page
/// URLs until exhausted.
pub async fn fetch_all_playlists(client: &Client, token: &str) -> Result<Vec<PlaylistSummary>> {
    let mut playlists = Vec::new();
    let mut url = Some(format!(
        "{}/me/playlists?limit={}",
        config::spotify_apiurl(),
        PAGE_LIMIT
    ));

    while let Some(page_url) = url {
        let page: PlaylistsResponse = spotify::get_json(client, token, &page_url).await?;
        playlists.extend(page.items.iter().map(|p| p.summary()));
        url = page.next;
    }

    Ok(playlists)
}

/// Looks up a single playlist by its position in the remote listing.
///
/// Used when the requested index is outside the cached listing. Fails with
/// `PlaylistNotFound` when the remote reports no item at that offset.
pub async fn playlist_at_offset(
    client: &Client,
    token: &str,
    offset: usize,
) -> Result<PlaylistSummary> {
    let url = format!(
        "{}/me/playlists?limit=1&offset={}",
        config::spotify_apiurl(),
        offset
    );
    let page: PlaylistsResponse = spotify::get_json(client, token, &url).await?;

    page.items
        .first()
        .map(|p| p.summary())
        .ok_or_else(|| Error::PlaylistNotFound(offset.to_string()))
}

/// Resolves a playlist reference (a listing index) to a summary: cached
/// listing first, remote offset lookup otherwise.
pub async fn resolve_playlist(
    manager: &PlaylistManager,
    client: &Client,
    token: &str,
    index: usize,
) -> Result<PlaylistSummary> {
    if let Some(summary) = manager.resolve(index) {
        return Ok(summary);
    }

    playlist_at_offset(client, token, index).await
}

/// Fetches one page of a playlist's tracks.
///
/// The field projection keeps the payload down to track id/name and artist
/// id/name.
pub async fn fetch_tracks_page(
    client: &Client,
    token: &str,
    playlist_id: &str,
    offset: u64,
) -> Result<Vec<PlaylistTrack>> {
    let url = format!(
        "{api}/playlists/{id}/tracks?limit={limit}&offset={offset}&fields=items(track(name,id,artists(name,id)))",
        api = config::spotify_apiurl(),
        id = playlist_id,
        limit = PAGE_LIMIT,
        offset = offset,
    );

    let page: TracksResponse = spotify::get_json(client, token, &url).await?;
    Ok(page.items)
}

/// Searches a playlist's tracks for `term`, fanning out one fetch task per
/// page and joining in page order.
///
/// The token is resolved once by the caller and moved into every page task;
/// tasks never re-read shared session state. In-flight fetches are bounded
/// by a semaphore. Each task scores its own page, and partial results are
/// concatenated in page order (not completion order), so the output is
/// sorted by playlist position and deterministic regardless of network
/// timing.
pub async fn search_tracks(
    client: &Client,
    token: &str,
    playlist: &PlaylistSummary,
    term: &str,
) -> Result<Vec<TrackCandidate>> {
    let client = client.clone();
    let token = token.to_string();

    search_tracks_with(playlist, term, move |playlist_id, offset| {
        let client = client.clone();
        let token = token.clone();
        async move { fetch_tracks_page(&client, &token, &playlist_id, offset).await }
    })
    .await
}

/// Fan-out/fan-in core of [`search_tracks`] with the page fetch injected,
/// so the ordering guarantee holds for any fetch implementation.
pub async fn search_tracks_with<F, Fut>(
    playlist: &PlaylistSummary,
    term: &str,
    fetch_page: F,
) -> Result<Vec<TrackCandidate>>
where
    F: Fn(String, u64) -> Fut + Clone + Send + 'static,
    Fut: Future<Output = Result<Vec<PlaylistTrack>>> + Send + 'static,
{
    let term = term.to_lowercase();
    let offsets = search::page_offsets(playlist.track_total, PAGE_LIMIT);
    let semaphore = Arc::new(Semaphore::new(MAX_IN_FLIGHT_PAGES));

    let mut handles = Vec::with_capacity(offsets.len());
    for offset in offsets {
        let fetch_page = fetch_page.clone();
        let playlist_id = playlist.id.clone();
        let term = term.clone();
        let semaphore = Arc::clone(&semaphore);

        handles.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("semaphore never closed");
            let tracks = fetch_page(playlist_id, offset).await?;
            Ok::<_, Error>(search::score_page(&tracks, &term, offset))
        }));
    }

    // Join barrier: collect per-page results in page order.
    let mut results = Vec::new();
    for handle in handles {
        results.extend(handle.await??);
    }

    Ok(results)
}

use tabled::Table;

use crate::{
    cli::spinner,
    error, info,
    management::{CacheStore, PlaylistManager, TokenManager},
    spotify,
    types::{PlaylistTableRow, TrackTableRow},
    warning,
};

/// Fetches the complete playlist listing, caches it, and renders the
/// user's own and collaborative playlists as an indexed table.
///
/// The index column is the position in the cached (unfiltered) listing and
/// is what `playlist search` accepts as a playlist reference.
pub async fn list_playlists() {
    let mut tokens = match load_tokens().await {
        Ok(tokens) => tokens,
        Err(e) => error!("Cannot load cache store. Err: {}", e),
    };
    let client = spotify::http_client();

    let token = match spotify::auth::ensure_access_token(&mut tokens, &client).await {
        Ok(token) => token,
        Err(e) => error!("{}", e),
    };

    let pb = spinner("Fetching playlists...");
    let playlists = match spotify::playlists::fetch_all_playlists(&client, &token).await {
        Ok(playlists) => {
            pb.finish_and_clear();
            playlists
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch playlists. Err: {}", e);
        }
    };

    let store = match CacheStore::load().await {
        Ok(store) => store,
        Err(e) => error!("Cannot load cache store. Err: {}", e),
    };
    let mut manager = PlaylistManager::new(store);
    if let Err(e) = manager.store_listing(&playlists).await {
        warning!("Failed to cache playlists: {}", e);
    }

    let user_id = manager.user_id().unwrap_or_default();
    let rows: Vec<PlaylistTableRow> = playlists
        .iter()
        .enumerate()
        .filter(|(_, p)| p.owner_id == user_id || p.collaborative)
        .map(|(index, p)| PlaylistTableRow {
            id: index,
            name: p.name.clone(),
            tracks: p.track_total,
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
}

/// Searches one playlist's tracks for a fuzzy term match.
///
/// Resolves the playlist reference (cached index, else remote offset
/// lookup), fans out the page fetches and prints the matches in playlist
/// order.
pub async fn search_playlist(playlist: usize, term: String) {
    if !is_search_term_valid(&term) {
        error!("The search term must be at least 3 characters (excluding white spaces)");
    }

    let mut tokens = match load_tokens().await {
        Ok(tokens) => tokens,
        Err(e) => error!("Cannot load cache store. Err: {}", e),
    };
    let client = spotify::http_client();

    let token = match spotify::auth::ensure_access_token(&mut tokens, &client).await {
        Ok(token) => token,
        Err(e) => error!("{}", e),
    };

    let store = match CacheStore::load().await {
        Ok(store) => store,
        Err(e) => error!("Cannot load cache store. Err: {}", e),
    };
    let manager = PlaylistManager::new(store);

    let summary =
        match spotify::playlists::resolve_playlist(&manager, &client, &token, playlist).await {
            Ok(summary) => summary,
            Err(e) => error!("{}", e),
        };

    let pb = spinner("Searching...");
    let matches = match spotify::playlists::search_tracks(&client, &token, &summary, &term).await {
        Ok(matches) => {
            pb.finish_and_clear();
            matches
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Search failed. Err: {}", e);
        }
    };

    if matches.is_empty() {
        info!("No tracks in {} matched '{}'", summary.name, term);
        return;
    }

    let rows: Vec<TrackTableRow> = matches
        .into_iter()
        .map(|candidate| TrackTableRow {
            position: candidate.position,
            name: candidate.name,
            artists: candidate.artists,
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
}

async fn load_tokens() -> crate::error::Result<TokenManager> {
    let store = CacheStore::load().await?;
    Ok(TokenManager::new(store))
}

fn is_search_term_valid(term: &str) -> bool {
    term.chars().filter(|c| !c.is_whitespace()).count() >= 3
}

#[cfg(test)]
mod tests {
    use super::is_search_term_valid;

    #[test]
    fn test_search_term_minimum_length() {
        // Three non-whitespace characters are enough
        assert!(is_search_term_valid("abc"));
        assert!(is_search_term_valid(" a b c "));
        assert!(is_search_term_valid("abcd"));

        assert!(!is_search_term_valid("ab"));
        assert!(!is_search_term_valid("  a  b  "));
        assert!(!is_search_term_valid(""));
    }
}

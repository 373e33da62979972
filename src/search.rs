//! Pure fuzzy-match scoring over track candidates.
//!
//! A track matches a term when the term appears as an ordered (not
//! necessarily contiguous) character subsequence of the candidate, or when
//! the Jaro-Winkler similarity strictly exceeds [`SIMILARITY_THRESHOLD`].
//! The two criteria are independent; either alone is a hit, which trades
//! precision for recall so that both substring typos and partial matches
//! surface. No network or storage access happens here.

use crate::types::{PlaylistTrack, TrackCandidate};

/// Jaro-Winkler score above which a candidate counts as a match.
pub const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Returns true if the characters of `term` appear in order within
/// `candidate`. Comparison is case-sensitive; callers lower-case both sides.
pub fn subsequence(term: &str, candidate: &str) -> bool {
    let mut chars = term.chars().peekable();
    for c in candidate.chars() {
        match chars.peek() {
            Some(&next) if next == c => {
                chars.next();
            }
            Some(_) => {}
            None => return true,
        }
    }
    chars.peek().is_none()
}

/// Jaro-Winkler similarity between `term` and `candidate` in `[0, 1]`.
pub fn similarity(term: &str, candidate: &str) -> f64 {
    strsim::jaro_winkler(term, candidate)
}

/// Case-insensitive match verdict for a single candidate string.
pub fn is_match(term: &str, candidate: &str) -> bool {
    let term = term.to_lowercase();
    let candidate = candidate.to_lowercase();

    subsequence(&term, &candidate) || similarity(&term, &candidate) > SIMILARITY_THRESHOLD
}

/// Scores one fetched page of tracks against `term`.
///
/// `offset` is the page's global offset within the playlist; each matched
/// track gets the 1-based position `offset + index + 1`, so concatenating
/// page results in page order yields output sorted by playlist position.
/// A track matches when its name or its joined artist string matches.
pub fn score_page(tracks: &[PlaylistTrack], term: &str, offset: u64) -> Vec<TrackCandidate> {
    tracks
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let artists = item
                .track
                .artists
                .iter()
                .map(|artist| artist.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");

            if is_match(term, &item.track.name) || is_match(term, &artists) {
                Some(TrackCandidate {
                    position: offset + i as u64 + 1,
                    name: item.track.name.clone(),
                    artists,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Computes the page plan for a playlist: one offset per page of
/// `page_limit` tracks, covering `track_total` tracks.
pub fn page_offsets(track_total: u64, page_limit: u64) -> Vec<u64> {
    let pages = track_total.div_ceil(page_limit);
    (0..pages).map(|page| page * page_limit).collect()
}

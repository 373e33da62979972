use std::time::Duration;

use plsearch::search::*;
use plsearch::spotify::playlists::search_tracks_with;
use plsearch::types::{PlaylistSummary, PlaylistTrack, TrackArtist, TrackInfo};

// Helper function to create a test track
fn create_test_track(name: &str, artists: &[&str]) -> PlaylistTrack {
    PlaylistTrack {
        track: TrackInfo {
            id: Some(format!("{}_id", name)),
            name: name.to_string(),
            artists: artists
                .iter()
                .map(|a| TrackArtist {
                    name: a.to_string(),
                })
                .collect(),
        },
    }
}

#[test]
fn test_subsequence_matches_ordered_characters() {
    assert!(subsequence("linkin", "blink-182 ft. linkin park"));
    assert!(subsequence("lkp", "linkin park"));
    assert!(subsequence("", "anything"));

    // Characters present but out of order should not match
    assert!(!subsequence("park linkin", "linkin park"));

    // Characters absent from the candidate should not match
    assert!(!subsequence("xyz123notpresent", "blink-182 ft. linkin park"));

    // Empty candidate only matches the empty term
    assert!(subsequence("", ""));
    assert!(!subsequence("a", ""));
}

#[test]
fn test_similarity_threshold() {
    // A near-typo should clear the 0.8 threshold
    assert!(similarity("two hearts", "too hearts") > SIMILARITY_THRESHOLD);

    // Identical strings are a perfect score
    assert_eq!(similarity("linkin park", "linkin park"), 1.0);

    // An unrelated string stays at or below the threshold
    assert!(similarity("xyz123notpresent", "two hearts") <= SIMILARITY_THRESHOLD);
}

#[test]
fn test_is_match_either_criterion_suffices() {
    // Subsequence hit, similarity low
    assert!(is_match("linkin", "blink-182 ft. linkin park"));

    // Similarity hit, not a subsequence
    assert!(is_match("two hearts", "too hearts"));

    // Neither criterion
    assert!(!is_match("xyz123notpresent", "too hearts"));
}

#[test]
fn test_is_match_is_case_insensitive() {
    assert!(is_match("LINKIN", "Blink-182 ft. Linkin Park"));
    assert!(is_match("linkin", "LINKIN PARK"));
}

#[test]
fn test_page_offsets() {
    // 125 tracks at 50 per page -> exactly 3 pages at offsets 0/50/100
    assert_eq!(page_offsets(125, 50), vec![0, 50, 100]);

    // Exact multiple does not produce a trailing empty page
    assert_eq!(page_offsets(100, 50), vec![0, 50]);

    // Small and empty playlists
    assert_eq!(page_offsets(10, 50), vec![0]);
    assert_eq!(page_offsets(0, 50), Vec::<u64>::new());
}

#[test]
fn test_score_page_positions_and_filtering() {
    let tracks = vec![
        create_test_track("In the End", &["Linkin Park"]),
        create_test_track("Two Hearts", &["Phil Collins"]),
        create_test_track("Numb", &["Linkin Park"]),
    ];

    // Page starting at offset 50: positions are 51..53
    let matches = score_page(&tracks, "linkin", 50);

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].position, 51);
    assert_eq!(matches[0].name, "In the End");
    assert_eq!(matches[0].artists, "Linkin Park");
    assert_eq!(matches[1].position, 53);
    assert_eq!(matches[1].name, "Numb");
}

#[test]
fn test_score_page_matches_on_name_or_artists() {
    let tracks = vec![
        create_test_track("Linkin Something", &["Nobody"]),
        create_test_track("Unrelated", &["Linkin Park", "Jay-Z"]),
        create_test_track("Unrelated Too", &["Nobody Else"]),
    ];

    let matches = score_page(&tracks, "linkin", 0);

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].position, 1);
    // Artists are joined with ", " for scoring and display
    assert_eq!(matches[1].artists, "Linkin Park, Jay-Z");
}

#[tokio::test]
async fn test_aggregated_results_stay_in_playlist_order_with_slow_early_pages() {
    let playlist = PlaylistSummary {
        id: "pl1".to_string(),
        name: "Mix".to_string(),
        track_total: 150,
        owner_id: String::new(),
        collaborative: false,
    };

    // Earlier pages finish last (offsets 0/50/100 sleep 40/30/20 ms), so
    // completion order is the reverse of page order.
    let matches = search_tracks_with(&playlist, "linkin", |_, offset| async move {
        tokio::time::sleep(Duration::from_millis(40 - offset / 5)).await;
        Ok((0..3)
            .map(|i| create_test_track(&format!("linkin {}", offset + i), &["x"]))
            .collect())
    })
    .await
    .unwrap();

    let positions: Vec<u64> = matches.iter().map(|m| m.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 51, 52, 53, 101, 102, 103]);
}

#[test]
fn test_score_page_preserves_page_order() {
    let tracks: Vec<PlaylistTrack> = (0..5)
        .map(|i| create_test_track(&format!("linkin {}", i), &["x"]))
        .collect();

    let matches = score_page(&tracks, "linkin", 100);
    let positions: Vec<u64> = matches.iter().map(|m| m.position).collect();
    assert_eq!(positions, vec![101, 102, 103, 104, 105]);
}

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use plsearch::utils::*;
use sha2::{Digest, Sha256};

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should stay within the PKCE 43-128 character bound
    assert!(verifier.len() >= 43 && verifier.len() <= 128);
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Challenge is the URL-safe unpadded base64 of SHA256(verifier)
    let expected = URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()));
    assert_eq!(challenge, expected);

    // Deterministic - same input produces same output
    assert_eq!(challenge, generate_code_challenge(verifier));

    // Different input should produce different output
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // URL-safe alphabet, no padding
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
    assert!(!challenge.contains('='));
}

#[test]
fn test_generate_pkce_pair_is_consistent() {
    let pkce = generate_pkce();
    assert_eq!(pkce.challenge, generate_code_challenge(&pkce.verifier));
}

#[test]
fn test_authorize_url_is_fully_encoded() {
    let pkce = generate_pkce();
    let state = generate_state();
    let url = plsearch::spotify::auth::build_authorize_url(&pkce, &state).unwrap();

    // The default scope is space-separated; a raw space would truncate the
    // URL in many handlers before it reaches the accounts service.
    assert!(!url.contains(' '));
    assert!(url.contains("playlist-read-private"));

    assert!(url.contains(&format!("code_challenge={}", pkce.challenge)));
    assert!(url.contains("code_challenge_method=S256"));
    assert!(url.contains(&format!("state={}", state)));
    assert!(url.contains("response_type=code"));
}

#[test]
fn test_generate_state() {
    let state = generate_state();

    // Exactly 15 characters, every one from the declared alphabet
    assert_eq!(state.len(), STATE_LENGTH);
    assert!(
        state
            .chars()
            .all(|c| STATE_ALPHABET.contains(&(c as u8)))
    );

    // Two generated states should differ
    let state2 = generate_state();
    assert_ne!(state, state2);
}

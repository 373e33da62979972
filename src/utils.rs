use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::PkceChallenge;

/// Alphabet for anti-CSRF state tokens: alphanumerics plus `-` and `_`.
pub const STATE_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-_";

/// Number of characters in a generated state token.
pub const STATE_LENGTH: usize = 15;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Generates a fresh PKCE verifier/challenge pair for one authorization
/// attempt. The pair is never persisted and is discarded after the token
/// exchange.
pub fn generate_pkce() -> PkceChallenge {
    let verifier = generate_code_verifier();
    let challenge = generate_code_challenge(&verifier);
    PkceChallenge {
        verifier,
        challenge,
    }
}

/// Generates a random 15-character state token over [`STATE_ALPHABET`].
///
/// The value binds the outgoing authorize request to the inbound redirect.
/// Collisions across attempts are not checked.
pub fn generate_state() -> String {
    let mut rng = rand::rng();
    (0..STATE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..STATE_ALPHABET.len());
            STATE_ALPHABET[idx] as char
        })
        .collect()
}

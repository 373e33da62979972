use reqwest::Client;

use crate::{config, error::Result, spotify, types::UserProfile};

/// Fetches the authenticated user's profile.
pub async fn get_profile(client: &Client, token: &str) -> Result<UserProfile> {
    let url = format!("{}/me", config::spotify_apiurl());
    spotify::get_json(client, token, &url).await
}

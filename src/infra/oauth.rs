use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

const AUTHORIZE_URL: &str = "https://anilist.co/api/v2/oauth/authorize";
const TOKEN_URL: &str = "https://anilist.co/api/v2/oauth/token";
const PIN_REDIRECT_URI: &str = "https://anilist.co/api/v2/oauth/pin";

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    code: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Page the user opens to approve the client and obtain a one-time code.
pub fn authorize_url(client_id: &str) -> String {
    format!("{AUTHORIZE_URL}?client_id={client_id}&response_type=code")
}

/// Trades an authorization code for a long-lived access token.
pub fn exchange_code(client_id: &str, client_secret: &str, code: &str) -> Result<String> {
    let body = serde_json::to_string(&TokenRequest {
        grant_type: "authorization_code",
        client_id,
        client_secret,
        redirect_uri: PIN_REDIRECT_URI,
        code,
    })?;

    let client = reqwest::blocking::Client::new();
    let response = client
        .post(TOKEN_URL)
        .header("Content-Type", "application/json")
        .header("Accept", "application/json")
        .body(body)
        .send()
        .context("AniList token request failed")?;

    let status = response.status();
    let text = response.text()?;
    debug!(%status, "token exchange answered");

    if !status.is_success() {
        bail!("AniList token exchange failed: HTTP {status}\nResponse from AniList: {text}");
    }

    let token: TokenResponse =
        serde_json::from_str(&text).context("Failed to parse AniList token response")?;
    Ok(token.access_token)
}

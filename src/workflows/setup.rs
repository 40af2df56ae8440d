use anyhow::{bail, Result};
use rustyline::DefaultEditor;
use std::path::Path;

use crate::config::{self, Config};
use crate::infra::anilist::{AniListClient, Reply};
use crate::infra::oauth;
use crate::infra::transport::Transport;

/// Interactive authorization-code flow; stores the resulting token in `config_path`.
pub fn login(config: &Config, config_path: &Path) -> Result<()> {
    let (client_id, client_secret) = config.require_client()?;

    println!("--- AniList Token Generation ---");
    println!("\nStep 1: Open the following URL in your browser to authorize the application:");
    println!("\n{}\n", oauth::authorize_url(client_id));
    println!("After authorizing, you will be redirected to a page with a long code (PIN).");

    println!("Step 2: Paste the entire authorization code here and press Enter:");
    let input = DefaultEditor::new()?.readline("> ")?;
    let code = input.trim();
    if code.is_empty() {
        bail!("Authorization code cannot be empty.");
    }

    println!("\nStep 3: Requesting the access token from AniList...");
    let token = oauth::exchange_code(client_id, client_secret, code)?;
    config::store_token(config_path, &token)?;

    println!("\nSuccess! Your access token has been saved to {}.", config_path.display());
    Ok(())
}

/// Confirms the stored token is accepted by asking AniList who we are.
pub fn check<T: Transport>(client: &AniListClient<T>) -> Result<String> {
    println!("Attempting to connect to AniList API...");
    match client.viewer() {
        Ok(Reply::Data(viewer)) => {
            println!("Connected to AniList as: {} (ID: {})", viewer.name, viewer.id);
            Ok(viewer.name)
        }
        Ok(Reply::Errors(errors)) => {
            let message = errors.first().map(String::as_str).unwrap_or("Unknown error.");
            bail!("AniList returned an error; the token is likely invalid or expired. API message: {message}")
        }
        Err(e) if e.is_unauthorized() => {
            bail!("401 Unauthorized: the token is incorrect, expired, or revoked.")
        }
        Err(e) => bail!("Could not connect to AniList: {e}"),
    }
}

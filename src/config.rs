use anyhow::bail;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;

pub const DEFAULT_ENDPOINT: &str = "https://graphql.anilist.co";

const TOKEN_ENV: &str = "ANILIST_TOKEN";
const ENDPOINT_ENV: &str = "ANILIST_ENDPOINT";
const MIN_TOKEN_LEN: usize = 100;

#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
pub struct Config {
    pub token: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl Config {
    /// Reads the config file (if any) and applies environment overrides.
    pub fn load() -> Result<Self> {
        let config = Self::from_path(&get_config_path())?;
        Ok(config.with_env(|key| env::var(key).ok()))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(token) = lookup(TOKEN_ENV) {
            self.token = Some(token);
        }
        if let Some(endpoint) = lookup(ENDPOINT_ENV) {
            self.endpoint = Some(endpoint);
        }
        self
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn require_token(&self) -> Result<&str> {
        match self.token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token),
            _ => bail!(
                "AniList token not found. Set {TOKEN_ENV} or run `anilist-sync login` to store one in {}",
                get_config_path().display()
            ),
        }
    }

    pub fn require_client(&self) -> Result<(&str, &str)> {
        let (Some(id), Some(secret)) = (self.client_id.as_deref(), self.client_secret.as_deref())
        else {
            bail!(
                "client_id and client_secret must be set in {} before logging in",
                get_config_path().display()
            );
        };
        if id.contains("YOUR_CLIENT") || secret.contains("YOUR_CLIENT") {
            bail!("client_id and client_secret still hold placeholder values");
        }
        Ok((id, secret))
    }
}

/// Rejects tokens that are obviously not a real AniList access token.
pub fn check_token_shape(token: &str) -> Result<()> {
    if token.contains("YOUR_ANILIST_TOKEN") || token.len() < MIN_TOKEN_LEN {
        bail!("The stored token looks like a placeholder or is too short. Run `anilist-sync login` first.");
    }
    Ok(())
}

/// Writes `token` into the config file, keeping every other key as it was.
pub fn store_token(path: &Path, token: &str) -> Result<()> {
    let mut table = if path.exists() {
        fs::read_to_string(path)?
            .parse::<toml::Table>()
            .with_context(|| format!("Invalid config file {}", path.display()))?
    } else {
        toml::Table::new()
    };
    table.insert("token".to_string(), toml::Value::String(token.to_string()));

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    // The file holds secrets: write a private temp file, then swap it in.
    let mut file = NamedTempFile::new_in(dir)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(toml::to_string(&table)?.as_bytes())?;
    file.flush()?;
    file.persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn get_config_dir_path() -> PathBuf {
    xdir::config()
        .map(|path| path.join("anilist-sync"))
        // If the standard path could not be found (e.g.`$HOME` is not set),
        // default to the current directory.
        .unwrap_or_default()
}

pub fn get_config_path() -> PathBuf {
    get_config_dir_path().join("config.toml")
}

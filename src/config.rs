//! Configuration management for plistkit.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Endpoints fall back to the public
//! Spotify URLs; the credentials needed for the browser authorization flow
//! have no default and are reported as configuration errors when missing.

use std::{env, path::PathBuf, time::Duration};

use crate::error::{Error, Result};

/// Maximum number of items the Spotify API accepts per playlist write.
pub const MAX_ITEMS_PER_CALL: usize = 100;

/// Number of items requested per page when listing collections.
pub const PAGE_LIMIT: u32 = 50;

const DEFAULT_BATCH_SIZE: usize = 50;
const DEFAULT_PACING_MS: u64 = 500;

const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_SCOPE: &str =
    "user-library-read playlist-read-private playlist-modify-public playlist-modify-private";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is looked up under `plistkit/.env`:
/// - Linux: `~/.local/share/plistkit/.env`
/// - macOS: `~/Library/Application Support/plistkit/.env`
/// - Windows: `%LOCALAPPDATA%/plistkit/.env`
///
/// Variables already present in the process environment take precedence.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// read or parsed.
pub async fn load_env() -> Result<()> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("plistkit/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    dotenv::from_path(&path)
        .map_err(|e| Error::Configuration(format!("{}: {}", path.display(), e)))
}

fn required(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Configuration(format!("{} must be set", name))),
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Address the local OAuth callback server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> Result<String> {
    required("SERVER_ADDRESS")
}

/// Client id of the registered Spotify application (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Redirect URI registered for the application (`SPOTIFY_API_REDIRECT_URI`).
///
/// Must point at [`server_addr`] with the `/callback` path.
pub fn spotify_redirect_uri() -> Result<String> {
    required("SPOTIFY_API_REDIRECT_URI")
}

/// Scopes requested during authorization (`SPOTIFY_API_AUTH_SCOPE`).
pub fn spotify_scope() -> String {
    optional("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string())
}

/// Base URL of the authorization endpoint (`SPOTIFY_API_AUTH_URL`).
pub fn spotify_apiauth_url() -> String {
    optional("SPOTIFY_API_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string())
}

/// Base URL of the Web API (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    optional("SPOTIFY_API_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Token exchange endpoint (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    optional("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string())
}

/// Pre-issued access token (`SPOTIFY_ACCESS_TOKEN`). Skips the browser flow.
pub fn spotify_access_token() -> Option<String> {
    optional("SPOTIFY_ACCESS_TOKEN")
}

/// Knobs shared by every pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Items accumulated before a bulk write is sent.
    pub batch_size: usize,
    /// Fixed delay applied after every bulk write.
    pub pacing: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            pacing: Duration::from_millis(DEFAULT_PACING_MS),
        }
    }
}

impl Settings {
    /// Reads `PLISTKIT_BATCH_SIZE` and `PLISTKIT_PACING_MS`, then applies the
    /// command-line overrides on top.
    pub fn resolve(batch_size: Option<usize>, pacing_ms: Option<u64>) -> Result<Self> {
        let defaults = Self::default();

        let batch_size = match batch_size {
            Some(size) => size,
            None => parse_env("PLISTKIT_BATCH_SIZE")?.unwrap_or(defaults.batch_size),
        };
        let pacing = match pacing_ms {
            Some(ms) => Duration::from_millis(ms),
            None => parse_env("PLISTKIT_PACING_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.pacing),
        };

        let settings = Self { batch_size, pacing };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 || self.batch_size > MAX_ITEMS_PER_CALL {
            return Err(Error::Configuration(format!(
                "batch size must be between 1 and {}, got {}",
                MAX_ITEMS_PER_CALL, self.batch_size
            )));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match optional(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::Configuration(format!("{} is not a valid number: {}", name, raw))),
        None => Ok(None),
    }
}

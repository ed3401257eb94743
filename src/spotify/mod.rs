//! # Spotify Integration Module
//!
//! [`SpotifyClient`] implements [`RemoteCollection`] on top of the Spotify
//! Web API. It owns one `reqwest` client and the bearer token of the run.
//!
//! ## Authorization
//!
//! [`auth`] runs the OAuth 2.0 PKCE flow: verifier and S256 challenge, a
//! local callback server, the browser for user consent, and the code
//! exchange. Setting `SPOTIFY_ACCESS_TOKEN` skips the browser entirely.
//! Tokens are kept in memory for the duration of one run.
//!
//! ## Endpoints
//!
//! - `GET /me` - the authorized user
//! - `GET /me/playlists` - playlists in the user's library
//! - `GET /me/tracks` - liked songs
//! - `GET /playlists/{id}/tracks` - entries of a playlist
//! - `GET /audio-features?ids=...` - audio features of up to 100 tracks
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `POST /playlists/{id}/tracks` - append tracks
//! - `DELETE /playlists/{id}/tracks` - remove all occurrences of tracks
//!
//! Paginated responses carry the URL of the following page in `next`; that
//! URL is the cursor handed to [`RemoteCollection::next_page`].
//!
//! ## Errors
//!
//! Requests are not retried. Transport failures and non-success statuses on
//! reads become [`Error::Http`]; failures of the write and create endpoints
//! are reported as [`Error::Write`] and [`Error::Creation`].

pub mod auth;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;

use crate::{
    config,
    error::{Error, Result},
    remote::RemoteCollection,
    types::{
        AddItemsRequest, AudioFeatures, AudioFeaturesResponse, CreatePlaylistRequest, Page,
        Playlist, PlaylistHandle, PlaylistItem, RemoveItemsRequest, SavedTrack, TrackUri, User,
    },
    utils,
};

pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token: OnceCell<String>,
}

impl SpotifyClient {
    /// Client against `SPOTIFY_API_URL`.
    pub fn new() -> Self {
        Self::with_api_url(config::spotify_apiurl())
    }

    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into(),
            token: OnceCell::new(),
        }
    }

    fn bearer(&self) -> Result<&str> {
        self.token
            .get()
            .map(String::as_str)
            .ok_or_else(|| Error::Auth("client is not authorized yet".to_string()))
    }

    async fn get_page<T: DeserializeOwned>(&self, url: &str) -> Result<Page<T>> {
        let response = self
            .http
            .get(url)
            .bearer_auth(self.bearer()?)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<Page<T>>().await?)
    }

    async fn write(&self, request: RequestBuilder, playlist_id: &str, count: usize) -> Result<()> {
        request
            .bearer_auth(self.bearer()?)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Write {
                playlist_id: playlist_id.to_string(),
                count,
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

impl Default for SpotifyClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteCollection for SpotifyClient {
    async fn authorize(&self) -> Result<User> {
        let token = self
            .token
            .get_or_try_init(|| async {
                match config::spotify_access_token() {
                    Some(token) => Ok::<String, Error>(token),
                    None => Ok(auth::authorize_pkce().await?.access_token),
                }
            })
            .await?;

        let response = self
            .http
            .get(format!("{}/me", self.api_url))
            .bearer_auth(token)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Auth(e.to_string()))?;

        response
            .json::<User>()
            .await
            .map_err(|e| Error::Auth(e.to_string()))
    }

    async fn list_playlists(&self, _user: &User) -> Result<Page<Playlist>> {
        let url = format!(
            "{uri}/me/playlists?limit={limit}",
            uri = self.api_url,
            limit = config::PAGE_LIMIT
        );
        self.get_page(&url).await
    }

    async fn list_saved_tracks(&self) -> Result<Page<SavedTrack>> {
        let url = format!(
            "{uri}/me/tracks?limit={limit}",
            uri = self.api_url,
            limit = config::PAGE_LIMIT
        );
        self.get_page(&url).await
    }

    async fn list_playlist_items(&self, playlist_id: &str) -> Result<Page<PlaylistItem>> {
        let url = format!(
            "{uri}/playlists/{id}/tracks?limit={limit}",
            uri = self.api_url,
            id = playlist_id,
            limit = config::PAGE_LIMIT
        );
        self.get_page(&url).await
    }

    async fn next_page<T>(&self, cursor: &str) -> Result<Option<Page<T>>>
    where
        T: DeserializeOwned + Send,
    {
        if cursor.is_empty() {
            return Ok(None);
        }
        self.get_page(cursor).await.map(Some)
    }

    async fn create_playlist(
        &self,
        user: &User,
        name: &str,
        description: &str,
    ) -> Result<PlaylistHandle> {
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public: true,
            collaborative: false,
        };

        let response = self
            .http
            .post(format!("{}/users/{}/playlists", self.api_url, user.id))
            .bearer_auth(self.bearer()?)
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Creation(e.to_string()))?;

        response
            .json::<PlaylistHandle>()
            .await
            .map_err(|e| Error::Creation(e.to_string()))
    }

    async fn bulk_add_items(&self, playlist_id: &str, item_ids: &[String]) -> Result<()> {
        let body = AddItemsRequest {
            uris: item_ids.iter().map(|id| utils::track_uri(id)).collect(),
        };
        let request = self
            .http
            .post(format!("{}/playlists/{}/tracks", self.api_url, playlist_id))
            .json(&body);

        self.write(request, playlist_id, item_ids.len()).await
    }

    async fn bulk_remove_items(&self, playlist_id: &str, item_ids: &[String]) -> Result<()> {
        let body = RemoveItemsRequest {
            tracks: item_ids
                .iter()
                .map(|id| TrackUri {
                    uri: utils::track_uri(id),
                })
                .collect(),
        };
        let request = self
            .http
            .delete(format!("{}/playlists/{}/tracks", self.api_url, playlist_id))
            .json(&body);

        self.write(request, playlist_id, item_ids.len()).await
    }

    async fn fetch_audio_features(
        &self,
        track_ids: &[String],
    ) -> Result<Vec<Option<AudioFeatures>>> {
        if track_ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{uri}/audio-features?ids={ids}",
            uri = self.api_url,
            ids = track_ids.join(",")
        );
        let response = self
            .http
            .get(&url)
            .bearer_auth(self.bearer()?)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<AudioFeaturesResponse>().await?.audio_features)
    }
}

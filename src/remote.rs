//! The capability set the engine and pipelines need from the catalog service.
//!
//! [`crate::spotify::SpotifyClient`] is the production implementation. The
//! pipelines are generic over this trait so a scripted in-memory collection
//! can stand in for the service.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::{
    error::Result,
    types::{AudioFeatures, Page, PlaylistHandle, PlaylistItem, Playlist, SavedTrack, User},
};

#[async_trait]
pub trait RemoteCollection: Send + Sync {
    /// Establishes the authorized session and returns the current user.
    ///
    /// Fails with [`Error::Auth`](crate::Error::Auth).
    async fn authorize(&self) -> Result<User>;

    /// First page of the playlists in the user's library.
    async fn list_playlists(&self, user: &User) -> Result<Page<Playlist>>;

    /// First page of the user's liked songs.
    async fn list_saved_tracks(&self) -> Result<Page<SavedTrack>>;

    /// First page of the entries of one playlist.
    async fn list_playlist_items(&self, playlist_id: &str) -> Result<Page<PlaylistItem>>;

    /// Follows a continuation cursor. `None` when the cursor leads nowhere.
    async fn next_page<T>(&self, cursor: &str) -> Result<Option<Page<T>>>
    where
        T: DeserializeOwned + Send;

    /// Fails with [`Error::Creation`](crate::Error::Creation).
    async fn create_playlist(
        &self,
        user: &User,
        name: &str,
        description: &str,
    ) -> Result<PlaylistHandle>;

    /// Appends tracks to a playlist. Fails with [`Error::Write`](crate::Error::Write).
    async fn bulk_add_items(&self, playlist_id: &str, item_ids: &[String]) -> Result<()>;

    /// Removes every occurrence of the tracks. Fails with [`Error::Write`](crate::Error::Write).
    async fn bulk_remove_items(&self, playlist_id: &str, item_ids: &[String]) -> Result<()>;

    /// Looks up audio features, one slot per requested id in request order.
    /// A slot is `None` when the service has no record for that track.
    async fn fetch_audio_features(&self, track_ids: &[String])
    -> Result<Vec<Option<AudioFeatures>>>;
}

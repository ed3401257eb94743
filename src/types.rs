use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Bearer token issued by the code exchange. Kept in memory for one run.
#[derive(Debug, Clone)]
pub struct Token {
    pub access_token: String,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// One slice of a paginated collection.
///
/// `next` is the continuation cursor; the Web API hands it out as the full
/// URL of the following page and `null` on the last one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

/// The authorized user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
}

impl User {
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub owner: PlaylistOwner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumRef {
    pub id: Option<String>,
    pub name: String,
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// `null` for local files and tracks no longer in the catalog.
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    pub album: Option<AlbumRef>,
}

impl Track {
    pub fn first_artist(&self) -> &str {
        self.artists.first().map(|a| a.name.as_str()).unwrap_or("")
    }
}

/// Entry of the user's liked songs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTrack {
    pub added_at: Option<String>,
    pub track: Track,
}

/// Entry of a playlist. The track is `null` when it was removed from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<Track>,
}

/// Audio analysis summary of one track.
///
/// Every score is optional so that a record with a missing field still
/// deserializes; the filter treats the gap as an exclusion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub id: String,
    pub acousticness: Option<f64>,
    pub danceability: Option<f64>,
    pub duration_ms: Option<f64>,
    pub energy: Option<f64>,
    pub instrumentalness: Option<f64>,
    pub key: Option<f64>,
    pub liveness: Option<f64>,
    pub loudness: Option<f64>,
    pub speechiness: Option<f64>,
    pub tempo: Option<f64>,
    pub time_signature: Option<f64>,
    pub valence: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeaturesResponse {
    pub audio_features: Vec<Option<AudioFeatures>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

/// The playlist a pipeline writes into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistHandle {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddItemsRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackUri {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveItemsRequest {
    pub tracks: Vec<TrackUri>,
}

/// Summary of a run that adds tracks to a playlist.
#[derive(Tabled)]
pub struct SummaryTableRow {
    pub examined: u64,
    pub added: u64,
    pub skipped: u64,
}

/// Summary of a delete run; `cleaned` counts playlists, not tracks.
#[derive(Tabled)]
pub struct CleanupTableRow {
    pub examined: u64,
    pub cleaned: u64,
    pub skipped: u64,
}

#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use plistkit::{
    Error, Result,
    remote::RemoteCollection,
    types::{AudioFeatures, Page, Playlist, PlaylistHandle, PlaylistItem, SavedTrack, User},
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Authorize,
    ListPlaylists,
    ListSavedTracks,
    ListPlaylistItems(String),
    NextPage(String),
    Create(String),
    Add(String, Vec<String>),
    Remove(String, Vec<String>),
    Features(Vec<String>),
}

/// In-memory catalog that serves scripted pages and records every call.
pub struct FakeRemote {
    user: User,
    fail_auth: bool,
    fail_create: bool,
    fail_write_at: Option<usize>,
    playlists: Value,
    saved_tracks: Value,
    playlist_items: HashMap<String, Value>,
    pages: HashMap<String, Value>,
    features: HashMap<String, Value>,
    contents: Mutex<HashMap<String, Vec<String>>>,
    removed: Mutex<usize>,
    writes: Mutex<usize>,
    calls: Mutex<Vec<Call>>,
}

impl FakeRemote {
    pub fn new(user_id: &str) -> Self {
        Self {
            user: User {
                id: user_id.to_string(),
                display_name: Some(format!("{} display", user_id)),
            },
            fail_auth: false,
            fail_create: false,
            fail_write_at: None,
            playlists: empty_page(),
            saved_tracks: empty_page(),
            playlist_items: HashMap::new(),
            pages: HashMap::new(),
            features: HashMap::new(),
            contents: Mutex::new(HashMap::new()),
            removed: Mutex::new(0),
            writes: Mutex::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_playlists(mut self, playlists: Vec<Value>, page_size: usize) -> Self {
        self.playlists = self.chain("playlists", playlists, page_size);
        self
    }

    pub fn with_saved_tracks(mut self, tracks: Vec<Value>, page_size: usize) -> Self {
        self.saved_tracks = self.chain("saved", tracks, page_size);
        self
    }

    pub fn with_playlist_items(
        mut self,
        playlist_id: &str,
        items: Vec<Value>,
        page_size: usize,
    ) -> Self {
        let first = self.chain(&format!("items/{}", playlist_id), items, page_size);
        self.playlist_items.insert(playlist_id.to_string(), first);
        self
    }

    pub fn with_features(mut self, records: Vec<Value>) -> Self {
        for record in records {
            let id = record["id"].as_str().unwrap_or_default().to_string();
            self.features.insert(id, record);
        }
        self
    }

    pub fn with_contents(self, playlist_id: &str, track_ids: &[&str]) -> Self {
        self.contents.lock().unwrap().insert(
            playlist_id.to_string(),
            track_ids.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    pub fn failing_auth(mut self) -> Self {
        self.fail_auth = true;
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// The n-th bulk write (1-based) fails.
    pub fn failing_write_at(mut self, call: usize) -> Self {
        self.fail_write_at = Some(call);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn adds(&self) -> Vec<(String, Vec<String>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Add(playlist, ids) => Some((playlist, ids)),
                _ => None,
            })
            .collect()
    }

    pub fn removes(&self) -> Vec<(String, Vec<String>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Remove(playlist, ids) => Some((playlist, ids)),
                _ => None,
            })
            .collect()
    }

    pub fn next_page_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::NextPage(_)))
            .count()
    }

    /// Track occurrences actually removed from playlist contents so far.
    pub fn removed_occurrences(&self) -> usize {
        *self.removed.lock().unwrap()
    }

    pub fn contents(&self, playlist_id: &str) -> Vec<String> {
        self.contents
            .lock()
            .unwrap()
            .get(playlist_id)
            .cloned()
            .unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    /// Splits `items` into linked pages; returns the first, stores the rest by cursor.
    fn chain(&mut self, prefix: &str, items: Vec<Value>, page_size: usize) -> Value {
        let chunks: Vec<Vec<Value>> = items.chunks(page_size).map(|c| c.to_vec()).collect();
        if chunks.is_empty() {
            return empty_page();
        }

        let count = chunks.len();
        let mut first = Value::Null;
        for (index, chunk) in chunks.into_iter().enumerate() {
            let next = if index + 1 < count {
                Value::String(format!("{}?page={}", prefix, index + 1))
            } else {
                Value::Null
            };
            let page = json!({ "items": chunk, "next": next });
            if index == 0 {
                first = page;
            } else {
                self.pages.insert(format!("{}?page={}", prefix, index), page);
            }
        }
        first
    }

    fn check_write(&self, playlist_id: &str, count: usize) -> Result<()> {
        let mut writes = self.writes.lock().unwrap();
        *writes += 1;
        if self.fail_write_at == Some(*writes) {
            return Err(Error::Write {
                playlist_id: playlist_id.to_string(),
                count,
                reason: "503 Service Unavailable".to_string(),
            });
        }
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(value: &Value) -> Page<T> {
    serde_json::from_value(value.clone()).expect("scripted page should decode")
}

#[async_trait]
impl RemoteCollection for FakeRemote {
    async fn authorize(&self) -> Result<User> {
        self.record(Call::Authorize);
        if self.fail_auth {
            return Err(Error::Auth("401 Unauthorized".to_string()));
        }
        Ok(self.user.clone())
    }

    async fn list_playlists(&self, _user: &User) -> Result<Page<Playlist>> {
        self.record(Call::ListPlaylists);
        Ok(decode(&self.playlists))
    }

    async fn list_saved_tracks(&self) -> Result<Page<SavedTrack>> {
        self.record(Call::ListSavedTracks);
        Ok(decode(&self.saved_tracks))
    }

    async fn list_playlist_items(&self, playlist_id: &str) -> Result<Page<PlaylistItem>> {
        self.record(Call::ListPlaylistItems(playlist_id.to_string()));
        Ok(self
            .playlist_items
            .get(playlist_id)
            .map(decode)
            .unwrap_or_else(|| decode(&empty_page())))
    }

    async fn next_page<T>(&self, cursor: &str) -> Result<Option<Page<T>>>
    where
        T: DeserializeOwned + Send,
    {
        self.record(Call::NextPage(cursor.to_string()));
        Ok(self.pages.get(cursor).map(decode))
    }

    async fn create_playlist(
        &self,
        _user: &User,
        name: &str,
        _description: &str,
    ) -> Result<PlaylistHandle> {
        self.record(Call::Create(name.to_string()));
        if self.fail_create {
            return Err(Error::Creation("403 Forbidden".to_string()));
        }
        Ok(PlaylistHandle {
            id: "created".to_string(),
            name: name.to_string(),
        })
    }

    async fn bulk_add_items(&self, playlist_id: &str, item_ids: &[String]) -> Result<()> {
        self.record(Call::Add(playlist_id.to_string(), item_ids.to_vec()));
        self.check_write(playlist_id, item_ids.len())?;
        self.contents
            .lock()
            .unwrap()
            .entry(playlist_id.to_string())
            .or_default()
            .extend(item_ids.iter().cloned());
        Ok(())
    }

    async fn bulk_remove_items(&self, playlist_id: &str, item_ids: &[String]) -> Result<()> {
        self.record(Call::Remove(playlist_id.to_string(), item_ids.to_vec()));
        self.check_write(playlist_id, item_ids.len())?;
        let mut contents = self.contents.lock().unwrap();
        if let Some(tracks) = contents.get_mut(playlist_id) {
            let before = tracks.len();
            tracks.retain(|t| !item_ids.contains(t));
            *self.removed.lock().unwrap() += before - tracks.len();
        }
        Ok(())
    }

    async fn fetch_audio_features(
        &self,
        track_ids: &[String],
    ) -> Result<Vec<Option<AudioFeatures>>> {
        self.record(Call::Features(track_ids.to_vec()));
        Ok(track_ids
            .iter()
            .map(|id| {
                self.features
                    .get(id)
                    .map(|v| serde_json::from_value(v.clone()).expect("features should decode"))
            })
            .collect())
    }
}

pub fn empty_page() -> Value {
    json!({ "items": [], "next": null })
}

pub fn playlist(id: &str, name: &str, owner: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "owner": { "id": owner, "display_name": owner }
    })
}

pub fn saved_track(id: Option<&str>, name: &str, release_date: Option<&str>) -> Value {
    json!({
        "added_at": "2024-01-01T00:00:00Z",
        "track": {
            "id": id,
            "name": name,
            "artists": [{ "id": "artist", "name": "Some Artist" }],
            "album": { "id": "album", "name": "Some Album", "release_date": release_date }
        }
    })
}

pub fn playlist_item(id: Option<&str>) -> Value {
    json!({
        "track": {
            "id": id,
            "name": id.unwrap_or("local file"),
            "artists": [],
            "album": null
        }
    })
}

/// Entry whose track was removed from the catalog.
pub fn removed_item() -> Value {
    json!({ "track": null })
}

pub fn features(id: &str, tempo: f64, energy: f64) -> Value {
    json!({
        "id": id,
        "acousticness": 0.1,
        "danceability": 0.7,
        "duration_ms": 210000,
        "energy": energy,
        "instrumentalness": 0.0,
        "key": 5,
        "liveness": 0.1,
        "loudness": -6.5,
        "speechiness": 0.05,
        "tempo": tempo,
        "time_signature": 4,
        "valence": 0.6
    })
}

pub fn ids(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{}{}", prefix, i)).collect()
}

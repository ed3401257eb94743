use thiserror::Error;

/// Failures that abort a run.
///
/// Problems with a single item (an unparsable release date, a missing audio
/// feature) are not errors: they surface as
/// [`Exclusion`](crate::engine::filter::Exclusion) values and only count the
/// item as skipped.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to authorize app client or user: {0}")]
    Auth(String),

    #[error("Failed to create a playlist: {0}")]
    Creation(String),

    #[error("No {0} found.")]
    EmptyCollection(&'static str),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Failed to write {count} items to playlist {playlist_id}: {reason}")]
    Write {
        playlist_id: String,
        count: usize,
        reason: String,
    },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

use std::time::Duration;

use tokio::time::sleep;

use crate::{config::MAX_ITEMS_PER_CALL, error::Result, info, remote::RemoteCollection};

/// Which bulk operation a flush issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Add,
    Remove,
}

/// Accumulates track ids and writes them to one playlist in bounded batches.
///
/// A batch is flushed as soon as it reaches `max_batch` items. Whatever is
/// left when the input runs out stays pending until [`BatchWriter::flush`]
/// is called, so every run has to end with an explicit flush.
///
/// A failed write is returned as is; items of earlier batches stay written.
pub struct BatchWriter<'a, R> {
    remote: &'a R,
    playlist_id: String,
    mode: WriteMode,
    max_batch: usize,
    pacing: Duration,
    batch: Vec<String>,
    calls: usize,
    written: usize,
}

impl<'a, R: RemoteCollection> BatchWriter<'a, R> {
    /// `max_batch` is clamped to the API's per-call limit.
    pub fn new(
        remote: &'a R,
        playlist_id: impl Into<String>,
        mode: WriteMode,
        max_batch: usize,
        pacing: Duration,
    ) -> Self {
        let max_batch = max_batch.clamp(1, MAX_ITEMS_PER_CALL);
        Self {
            remote,
            playlist_id: playlist_id.into(),
            mode,
            max_batch,
            pacing,
            batch: Vec::with_capacity(max_batch),
            calls: 0,
            written: 0,
        }
    }

    /// Queues one id, flushing when the batch is full.
    ///
    /// Returns the number of items written by this call (zero unless it
    /// triggered a flush).
    pub async fn offer(&mut self, item_id: impl Into<String>) -> Result<usize> {
        self.batch.push(item_id.into());
        if self.batch.len() >= self.max_batch {
            return self.flush().await;
        }
        Ok(0)
    }

    /// Writes the pending batch if there is one and returns its size.
    pub async fn flush(&mut self) -> Result<usize> {
        if self.batch.is_empty() {
            return Ok(0);
        }

        let count = self.batch.len();
        match self.mode {
            WriteMode::Add => {
                info!("Sending a request to add {} tracks.", count);
                self.remote
                    .bulk_add_items(&self.playlist_id, &self.batch)
                    .await?;
            }
            WriteMode::Remove => {
                self.remote
                    .bulk_remove_items(&self.playlist_id, &self.batch)
                    .await?;
            }
        }

        self.batch.clear();
        self.calls += 1;
        self.written += count;

        if !self.pacing.is_zero() {
            sleep(self.pacing).await;
        }

        Ok(count)
    }

    /// Items queued but not written yet.
    pub fn pending(&self) -> usize {
        self.batch.len()
    }

    /// Number of bulk calls issued so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Total number of items written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn playlist_id(&self) -> &str {
        &self.playlist_id
    }
}

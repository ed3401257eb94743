use crate::{
    config::Settings,
    engine::{BatchWriter, FilterSpec, Paginator, RunCounters, WriteMode},
    error::{Error, Result},
    info,
    remote::RemoteCollection,
    success,
};

use super::{Run, Stage, authorize};

#[derive(Debug, Clone, Default)]
pub struct MergeRequest {
    /// Source playlists, merged in this order.
    pub playlist_ids: Vec<String>,
    /// Existing playlist to append to instead of creating a new one.
    pub append_to: Option<String>,
}

impl MergeRequest {
    pub fn new(playlist_ids: Vec<String>, append_to: Option<String>) -> Self {
        Self {
            playlist_ids,
            append_to,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.playlist_ids.is_empty() {
            return Err(Error::Configuration(
                "At least one playlist ID is required.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Copies the tracks of every source playlist into one destination.
///
/// Each source gets its own batch, flushed when the source is exhausted, so
/// the tail of one playlist is written before the next one is read. Entries
/// without a track id are skipped.
pub async fn merge_playlists<R: RemoteCollection>(
    remote: &R,
    request: &MergeRequest,
    settings: &Settings,
    counters: RunCounters,
) -> Result<RunCounters> {
    request.validate()?;
    settings.validate()?;

    let mut run = Run::start(counters);
    let user = authorize(remote, &mut run).await?;

    let destination = match &request.append_to {
        Some(playlist_id) => playlist_id.clone(),
        None => {
            let created = remote
                .create_playlist(
                    &user,
                    "My merged playlist",
                    &format!(
                        "Generated with plistkit | Merged from {} playlists",
                        request.playlist_ids.len()
                    ),
                )
                .await?;
            success!("Playlist created. ID:{}", created.id);
            created.id
        }
    };

    let filter = FilterSpec::unconstrained();

    run.advance(Stage::Paginating);
    for source in &request.playlist_ids {
        info!("Merging playlist {} into {}", source, destination);

        let mut writer = BatchWriter::new(
            remote,
            destination.as_str(),
            WriteMode::Add,
            settings.batch_size,
            settings.pacing,
        );
        let first = remote.list_playlist_items(source).await?;
        let mut pages = Paginator::new(remote, first);
        while let Some(entries) = pages.next_page().await? {
            for entry in entries {
                run.counters.examine();

                let Some(track) = entry.track else {
                    run.counters.reject();
                    continue;
                };
                let Some(track_id) = track.id.clone() else {
                    run.counters.reject();
                    continue;
                };

                if filter.evaluate(&track).is_include() {
                    let written = writer.offer(track_id).await?;
                    run.counters.accept(written);
                } else {
                    run.counters.reject();
                }
            }
        }

        let written = writer.flush().await?;
        run.counters.accept(written);
    }

    // Every source drained its own batch above.
    run.advance(Stage::Draining);
    success!("Done.");
    Ok(run.finish())
}

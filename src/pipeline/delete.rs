use std::collections::HashSet;

use crate::{
    config::Settings,
    engine::{BatchWriter, Paginator, RunCounters, WriteMode},
    error::{Error, Result},
    info,
    remote::RemoteCollection,
    success,
};

use super::{Run, Stage, authorize};

#[derive(Debug, Clone, Default)]
pub struct DeleteRequest {
    pub track_ids: Vec<String>,
    pub ignore_playlists: HashSet<String>,
}

impl DeleteRequest {
    pub fn new(track_ids: Vec<String>, ignore_playlists: impl IntoIterator<Item = String>) -> Self {
        Self {
            track_ids,
            ignore_playlists: ignore_playlists.into_iter().collect(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.track_ids.is_empty() {
            return Err(Error::Configuration(
                "At least one track ID is required.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Removes every occurrence of the requested tracks from each playlist the
/// user owns.
///
/// Playlists on the ignore list and playlists owned by someone else count as
/// skipped. Each remaining playlist gets the track ids in removal calls of at
/// most `settings.batch_size` ids and counts as accepted. Removing a track
/// that is not in a playlist is a no-op on the service side, so repeating a
/// run changes nothing.
pub async fn delete_everywhere<R: RemoteCollection>(
    remote: &R,
    request: &DeleteRequest,
    settings: &Settings,
    counters: RunCounters,
) -> Result<RunCounters> {
    request.validate()?;
    settings.validate()?;

    let mut run = Run::start(counters);
    let user = authorize(remote, &mut run).await?;

    let first = remote.list_playlists(&user).await?;
    if first.items.is_empty() {
        return Err(Error::EmptyCollection("playlists"));
    }

    run.advance(Stage::Paginating);
    let mut pages = Paginator::new(remote, first);
    while let Some(playlists) = pages.next_page().await? {
        for playlist in playlists {
            run.counters.examine();

            if request.ignore_playlists.contains(&playlist.id) {
                info!("Skipping playlist: {} (ignored)", playlist.name);
                run.counters.reject();
                continue;
            }
            if playlist.owner.id != user.id {
                info!("Skipping playlist: {} (not owned)", playlist.name);
                run.counters.reject();
                continue;
            }

            info!(
                "Removing tracks {:?} from playlist: {}",
                request.track_ids, playlist.name
            );
            let mut writer = BatchWriter::new(
                remote,
                playlist.id.as_str(),
                WriteMode::Remove,
                settings.batch_size,
                settings.pacing,
            );
            for track_id in &request.track_ids {
                writer.offer(track_id.as_str()).await?;
            }
            writer.flush().await?;
            run.counters.accept(1);
        }
    }

    // Removal batches are per playlist, nothing is pending across playlists.
    run.advance(Stage::Draining);
    success!(
        "Done. Removed the tracks from {} playlists.",
        run.counters().accepted
    );
    Ok(run.finish())
}

use crate::{
    config::Settings,
    engine::{BatchWriter, Exclusion, FilterSpec, Paginator, RunCounters, Verdict, WriteMode},
    error::{Error, Result},
    info,
    remote::RemoteCollection,
    success,
    types::Track,
};

use super::{Run, Stage, authorize};

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRequest {
    pub filter: FilterSpec,
}

impl FeatureRequest {
    pub fn new(filter: FilterSpec) -> Self {
        Self { filter }
    }

    pub fn validate(&self) -> Result<()> {
        if self.filter.is_unconstrained() {
            return Err(Error::Configuration("No filters specified.".to_string()));
        }
        Ok(())
    }
}

/// Creates a playlist of the liked songs whose audio features satisfy the
/// request's filter.
///
/// Features are looked up once per page of liked songs. A song the service
/// has no features for, or whose record lacks a filtered attribute, is
/// skipped.
pub async fn collect_by_features<R: RemoteCollection>(
    remote: &R,
    request: &FeatureRequest,
    settings: &Settings,
    counters: RunCounters,
) -> Result<RunCounters> {
    request.validate()?;
    settings.validate()?;

    let mut run = Run::start(counters);
    let user = authorize(remote, &mut run).await?;
    info!("Using audio feature flags: {}", request.filter);

    let playlist = remote
        .create_playlist(
            &user,
            "My filtered playlist",
            &format!(
                "Liked songs filtered by audio features. Generated with plistkit | Used flags: {}.",
                request.filter
            ),
        )
        .await?;
    success!("Playlist created. ID:{}", playlist.id);

    let first = remote.list_saved_tracks().await?;
    if first.items.is_empty() {
        return Err(Error::EmptyCollection("liked songs"));
    }

    run.advance(Stage::Paginating);
    let mut writer = BatchWriter::new(
        remote,
        playlist.id.as_str(),
        WriteMode::Add,
        settings.batch_size,
        settings.pacing,
    );
    let mut pages = Paginator::new(remote, first);
    while let Some(saved_tracks) = pages.next_page().await? {
        let mut tracks: Vec<(String, Track)> = Vec::with_capacity(saved_tracks.len());
        for saved in saved_tracks {
            match saved.track.id.clone() {
                Some(id) => tracks.push((id, saved.track)),
                None => {
                    run.counters.examine();
                    run.counters.reject();
                }
            }
        }
        if tracks.is_empty() {
            continue;
        }

        let ids: Vec<String> = tracks.iter().map(|(id, _)| id.clone()).collect();
        let mut records = remote.fetch_audio_features(&ids).await?.into_iter();

        for (track_id, track) in tracks {
            run.counters.examine();

            let verdict = match records.next().flatten() {
                Some(features) => request.filter.evaluate(&features),
                None => Verdict::Exclude(Exclusion::NoRecord),
            };

            match verdict {
                Verdict::Include => {
                    info!("Adding: {:>32.32} {}", track.first_artist(), track.name);
                    let written = writer.offer(track_id).await?;
                    run.counters.accept(written);
                }
                Verdict::Exclude(_) => run.counters.reject(),
            }
        }
    }

    run.advance(Stage::Draining);
    let written = writer.flush().await?;
    run.counters.accept(written);

    success!("Done.");
    Ok(run.finish())
}

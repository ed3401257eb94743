use crate::{
    config::Settings,
    engine::{Attribute, BatchWriter, Bound, FilterSpec, Paginator, RunCounters, Verdict, WriteMode},
    error::{Error, Result},
    info,
    remote::RemoteCollection,
    success,
};

use super::{Run, Stage, authorize};

/// Latest release year accepted on input.
pub const MAX_YEAR: i32 = 2100;

/// Inclusive release year range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start_year: i32,
    pub end_year: i32,
}

impl YearRange {
    pub fn new(start_year: i32, end_year: i32) -> Self {
        Self {
            start_year,
            end_year,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_year < 0 || self.end_year < 0 {
            return Err(Error::Configuration(
                "Only positive years are allowed.".to_string(),
            ));
        }
        if self.start_year > MAX_YEAR || self.end_year > MAX_YEAR {
            return Err(Error::Configuration(format!(
                "Years past {} are not allowed.",
                MAX_YEAR
            )));
        }
        if self.start_year > self.end_year {
            return Err(Error::Configuration(
                "Start year cannot be greater than end year.".to_string(),
            ));
        }
        Ok(())
    }

    pub fn filter(&self) -> Result<FilterSpec> {
        FilterSpec::new(vec![
            Bound::min(Attribute::ReleaseYear, f64::from(self.start_year)),
            Bound::max(Attribute::ReleaseYear, f64::from(self.end_year)),
        ])
    }

    pub fn playlist_name(&self) -> String {
        format!("My tracks {}-{}", self.start_year, self.end_year)
    }
}

/// Creates a playlist of the liked songs released within `range`.
///
/// Songs with an unreadable release date or without a track id are skipped.
pub async fn collect_by_year<R: RemoteCollection>(
    remote: &R,
    range: &YearRange,
    settings: &Settings,
    counters: RunCounters,
) -> Result<RunCounters> {
    range.validate()?;
    settings.validate()?;
    let filter = range.filter()?;

    let mut run = Run::start(counters);
    let user = authorize(remote, &mut run).await?;

    let playlist = remote
        .create_playlist(
            &user,
            &range.playlist_name(),
            "Liked songs filtered by release year. Generated with plistkit.",
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
        for saved in saved_tracks {
            run.counters.examine();

            let Some(track_id) = saved.track.id.clone() else {
                run.counters.reject();
                continue;
            };

            match filter.evaluate(&saved) {
                Verdict::Include => {
                    info!(
                        "Adding: {:>32.32} {}",
                        saved.track.first_artist(),
                        saved.track.name
                    );
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

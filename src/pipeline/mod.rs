//! # Pipelines
//!
//! Compositions of the [`engine`](crate::engine) parts into the four
//! transformations the binary offers:
//!
//! - [`delete_everywhere`] - remove tracks from every playlist the user owns
//! - [`collect_by_year`] - liked songs released within a year range
//! - [`collect_by_features`] - liked songs whose audio features fit a filter
//! - [`merge_playlists`] - copy several playlists into one
//!
//! Every run moves through the same stages:
//!
//! ```text
//! Init → Authorizing → Paginating → Draining → Done
//! ```
//!
//! and stops at the first fatal error. Nothing already written is rolled
//! back, including a destination playlist created earlier in the run.
//!
//! Run counters are handed in by the caller and handed back on success.

mod delete;
mod features;
mod merge;
mod years;

use std::fmt;

use crate::{
    engine::RunCounters, error::Result, info, remote::RemoteCollection, types::User,
};

pub use delete::{DeleteRequest, delete_everywhere};
pub use features::{FeatureRequest, collect_by_features};
pub use merge::{MergeRequest, merge_playlists};
pub use years::{MAX_YEAR, YearRange, collect_by_year};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Init,
    Authorizing,
    Paginating,
    Draining,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::Authorizing => "authorizing",
            Stage::Paginating => "paginating",
            Stage::Draining => "draining",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// State of one pipeline invocation.
#[derive(Debug)]
pub struct Run {
    stage: Stage,
    counters: RunCounters,
}

impl Run {
    pub fn start(counters: RunCounters) -> Self {
        Self {
            stage: Stage::Init,
            counters,
        }
    }

    /// Stages only move forward.
    pub fn advance(&mut self, next: Stage) {
        debug_assert!(
            next > self.stage,
            "cannot move from {} to {}",
            self.stage,
            next
        );
        self.stage = next;
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn counters(&self) -> &RunCounters {
        &self.counters
    }

    pub fn finish(mut self) -> RunCounters {
        self.advance(Stage::Done);
        self.counters
    }
}

async fn authorize<R: RemoteCollection>(remote: &R, run: &mut Run) -> Result<User> {
    run.advance(Stage::Authorizing);
    let user = remote.authorize().await?;
    info!("Authorized as: {}", user.name());
    Ok(user)
}

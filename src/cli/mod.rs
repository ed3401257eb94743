//! # CLI Module
//!
//! Command implementations behind the `plistkit` subcommands. Each one builds
//! a [`SpotifyClient`](crate::spotify::SpotifyClient), hands it to the
//! matching [`pipeline`](crate::pipeline) and prints the run summary.
//!
//! - [`auth`] - checks the authorization setup
//! - [`delete`] - removes tracks from every owned playlist
//! - [`years`] - liked songs released within a year range
//! - [`features`] - liked songs filtered by audio features
//! - [`merge`] - merges playlists into a new or existing one
//!
//! Fatal errors are printed as a single line and end the process with exit
//! status 1.
//!
//! ```bash
//! plistkit auth
//! plistkit delete 4uLU6hMCjMI75M1A2tKUQC --ignore-playlists 37i9dQZF1DXcBWIGoYBM5M
//! plistkit years --start-year 1990 --end-year 1999
//! plistkit features --min-tempo 120 --max-tempo 130 --min-energy 0.8
//! plistkit merge 1A2b3C 4D5e6F --append-playlist 7G8h9I
//! ```

mod auth;
mod delete;
mod features;
mod merge;
mod years;

use tabled::{Table, Tabled};

pub use auth::auth;
pub use delete::delete;
pub use features::{FeatureArgs, features};
pub use merge::merge;
pub use years::years;

fn report<R: Tabled>(row: R) {
    let table = Table::new(vec![row]);
    println!("{}", table);
}

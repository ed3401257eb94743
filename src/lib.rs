//! Playlist toolkit for the Spotify Web API.
//!
//! Each subcommand of the `plistkit` binary runs one transformation over the
//! user's library: remove tracks from every owned playlist, collect liked
//! songs by release year or by audio features into a new playlist, or merge
//! several playlists into one.
//!
//! # Modules
//!
//! - `api` - HTTP endpoint for the local OAuth callback server
//! - `cli` - Command implementations behind the binary's subcommands
//! - `config` - Environment variables and run settings
//! - `engine` - Predicate evaluation, pagination and batched writes
//! - `error` - Error taxonomy shared by every layer
//! - `pipeline` - The four orchestrated transformations
//! - `remote` - The capability the engine needs from the catalog service
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Wire types for pages, playlists, tracks and features
//! - `utils` - PKCE helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod remote;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Authorized as: {}", name);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Accepts the same arguments as `println!`.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1 right after printing, so it is
/// reserved for fatal conditions reported at the command boundary.
///
/// # Example
///
/// ```
/// error!("Failed to create a playlist: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues the user should notice.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

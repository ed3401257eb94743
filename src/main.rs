use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use plistkit::{cli, config, error, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Items per bulk write (1-100); overrides PLISTKIT_BATCH_SIZE
    #[clap(long, global = true)]
    batch_size: Option<usize>,

    /// Pause after every bulk write in milliseconds; overrides PLISTKIT_PACING_MS
    #[clap(long, global = true)]
    pacing_ms: Option<u64>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Remove tracks from all your playlists
    Delete(DeleteOptions),

    /// Create a playlist of liked songs released within a year range
    Years(YearsOptions),

    /// Create a playlist of liked songs filtered by audio features
    Features(FeaturesOptions),

    /// Merge playlists into a new or an existing playlist
    Merge(MergeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteOptions {
    /// Track IDs to remove from all your playlists
    #[clap(required = true, num_args = 1..)]
    track_ids: Vec<String>,

    /// Playlist IDs of playlists to leave untouched
    #[clap(short, long, num_args = 1..)]
    ignore_playlists: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct YearsOptions {
    /// First release year to include
    #[clap(short, long)]
    start_year: i32,

    /// Last release year to include
    #[clap(short, long)]
    end_year: i32,
}

#[derive(Parser, Debug, Clone)]
pub struct FeaturesOptions {
    #[command(flatten)]
    bounds: cli::FeatureArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct MergeOptions {
    /// Playlist IDs of the playlists to merge, in order
    #[clap(required = true, num_args = 1..)]
    playlist_ids: Vec<String>,

    /// Append to this existing playlist instead of creating a new one
    #[clap(short, long)]
    append_playlist: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let settings = match config::Settings::resolve(cli.batch_size, cli.pacing_ms) {
        Ok(settings) => settings,
        Err(e) => error!("{}", e),
    };

    match cli.command {
        Command::Auth => cli::auth().await,
        Command::Delete(opt) => cli::delete(opt.track_ids, opt.ignore_playlists, settings).await,
        Command::Years(opt) => cli::years(opt.start_year, opt.end_year, settings).await,
        Command::Features(opt) => cli::features(opt.bounds, settings).await,
        Command::Merge(opt) => {
            cli::merge(opt.playlist_ids, opt.append_playlist, settings).await
        }
        Command::Completions(_) => {}
    }
}

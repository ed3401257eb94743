use crate::{
    cli::report,
    config::Settings,
    engine::RunCounters,
    error,
    pipeline::{self, MergeRequest},
    spotify::SpotifyClient,
};

pub async fn merge(playlist_ids: Vec<String>, append_playlist: Option<String>, settings: Settings) {
    let client = SpotifyClient::new();
    let request = MergeRequest::new(playlist_ids, append_playlist);

    match pipeline::merge_playlists(&client, &request, &settings, RunCounters::new()).await {
        Ok(counters) => report(counters.summary_row()),
        Err(e) => error!("{}", e),
    }
}

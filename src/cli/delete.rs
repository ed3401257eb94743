use crate::{
    cli::report,
    config::Settings,
    engine::RunCounters,
    error,
    pipeline::{self, DeleteRequest},
    spotify::SpotifyClient,
};

pub async fn delete(track_ids: Vec<String>, ignore_playlists: Vec<String>, settings: Settings) {
    let client = SpotifyClient::new();
    let request = DeleteRequest::new(track_ids, ignore_playlists);

    match pipeline::delete_everywhere(&client, &request, &settings, RunCounters::new()).await {
        Ok(counters) => report(counters.cleanup_row()),
        Err(e) => error!("{}", e),
    }
}

use crate::{
    cli::report,
    config::Settings,
    engine::RunCounters,
    error,
    pipeline::{self, YearRange},
    spotify::SpotifyClient,
};

pub async fn years(start_year: i32, end_year: i32, settings: Settings) {
    let client = SpotifyClient::new();
    let range = YearRange::new(start_year, end_year);

    match pipeline::collect_by_year(&client, &range, &settings, RunCounters::new()).await {
        Ok(counters) => report(counters.summary_row()),
        Err(e) => error!("{}", e),
    }
}

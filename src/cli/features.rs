use clap::Args;

use crate::{
    cli::report,
    config::Settings,
    engine::{Attribute, Bound, FilterSpec, RunCounters},
    error, pipeline,
    pipeline::FeatureRequest,
    spotify::SpotifyClient,
};

/// Inclusive audio feature bounds. Every flag is optional, at least one is required.
#[derive(Args, Debug, Clone, Default)]
pub struct FeatureArgs {
    /// Min. acousticness, 0.0 to 1.0; 1.0 is high confidence the track is acoustic
    #[clap(long)]
    pub min_acousticness: Option<f64>,
    /// Max. acousticness
    #[clap(long)]
    pub max_acousticness: Option<f64>,

    /// Min. danceability, 0.0 (least danceable) to 1.0 (most danceable)
    #[clap(long)]
    pub min_danceability: Option<f64>,
    /// Max. danceability
    #[clap(long)]
    pub max_danceability: Option<f64>,

    /// Min. duration of the track in milliseconds
    #[clap(long)]
    pub min_duration_ms: Option<u64>,
    /// Max. duration of the track in milliseconds
    #[clap(long)]
    pub max_duration_ms: Option<u64>,

    /// Min. energy, 0.0 to 1.0; a perceptual measure of intensity and activity
    #[clap(long)]
    pub min_energy: Option<f64>,
    /// Max. energy
    #[clap(long)]
    pub max_energy: Option<f64>,

    /// Min. instrumentalness, 0.0 to 1.0; values above 0.5 suggest no vocals
    #[clap(long)]
    pub min_instrumentalness: Option<f64>,
    /// Max. instrumentalness
    #[clap(long)]
    pub max_instrumentalness: Option<f64>,

    /// Min. key in pitch class notation (0 = C, 1 = C#/Db, 2 = D, ...)
    #[clap(long)]
    pub min_key: Option<i64>,
    /// Max. key
    #[clap(long)]
    pub max_key: Option<i64>,

    /// Min. liveness, 0.0 to 1.0; above 0.8 the track is likely live
    #[clap(long)]
    pub min_liveness: Option<f64>,
    /// Max. liveness
    #[clap(long)]
    pub max_liveness: Option<f64>,

    /// Min. loudness in dB, typically between -60 and 0
    #[clap(long, allow_hyphen_values = true)]
    pub min_loudness: Option<f64>,
    /// Max. loudness in dB
    #[clap(long, allow_hyphen_values = true)]
    pub max_loudness: Option<f64>,

    /// Min. speechiness, 0.0 to 1.0; above 0.66 is probably spoken word
    #[clap(long)]
    pub min_speechiness: Option<f64>,
    /// Max. speechiness
    #[clap(long)]
    pub max_speechiness: Option<f64>,

    /// Min. tempo in beats per minute
    #[clap(long)]
    pub min_tempo: Option<f64>,
    /// Max. tempo in beats per minute
    #[clap(long)]
    pub max_tempo: Option<f64>,

    /// Min. estimated time signature (beats per bar)
    #[clap(long)]
    pub min_time_signature: Option<i64>,
    /// Max. estimated time signature
    #[clap(long)]
    pub max_time_signature: Option<i64>,

    /// Min. valence, 0.0 (negative) to 1.0 (positive)
    #[clap(long)]
    pub min_valence: Option<f64>,
    /// Max. valence
    #[clap(long)]
    pub max_valence: Option<f64>,
}

impl FeatureArgs {
    /// The supplied flags as bounds, in catalogue order.
    pub fn bounds(&self) -> Vec<Bound> {
        let pairs = [
            (Attribute::Acousticness, self.min_acousticness, self.max_acousticness),
            (Attribute::Danceability, self.min_danceability, self.max_danceability),
            (
                Attribute::DurationMs,
                self.min_duration_ms.map(|v| v as f64),
                self.max_duration_ms.map(|v| v as f64),
            ),
            (Attribute::Energy, self.min_energy, self.max_energy),
            (
                Attribute::Instrumentalness,
                self.min_instrumentalness,
                self.max_instrumentalness,
            ),
            (
                Attribute::Key,
                self.min_key.map(|v| v as f64),
                self.max_key.map(|v| v as f64),
            ),
            (Attribute::Liveness, self.min_liveness, self.max_liveness),
            (Attribute::Loudness, self.min_loudness, self.max_loudness),
            (Attribute::Speechiness, self.min_speechiness, self.max_speechiness),
            (Attribute::Tempo, self.min_tempo, self.max_tempo),
            (
                Attribute::TimeSignature,
                self.min_time_signature.map(|v| v as f64),
                self.max_time_signature.map(|v| v as f64),
            ),
            (Attribute::Valence, self.min_valence, self.max_valence),
        ];

        let mut bounds = Vec::new();
        for (attribute, min, max) in pairs {
            if let Some(threshold) = min {
                bounds.push(Bound::min(attribute, threshold));
            }
            if let Some(threshold) = max {
                bounds.push(Bound::max(attribute, threshold));
            }
        }
        bounds
    }

    pub fn filter(&self) -> crate::Result<FilterSpec> {
        FilterSpec::new(self.bounds())
    }
}

pub async fn features(args: FeatureArgs, settings: Settings) {
    let filter = match args.filter() {
        Ok(filter) => filter,
        Err(e) => error!("{}", e),
    };

    let client = SpotifyClient::new();
    let request = FeatureRequest::new(filter);

    match pipeline::collect_by_features(&client, &request, &settings, RunCounters::new()).await {
        Ok(counters) => report(counters.summary_row()),
        Err(e) => error!("{}", e),
    }
}

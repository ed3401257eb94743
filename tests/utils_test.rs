use std::time::Duration;

use plistkit::{
    Error,
    cli::FeatureArgs,
    config::{MAX_ITEMS_PER_CALL, Settings},
    engine::{Attribute, Bound, RunCounters},
    pipeline::{Run, Stage, YearRange},
    utils::*,
};
use tabled::Table;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should be deterministic - same input produces same output
    assert_eq!(challenge, generate_code_challenge(verifier));

    // Different input should produce different output
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // SHA-256 digest, base64 URL-safe without padding
    assert_eq!(challenge.len(), 43);
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_generate_code_challenge_known_vector() {
    assert_eq!(
        generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"),
        "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
    );
}

#[test]
fn test_encode_query_value() {
    assert_eq!(encode_query_value("abc-._~123"), "abc-._~123");
    assert_eq!(
        encode_query_value("http://127.0.0.1:8888/callback"),
        "http%3A%2F%2F127.0.0.1%3A8888%2Fcallback"
    );
    assert_eq!(
        encode_query_value("user-library-read playlist-modify-public"),
        "user-library-read%20playlist-modify-public"
    );
    assert_eq!(encode_query_value("café&x=1"), "caf%C3%A9%26x%3D1");
}

#[test]
fn test_build_authorize_url() {
    let url = build_authorize_url(
        "https://accounts.spotify.com/authorize",
        "client",
        "http://127.0.0.1:8888/callback",
        "challenge",
        "user-library-read playlist-read-private",
    );

    assert!(url.starts_with("https://accounts.spotify.com/authorize?client_id=client&"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8888%2Fcallback"));
    assert!(url.contains("code_challenge=challenge&code_challenge_method=S256"));
    assert!(url.ends_with("scope=user-library-read%20playlist-read-private"));
}

#[test]
fn test_track_uri() {
    assert_eq!(
        track_uri("4uLU6hMCjMI75M1A2tKUQC"),
        "spotify:track:4uLU6hMCjMI75M1A2tKUQC"
    );
    assert_eq!(
        track_uri("spotify:track:4uLU6hMCjMI75M1A2tKUQC"),
        "spotify:track:4uLU6hMCjMI75M1A2tKUQC"
    );
}

#[test]
fn test_settings_defaults() {
    let settings = Settings::default();

    assert_eq!(settings.batch_size, 50);
    assert_eq!(settings.pacing, Duration::from_millis(500));
    assert!(settings.validate().is_ok());
}

#[test]
fn test_settings_resolve_prefers_overrides() {
    let settings = Settings::resolve(Some(20), Some(0)).unwrap();

    assert_eq!(settings.batch_size, 20);
    assert_eq!(settings.pacing, Duration::ZERO);
}

#[test]
fn test_settings_reject_out_of_range_batch_size() {
    assert!(matches!(
        Settings::resolve(Some(0), Some(0)),
        Err(Error::Configuration(_))
    ));
    assert!(matches!(
        Settings::resolve(Some(MAX_ITEMS_PER_CALL + 1), Some(0)),
        Err(Error::Configuration(_))
    ));
    assert!(Settings::resolve(Some(MAX_ITEMS_PER_CALL), Some(0)).is_ok());
}

#[test]
fn test_year_range_validation() {
    assert!(YearRange::new(1990, 1999).validate().is_ok());
    assert!(YearRange::new(0, 2100).validate().is_ok());
    assert!(YearRange::new(2005, 2005).validate().is_ok());

    assert!(YearRange::new(-1, 1999).validate().is_err());
    assert!(YearRange::new(1990, 2101).validate().is_err());
    assert!(YearRange::new(2000, 1999).validate().is_err());
}

#[test]
fn test_year_range_playlist_name() {
    assert_eq!(YearRange::new(1990, 1999).playlist_name(), "My tracks 1990-1999");
}

#[test]
fn test_stages_are_ordered() {
    assert!(Stage::Init < Stage::Authorizing);
    assert!(Stage::Authorizing < Stage::Paginating);
    assert!(Stage::Paginating < Stage::Draining);
    assert!(Stage::Draining < Stage::Done);
    assert_eq!(Stage::Paginating.to_string(), "paginating");
}

#[test]
fn test_run_moves_forward_and_returns_counters() {
    let mut counters = RunCounters::new();
    counters.examine();
    counters.accept(1);

    let mut run = Run::start(counters);
    assert_eq!(run.stage(), Stage::Init);

    run.advance(Stage::Authorizing);
    run.advance(Stage::Paginating);
    assert_eq!(run.stage(), Stage::Paginating);
    assert_eq!(run.counters().examined, 1);

    let finished = run.finish();
    assert_eq!(finished, counters);
}

#[test]
fn test_run_counters_summary_row() {
    let mut counters = RunCounters::new();
    counters.examine();
    counters.examine();
    counters.accept(1);
    counters.reject();

    let row = counters.summary_row();
    assert_eq!(row.examined, 2);
    assert_eq!(row.added, 1);
    assert_eq!(row.skipped, 1);
}

#[test]
fn test_cleanup_summary_counts_playlists() {
    let mut counters = RunCounters::new();
    counters.examine();
    counters.examine();
    counters.accept(1);
    counters.reject();

    let row = counters.cleanup_row();
    assert_eq!(row.cleaned, 1);

    let rendered = Table::new(vec![row]).to_string();
    assert!(rendered.contains("cleaned"));
    assert!(!rendered.contains("added"));
    assert!(Table::new(vec![counters.summary_row()]).to_string().contains("added"));
}

#[test]
fn test_feature_args_bounds_in_catalogue_order() {
    let args = FeatureArgs {
        max_tempo: Some(130.0),
        min_tempo: Some(120.0),
        min_energy: Some(0.8),
        min_loudness: Some(-10.0),
        max_key: Some(5),
        ..Default::default()
    };

    assert_eq!(
        args.bounds(),
        vec![
            Bound::min(Attribute::Energy, 0.8),
            Bound::max(Attribute::Key, 5.0),
            Bound::min(Attribute::Loudness, -10.0),
            Bound::min(Attribute::Tempo, 120.0),
            Bound::max(Attribute::Tempo, 130.0),
        ]
    );
}

#[test]
fn test_feature_args_without_flags_is_rejected() {
    let args = FeatureArgs::default();

    assert!(args.bounds().is_empty());
    assert!(matches!(args.filter(), Err(Error::Configuration(_))));
}

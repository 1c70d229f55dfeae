use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use std::collections::HashMap;
use std::io::Cursor;
use synoid_genre::dataset::MovieRecord;
use synoid_genre::posters::{
    enrich, DownloadStatus, EnrichOutcome, EnrichReport, PosterFetcher, PosterLookup, SkipReason,
    TargetSize,
};
use synoid_genre::training::ForestConfig;
use synoid_genre::{run_on_records, GenreConfig};

/// Stand-in for the metadata API plus the poster host it points at.
async fn metadata(
    State(base): State<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match params.get("i").map(String::as_str) {
        Some("tt503") => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        Some("ttNA") => Json(serde_json::json!({ "Poster": "N/A" })).into_response(),
        Some("ttNoField") => Json(serde_json::json!({ "Title": "Untitled" })).into_response(),
        Some("ttBroken") => {
            Json(serde_json::json!({ "Poster": format!("{}/missing.png", base) })).into_response()
        }
        Some(_) => Json(serde_json::json!({ "Poster": format!("{}/poster.png", base) })).into_response(),
        None => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn poster() -> impl IntoResponse {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(50, 74, Rgb([20, 120, 220])));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageOutputFormat::Png).unwrap();
    ([(header::CONTENT_TYPE, "image/png")], bytes.into_inner())
}

async fn spawn_mock_api() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let app = Router::new()
        .route("/", get(metadata))
        .route("/poster.png", get(poster))
        .with_state(base.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    base
}

fn fetcher(root: &std::path::Path, api_url: String) -> PosterFetcher {
    let config = GenreConfig {
        data_root: root.to_path_buf(),
        api_url: format!("{}/", api_url),
        rate_limit_pause_ms: 0,
        ..GenreConfig::default()
    };
    PosterFetcher::new(&config).unwrap()
}

#[tokio::test]
async fn test_download_server_error() {
    let base = spawn_mock_api().await;
    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher(dir.path(), base);

    let status = fetcher.download("tt503").await.unwrap();
    assert_eq!(status, DownloadStatus::ServerError);
    assert_eq!(status.code(), 2);
    assert!(!fetcher.cache_path("tt503").exists());
}

#[tokio::test]
async fn test_download_no_poster() {
    let base = spawn_mock_api().await;
    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher(dir.path(), base);

    let status = fetcher.download("ttNA").await.unwrap();
    assert_eq!(status.code(), 1);

    let status = fetcher.download("ttNoField").await.unwrap();
    assert_eq!(status, DownloadStatus::NoPoster);
    assert!(!fetcher.cache_path("ttNA").exists());
}

#[tokio::test]
async fn test_download_poster_fetch_failed() {
    let base = spawn_mock_api().await;
    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher(dir.path(), base);

    let status = fetcher.download("ttBroken").await.unwrap();
    assert_eq!(status, DownloadStatus::FetchFailed);
    assert_eq!(status.code(), 3);
}

#[tokio::test]
async fn test_download_success_writes_cache() {
    let base = spawn_mock_api().await;
    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher(dir.path(), base);

    let status = fetcher.download("tt0111161").await.unwrap();
    assert_eq!(status.code(), 0);

    let cached = dir.path().join("images").join("tt0111161.jpg");
    assert!(cached.is_file());
    let img = image::open(&cached).unwrap();
    assert_eq!((img.width(), img.height()), (50, 74));
}

#[tokio::test]
async fn test_lookup_with_network_downloads_then_reads_cache() {
    let base = spawn_mock_api().await;
    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher(dir.path(), base);

    match fetcher.lookup("tt0068646", true).await.unwrap() {
        PosterLookup::Found(img) => assert_eq!(img.width(), 50),
        other => panic!("expected a poster, got {:?}", other),
    }

    match fetcher.lookup("tt503", true).await.unwrap() {
        PosterLookup::DownloadFailed(status) => assert_eq!(status, DownloadStatus::ServerError),
        other => panic!("expected a failed download, got {:?}", other),
    }

    // cached now, so no network needed
    assert!(fetcher.fetch("tt0068646", false).await.unwrap().is_some());
}

#[tokio::test]
async fn test_enrich_with_network_reports_each_download_outcome() {
    let base = spawn_mock_api().await;
    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher(dir.path(), base);
    let movies = vec![
        MovieRecord::new("Drama|Crime", "The Shawshank Redemption", "tt0111161"),
        MovieRecord::new("Horror", "Overloaded", "tt503"),
        MovieRecord::new("Comedy", "Posterless", "ttNA"),
        MovieRecord::new("Western", "Dead Link", "ttBroken"),
    ];

    let outcomes = enrich(&fetcher, &movies, true).await;
    assert_eq!(outcomes.len(), 4);
    match &outcomes[0] {
        EnrichOutcome::Enriched(record) => {
            assert_eq!(record.movie, movies[0]);
            assert_eq!(record.poster.width(), 50);
        }
        other => panic!("expected an enriched record, got {:?}", other),
    }

    let report = EnrichReport::from_outcomes(outcomes);
    assert_eq!(report.enriched.len(), 1);
    assert_eq!(
        report.skipped,
        vec![
            ("tt503".to_string(), SkipReason::DownloadFailed(DownloadStatus::ServerError)),
            ("ttNA".to_string(), SkipReason::DownloadFailed(DownloadStatus::NoPoster)),
            ("ttBroken".to_string(), SkipReason::DownloadFailed(DownloadStatus::FetchFailed)),
        ]
    );
    assert!(dir.path().join("images").join("tt0111161.jpg").is_file());
}

#[tokio::test]
async fn test_runner_downloads_missing_posters_when_allowed() {
    let base = spawn_mock_api().await;
    let dir = tempfile::tempdir().unwrap();
    let config = GenreConfig {
        data_root: dir.path().to_path_buf(),
        api_url: format!("{}/", base),
        rate_limit_pause_ms: 0,
        allow_network: true,
        target_size: TargetSize::new(12, 8),
        forest: ForestConfig {
            n_estimators: 5,
            random_seed: Some(3),
            ..ForestConfig::default()
        },
        ..GenreConfig::default()
    };
    let movies = vec![
        MovieRecord::new("Drama", "One", "tt0000101"),
        MovieRecord::new("Drama|Romance", "Two", "tt0000102"),
        MovieRecord::new("Action", "Down", "tt503"),
    ];

    let run = run_on_records(&config, &movies).await.unwrap();
    assert_eq!(run.report.enriched, 2);
    assert_eq!(
        run.report.skipped,
        vec![("tt503".to_string(), SkipReason::DownloadFailed(DownloadStatus::ServerError))]
    );
    assert_eq!(run.report.vocabulary, vec!["Drama", "Romance"]);
    assert!(dir.path().join("images").join("tt0000102.jpg").is_file());
}

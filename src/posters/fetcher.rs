// SYNOID Poster Fetcher - Cache + OMDb Download
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Posters are cached at <cache_dir>/<imdb_title>.jpg. On a miss, and only
// when the caller allows network access, one download attempt is made:
// 1. Ask the metadata API for the title's poster URL
// 2. Fetch and decode the poster
// 3. Write it to the cache and pause briefly for the API's rate limit
// There are no retries.

use crate::config::GenreConfig;
use crate::error::{GenreError, Result};
use image::{DynamicImage, ImageFormat};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

/// Sentinel the API returns when it has no poster for a title.
pub const NO_POSTER_SENTINEL: &str = "N/A";

/// Outcome of a single download attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStatus {
    Success,
    /// The API answered but had no poster URL for the title.
    NoPoster,
    /// The API answered with a non-200 status, or could not be reached.
    ServerError,
    /// The poster URL itself could not be fetched or decoded.
    FetchFailed,
}

impl DownloadStatus {
    pub fn code(&self) -> u8 {
        match self {
            DownloadStatus::Success => 0,
            DownloadStatus::NoPoster => 1,
            DownloadStatus::ServerError => 2,
            DownloadStatus::FetchFailed => 3,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DownloadStatus::Success)
    }
}

impl std::fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DownloadStatus::Success => "success",
            DownloadStatus::NoPoster => "no poster available",
            DownloadStatus::ServerError => "server error",
            DownloadStatus::FetchFailed => "fetch failed",
        };
        write!(f, "{} ({})", label, self.code())
    }
}

/// Result of looking a title up in the cache.
#[derive(Debug, Clone)]
pub enum PosterLookup {
    Found(DynamicImage),
    NotCached,
    DownloadFailed(DownloadStatus),
}

pub struct PosterFetcher {
    client: reqwest::Client,
    cache_dir: PathBuf,
    api_url: String,
    api_key: Option<String>,
    pause: Duration,
}

impl PosterFetcher {
    pub fn new(config: &GenreConfig) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder().build()?,
            cache_dir: config.image_cache_dir(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            pause: config.rate_limit_pause(),
        })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Deterministic cache location for a title.
    pub fn cache_path(&self, imdb_title: &str) -> PathBuf {
        self.cache_dir
            .join(format!("{}.jpg", sanitize_title(imdb_title)))
    }

    /// Return the cached poster, downloading it first if allowed.
    ///
    /// `Ok(None)` means no poster is available: not cached with network
    /// disallowed, or the download attempt failed. A cache file that fails
    /// to decode is an error.
    pub async fn fetch(&self, imdb_title: &str, allow_network: bool) -> Result<Option<DynamicImage>> {
        match self.lookup(imdb_title, allow_network).await? {
            PosterLookup::Found(poster) => Ok(Some(poster)),
            PosterLookup::NotCached | PosterLookup::DownloadFailed(_) => Ok(None),
        }
    }

    /// Like [`fetch`](Self::fetch) but keeps the reason a poster is missing.
    pub async fn lookup(&self, imdb_title: &str, allow_network: bool) -> Result<PosterLookup> {
        let path = self.cache_path(imdb_title);

        if !path.is_file() {
            if !allow_network {
                debug!("[FETCH] Cache miss for {} (network disabled)", imdb_title);
                return Ok(PosterLookup::NotCached);
            }

            let status = self.download(imdb_title).await?;
            if !status.is_success() {
                return Ok(PosterLookup::DownloadFailed(status));
            }
        }

        // decoder follows the file content, not the .jpg extension
        let poster = image::io::Reader::open(&path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| GenreError::CorruptCache {
                path: path.clone(),
                message: e.to_string(),
            })?;
        Ok(PosterLookup::Found(poster))
    }

    /// One download attempt into the cache. Only local filesystem failures
    /// are errors; every remote failure is a `DownloadStatus`.
    pub async fn download(&self, imdb_title: &str) -> Result<DownloadStatus> {
        info!("[FETCH] Requesting poster metadata for {}", imdb_title);

        let mut query: Vec<(&str, &str)> = vec![("i", imdb_title)];
        if let Some(key) = self.api_key.as_deref() {
            query.push(("apikey", key));
        }

        let response = match self.client.get(&self.api_url).query(&query).send().await {
            Ok(resp) => resp,
            Err(e) => {
                error!("[FETCH] Metadata request failed for {}: {}", imdb_title, e);
                return Ok(DownloadStatus::ServerError);
            }
        };

        if response.status() != reqwest::StatusCode::OK {
            error!("[FETCH] Response from server: {}", response.status());
            return Ok(DownloadStatus::ServerError);
        }

        let metadata: serde_json::Value = match response.json().await {
            Ok(json) => json,
            Err(e) => {
                warn!("[FETCH] Unreadable metadata for {}: {}", imdb_title, e);
                return Ok(DownloadStatus::NoPoster);
            }
        };

        let poster_url = match metadata["Poster"].as_str() {
            Some(url) if url != NO_POSTER_SENTINEL => url.to_string(),
            _ => {
                warn!("[FETCH] No poster URL returned from server for title {}", imdb_title);
                return Ok(DownloadStatus::NoPoster);
            }
        };

        let poster = match self.fetch_poster(&poster_url).await {
            Ok(img) => img,
            Err(reason) => {
                error!("[FETCH] Poster download failed for {}: {}", imdb_title, reason);
                return Ok(DownloadStatus::FetchFailed);
            }
        };

        fs::create_dir_all(&self.cache_dir)?;
        let path = self.cache_path(imdb_title);
        // JPEG has no alpha channel
        DynamicImage::ImageRgb8(poster.to_rgb8()).save_with_format(&path, ImageFormat::Jpeg)?;
        info!("[FETCH] ✅ Cached poster for {} at {:?}", imdb_title, path);

        tokio::time::sleep(self.pause).await;
        Ok(DownloadStatus::Success)
    }

    async fn fetch_poster(&self, poster_url: &str) -> std::result::Result<DynamicImage, String> {
        let url = Url::parse(poster_url).map_err(|e| format!("invalid poster URL '{}': {}", poster_url, e))?;

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !resp.status().is_success() {
            return Err(format!("poster host returned {}", resp.status()));
        }

        let bytes = resp.bytes().await.map_err(|e| e.to_string())?;
        image::load_from_memory(&bytes).map_err(|e| e.to_string())
    }
}

/// Keep the title from escaping the cache directory. Path separators are
/// percent-escaped (and `%` itself), so distinct titles never share a file.
fn sanitize_title(imdb_title: &str) -> String {
    let mut name = String::with_capacity(imdb_title.len());
    for c in imdb_title.chars() {
        match c {
            '%' => name.push_str("%25"),
            '/' => name.push_str("%2F"),
            '\\' => name.push_str("%5C"),
            '\0' => name.push_str("%00"),
            _ => name.push(c),
        }
    }
    name
}

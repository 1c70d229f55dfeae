// SYNOID Poster Pipeline
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Attaches posters to movie records and normalizes them. Every input record
// produces exactly one outcome, so a missing poster is always visible to
// the caller instead of silently shrinking the dataset.

use crate::dataset::record::{MovieRecord, NormalizedRecord, PosterRecord};
use crate::error::Result;
use crate::posters::fetcher::{DownloadStatus, PosterFetcher, PosterLookup};
use crate::posters::normalizer::{normalize_image, TargetSize};
use rayon::prelude::*;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No cached poster and network access was not allowed.
    NotCached,
    /// A download was attempted and failed.
    DownloadFailed(DownloadStatus),
    /// The poster exists but could not be read.
    Unreadable(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotCached => write!(f, "not cached"),
            SkipReason::DownloadFailed(status) => write!(f, "download failed: {}", status),
            SkipReason::Unreadable(msg) => write!(f, "unreadable: {}", msg),
        }
    }
}

#[derive(Debug, Clone)]
pub enum EnrichOutcome {
    Enriched(PosterRecord),
    Skipped { imdb_title: String, reason: SkipReason },
}

/// Enrichment results split by outcome.
#[derive(Debug, Default)]
pub struct EnrichReport {
    pub enriched: Vec<PosterRecord>,
    pub skipped: Vec<(String, SkipReason)>,
}

impl EnrichReport {
    pub fn from_outcomes(outcomes: Vec<EnrichOutcome>) -> Self {
        let mut report = Self::default();
        for outcome in outcomes {
            match outcome {
                EnrichOutcome::Enriched(record) => report.enriched.push(record),
                EnrichOutcome::Skipped { imdb_title, reason } => {
                    report.skipped.push((imdb_title, reason))
                }
            }
        }

        if !report.skipped.is_empty() {
            warn!(
                "[POSTERS] ⚠️ {} of {} movies have no poster and were left out",
                report.skipped.len(),
                report.skipped.len() + report.enriched.len()
            );
        }
        report
    }

    pub fn skipped_titles(&self) -> Vec<&str> {
        self.skipped.iter().map(|(title, _)| title.as_str()).collect()
    }
}

/// Look up a poster for each record. Records are fetched one at a time;
/// the inputs are cloned, never modified.
pub async fn enrich(
    fetcher: &PosterFetcher,
    records: &[MovieRecord],
    allow_network: bool,
) -> Vec<EnrichOutcome> {
    info!(
        "[POSTERS] Loading posters for {} movies (network: {})",
        records.len(),
        allow_network
    );

    let mut outcomes = Vec::with_capacity(records.len());
    for record in records {
        let skipped = |reason| EnrichOutcome::Skipped {
            imdb_title: record.imdb_title.clone(),
            reason,
        };
        let outcome = match fetcher.lookup(&record.imdb_title, allow_network).await {
            Ok(PosterLookup::Found(poster)) => EnrichOutcome::Enriched(PosterRecord {
                movie: record.clone(),
                poster,
            }),
            Ok(PosterLookup::NotCached) => skipped(SkipReason::NotCached),
            Ok(PosterLookup::DownloadFailed(status)) => skipped(SkipReason::DownloadFailed(status)),
            Err(e) => {
                warn!("[POSTERS] Skipping {}: {}", record.imdb_title, e);
                skipped(SkipReason::Unreadable(e.to_string()))
            }
        };
        outcomes.push(outcome);
    }
    outcomes
}

/// Resize and flatten every poster.
pub fn normalize(records: Vec<PosterRecord>, size: TargetSize) -> Result<Vec<NormalizedRecord>> {
    records
        .into_par_iter()
        .map(|record| {
            let (normalized_poster, flattened_poster) = normalize_image(&record.poster, size)?;
            Ok(NormalizedRecord {
                movie: record.movie,
                poster: record.poster,
                normalized_poster,
                flattened_poster,
            })
        })
        .collect()
}

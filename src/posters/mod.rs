// SYNOID Poster Modules
// Copyright (c) 2026 Xing_The_Creator | SYNOID

pub mod fetcher;
pub mod normalizer;
pub mod pipeline;

pub use fetcher::{DownloadStatus, PosterFetcher, PosterLookup};
pub use normalizer::{normalize_image, TargetSize};
pub use pipeline::{enrich, normalize, EnrichOutcome, EnrichReport, SkipReason};

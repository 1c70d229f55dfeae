// SYNOID Genre
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Movie poster genre classification: dataset loading, poster caching and
// download, image normalization, and a multi-label forest classifier.

pub mod config;
pub mod dataset;
pub mod error;
pub mod pipeline;
pub mod posters;
pub mod telemetry;
pub mod training;

pub use config::GenreConfig;
pub use error::{GenreError, Result};
pub use pipeline::{run_on_records, run_pipeline, PipelineReport, TrainedPipeline};

// SYNOID Genre Errors
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenreError>;

#[derive(Debug, Error)]
pub enum GenreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset format error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset format error: required column '{0}' is missing")]
    MissingColumn(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Cached poster at {path:?} could not be decoded: {message}")]
    CorruptCache { path: PathBuf, message: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Empty input: {0}")]
    EmptyDataset(String),

    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Invalid fold count {folds} for {samples} samples")]
    InvalidFolds { folds: usize, samples: usize },

    #[error("Training failed: {0}")]
    Training(String),
}

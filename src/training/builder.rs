// SYNOID Training Set Builder
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use crate::dataset::record::NormalizedRecord;
use crate::error::{GenreError, Result};
use crate::training::codec::LabelCodec;
use ndarray::Array2;
use tracing::info;

/// Feature matrix, indicator matrix, and the codec that produced the indicators.
#[derive(Debug, Clone)]
pub struct TrainingSet {
    /// One flattened poster per row.
    pub x: Array2<f64>,
    /// One genre indicator row per poster, columns in `codec` order.
    pub y: Array2<u8>,
    pub codec: LabelCodec,
}

impl TrainingSet {
    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }
}

pub fn build_training_set(records: &[NormalizedRecord]) -> Result<TrainingSet> {
    let first = records
        .first()
        .ok_or_else(|| GenreError::EmptyDataset("no normalized records to train on".to_string()))?;
    let n_features = first.flattened_poster.len();

    let mut flat = Vec::with_capacity(records.len() * n_features);
    for record in records {
        if record.flattened_poster.len() != n_features {
            return Err(GenreError::ShapeMismatch {
                expected: n_features,
                actual: record.flattened_poster.len(),
            });
        }
        flat.extend_from_slice(&record.flattened_poster);
    }

    let x = Array2::from_shape_vec((records.len(), n_features), flat)
        .map_err(|e| GenreError::Training(e.to_string()))?;

    let genres: Vec<Vec<String>> = records.iter().map(|r| r.movie.genres.clone()).collect();
    let codec = LabelCodec::fit(&genres);
    let y = codec.encode(&genres);

    info!(
        "[TRAINING] Built training set: {} samples x {} features, {} genres",
        x.nrows(),
        x.ncols(),
        codec.n_classes()
    );

    Ok(TrainingSet { x, y, codec })
}

// SYNOID Genre Estimator Traits
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// The seam between the pipeline and whatever classifier does the learning.
// An estimator is an unfitted configuration; fitting it yields a model.
// Cross-validation refits the same estimator once per fold.

use crate::error::{GenreError, Result};
use ndarray::Array2;
use tracing::info;

pub trait MultiLabelEstimator {
    type Model: MultiLabelModel;

    /// Fit on `x` (samples x features) against `y` (samples x labels, 0/1).
    fn fit(&self, x: &Array2<f64>, y: &Array2<u8>) -> Result<Self::Model>;
}

pub trait MultiLabelModel {
    /// Predict one 0/1 indicator row per input row.
    fn predict(&self, x: &Array2<f64>) -> Result<Array2<u8>>;
}

/// Fit `estimator` on the full training arrays.
pub fn train<E: MultiLabelEstimator>(
    x: &Array2<f64>,
    y: &Array2<u8>,
    estimator: &E,
) -> Result<E::Model> {
    check_shapes(x, y)?;
    info!(
        "[TRAINING] Fitting classifier on {} samples, {} labels",
        x.nrows(),
        y.ncols()
    );
    estimator.fit(x, y)
}

pub(crate) fn check_shapes(x: &Array2<f64>, y: &Array2<u8>) -> Result<()> {
    if x.nrows() == 0 {
        return Err(GenreError::EmptyDataset("training matrix has no rows".to_string()));
    }
    if x.nrows() != y.nrows() {
        return Err(GenreError::ShapeMismatch {
            expected: x.nrows(),
            actual: y.nrows(),
        });
    }
    Ok(())
}

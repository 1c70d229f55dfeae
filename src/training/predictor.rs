// SYNOID Genre Predictor
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Single-poster inference. The image goes through the same normalization
// as the training posters, so the target size must match training.

use crate::error::{GenreError, Result};
use crate::posters::normalizer::{normalize_image, TargetSize};
use crate::training::codec::LabelCodec;
use crate::training::estimator::MultiLabelModel;
use image::DynamicImage;
use ndarray::Array2;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

/// Predict the genre set for one poster.
pub fn predict_genres<M: MultiLabelModel>(
    image: &DynamicImage,
    model: &M,
    codec: &LabelCodec,
    target_size: TargetSize,
) -> Result<BTreeSet<String>> {
    let (_, flat) = normalize_image(image, target_size)?;
    let x = Array2::from_shape_vec((1, flat.len()), flat)
        .map_err(|e| GenreError::Training(e.to_string()))?;

    let y = model.predict(&x)?;
    if y.ncols() != codec.n_classes() {
        return Err(GenreError::ShapeMismatch {
            expected: codec.n_classes(),
            actual: y.ncols(),
        });
    }

    let genres = codec.decode_row(y.row(0));
    info!("[PREDICT] 🎬 Predicted genres: {:?}", genres);
    Ok(genres)
}

pub fn load_image_from_path(path: &Path) -> Result<DynamicImage> {
    Ok(image::open(path)?)
}

/// A fitted model bundled with the codec and size it was trained with.
pub struct GenreClassifier<M> {
    model: M,
    codec: LabelCodec,
    target_size: TargetSize,
}

impl<M: MultiLabelModel> GenreClassifier<M> {
    pub fn new(model: M, codec: LabelCodec, target_size: TargetSize) -> Self {
        Self {
            model,
            codec,
            target_size,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn codec(&self) -> &LabelCodec {
        &self.codec
    }

    pub fn predict(&self, image: &DynamicImage) -> Result<BTreeSet<String>> {
        predict_genres(image, &self.model, &self.codec, self.target_size)
    }

    pub fn predict_path(&self, path: &Path) -> Result<BTreeSet<String>> {
        self.predict(&load_image_from_path(path)?)
    }
}

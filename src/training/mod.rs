// SYNOID Genre Training Modules
// Copyright (c) 2026 Xing_The_Creator | SYNOID

pub mod builder;
pub mod codec;
pub mod estimator;
pub mod evaluation;
pub mod forest;
pub mod predictor;

pub use builder::{build_training_set, TrainingSet};
pub use codec::LabelCodec;
pub use estimator::{train, MultiLabelEstimator, MultiLabelModel};
pub use evaluation::{evaluate, hamming_loss};
pub use forest::{ForestConfig, MaxFeatures, RandomForest};
pub use predictor::{load_image_from_path, predict_genres, GenreClassifier};

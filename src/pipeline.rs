// SYNOID Genre Pipeline Runner
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Load -> enrich -> normalize -> build -> train -> evaluate, in one call.

use crate::config::GenreConfig;
use crate::dataset::record::PosterRecord;
use crate::dataset::{load_dataset, MovieRecord};
use crate::posters::{enrich, normalize, EnrichReport, PosterFetcher, SkipReason};
use crate::training::{build_training_set, evaluate, train, GenreClassifier, RandomForest};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub total_records: usize,
    pub enriched: usize,
    pub skipped: Vec<(String, SkipReason)>,
    /// Genre vocabulary in indicator column order.
    pub vocabulary: Vec<String>,
    pub oob_score: Option<f64>,
    /// `None` when there were fewer samples than folds.
    pub cv_score: Option<f64>,
}

pub struct TrainedPipeline {
    pub report: PipelineReport,
    pub classifier: GenreClassifier<RandomForest>,
}

/// Run the whole pipeline on the CSV at `dataset_path`.
pub async fn run_pipeline(config: &GenreConfig, dataset_path: &Path) -> Result<TrainedPipeline> {
    let records = load_dataset(dataset_path)
        .with_context(|| format!("failed to load dataset {:?}", dataset_path))?;
    run_on_records(config, &records).await
}

/// Run everything after loading on records already in memory.
///
/// Posters are fetched on the runtime; normalization, training and
/// cross-validation run on the blocking pool so other tasks keep going.
pub async fn run_on_records(config: &GenreConfig, records: &[MovieRecord]) -> Result<TrainedPipeline> {
    info!("[PIPELINE] 🚀 Starting genre pipeline on {} movies", records.len());

    config.validate().context("invalid pipeline config")?;
    let fetcher = PosterFetcher::new(config).context("failed to build poster fetcher")?;
    let outcomes = enrich(&fetcher, records, config.allow_network).await;
    let EnrichReport { enriched, skipped } = EnrichReport::from_outcomes(outcomes);
    let enriched_count = enriched.len();

    let training_config = config.clone();
    let (classifier, oob_score, cv_score) =
        tokio::task::spawn_blocking(move || fit_and_score(&training_config, enriched))
            .await
            .context("training task panicked or was cancelled")??;

    let report = PipelineReport {
        total_records: records.len(),
        enriched: enriched_count,
        skipped,
        vocabulary: classifier.codec().classes().to_vec(),
        oob_score,
        cv_score,
    };
    info!(
        "[PIPELINE] ✅ Trained on {} of {} movies ({} genres)",
        report.enriched,
        report.total_records,
        report.vocabulary.len()
    );

    Ok(TrainedPipeline { report, classifier })
}

type Fitted = (GenreClassifier<RandomForest>, Option<f64>, Option<f64>);

/// Normalize, build, train and cross-validate. CPU-bound.
fn fit_and_score(config: &GenreConfig, enriched: Vec<PosterRecord>) -> Result<Fitted> {
    let normalized =
        normalize(enriched, config.target_size).context("failed to normalize posters")?;
    let set = build_training_set(&normalized).context("failed to build training set")?;

    let model = train(&set.x, &set.y, &config.forest).context("failed to train classifier")?;
    let oob_score = model.oob_score();

    let cv_score = if set.n_samples() >= config.cv_folds {
        Some(
            evaluate(&set.x, &set.y, &config.forest, config.cv_folds)
                .context("cross-validation failed")?,
        )
    } else {
        warn!(
            "[PIPELINE] Skipping cross-validation: {} samples for {} folds",
            set.n_samples(),
            config.cv_folds
        );
        None
    };

    Ok((
        GenreClassifier::new(model, set.codec, config.target_size),
        oob_score,
        cv_score,
    ))
}

// SYNOID Genre Forest - Bagged Decision Trees
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Multi-label random forest on top of linfa-trees. Each estimator draws a
// bootstrap sample of rows and a random subspace of features, then fits one
// binary Gini tree per label. Labels are predicted by majority vote across
// estimators; ties go to 0.

use crate::error::{GenreError, Result};
use crate::training::estimator::{check_shapes, MultiLabelEstimator, MultiLabelModel};
use linfa::Dataset;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// How many features each estimator may split on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    /// floor(sqrt(n_features)).
    Sqrt,
    /// A fraction of all features, in (0, 1].
    Fraction(f64),
    All,
}

impl MaxFeatures {
    pub fn resolve(&self, n_features: usize) -> usize {
        let k = match self {
            MaxFeatures::Sqrt => (n_features as f64).sqrt() as usize,
            MaxFeatures::Fraction(f) => (f * n_features as f64) as usize,
            MaxFeatures::All => n_features,
        };
        k.clamp(1, n_features.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    pub n_estimators: usize,
    /// Compute the out-of-bag score while fitting.
    pub oob_score: bool,
    pub max_features: MaxFeatures,
    pub max_depth: Option<usize>,
    pub min_samples_leaf: usize,
    /// Fixed seed for reproducible forests. `None` seeds from entropy.
    pub random_seed: Option<u64>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 50,
            oob_score: true,
            max_features: MaxFeatures::Sqrt,
            max_depth: None,
            min_samples_leaf: 1,
            random_seed: None,
        }
    }
}

/// One bootstrap draw: its feature subspace and a tree per label.
struct TreeBag {
    features: Vec<usize>,
    trees: Vec<DecisionTree<f64, usize>>,
}

impl TreeBag {
    /// Votes for label 1, shape (rows, labels).
    fn votes(&self, x: &Array2<f64>) -> Array2<u32> {
        use linfa::traits::Predict;

        let sub = x.select(Axis(1), &self.features);
        let mut votes = Array2::<u32>::zeros((x.nrows(), self.trees.len()));
        for (label, tree) in self.trees.iter().enumerate() {
            let pred: Array1<usize> = tree.predict(&sub);
            for (row, class) in pred.iter().enumerate() {
                if *class == 1 {
                    votes[[row, label]] += 1;
                }
            }
        }
        votes
    }
}

pub struct RandomForest {
    estimators: Vec<TreeBag>,
    n_features: usize,
    n_labels: usize,
    oob_score: Option<f64>,
}

impl RandomForest {
    pub fn n_estimators(&self) -> usize {
        self.estimators.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_labels(&self) -> usize {
        self.n_labels
    }

    /// Mean per-label accuracy on out-of-bag samples, if it was computed
    /// and at least one sample was ever out of bag.
    pub fn oob_score(&self) -> Option<f64> {
        self.oob_score
    }
}

impl std::fmt::Debug for RandomForest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomForest")
            .field("n_estimators", &self.estimators.len())
            .field("n_features", &self.n_features)
            .field("n_labels", &self.n_labels)
            .field("oob_score", &self.oob_score)
            .finish()
    }
}

impl MultiLabelEstimator for ForestConfig {
    type Model = RandomForest;

    fn fit(&self, x: &Array2<f64>, y: &Array2<u8>) -> Result<RandomForest> {
        check_shapes(x, y)?;
        if self.n_estimators == 0 {
            return Err(GenreError::Training("n_estimators must be at least 1".to_string()));
        }
        if x.ncols() == 0 {
            return Err(GenreError::EmptyDataset("training matrix has no features".to_string()));
        }

        let mut master = match self.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let seeds: Vec<u64> = (0..self.n_estimators).map(|_| master.gen()).collect();
        let k = self.max_features.resolve(x.ncols());

        info!(
            "[FOREST] 🌲 Growing {} estimators x {} labels ({} of {} features each)",
            self.n_estimators,
            y.ncols(),
            k,
            x.ncols()
        );

        let fitted = seeds
            .into_par_iter()
            .map(|seed| self.fit_bag(x, y, k, seed))
            .collect::<Result<Vec<_>>>()?;

        let oob_score = if self.oob_score {
            oob_accuracy(&fitted, x, y)
        } else {
            None
        };
        if let Some(score) = oob_score {
            info!("[FOREST] Out-of-bag score: {:.4}", score);
        }

        Ok(RandomForest {
            estimators: fitted.into_iter().map(|(bag, _)| bag).collect(),
            n_features: x.ncols(),
            n_labels: y.ncols(),
            oob_score,
        })
    }
}

impl ForestConfig {
    /// Fit one estimator. Returns it with the rows it never saw.
    fn fit_bag(
        &self,
        x: &Array2<f64>,
        y: &Array2<u8>,
        k: usize,
        seed: u64,
    ) -> Result<(TreeBag, Vec<usize>)> {
        use linfa::traits::Fit;

        let mut rng = StdRng::seed_from_u64(seed);
        let n = x.nrows();

        let rows: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
        let mut in_bag = vec![false; n];
        for &r in &rows {
            in_bag[r] = true;
        }
        let oob_rows: Vec<usize> = (0..n).filter(|&r| !in_bag[r]).collect();

        let mut features = rand::seq::index::sample(&mut rng, x.ncols(), k).into_vec();
        features.sort_unstable();

        let records = x.select(Axis(0), &rows).select(Axis(1), &features);
        let params = DecisionTree::<f64, usize>::params()
            .split_quality(SplitQuality::Gini)
            .max_depth(self.max_depth)
            .min_weight_leaf(self.min_samples_leaf.max(1) as f32);

        let mut trees = Vec::with_capacity(y.ncols());
        for label in 0..y.ncols() {
            let targets: Array1<usize> = rows.iter().map(|&r| usize::from(y[[r, label]])).collect();
            let dataset = Dataset::new(records.clone(), targets);
            let tree = params
                .fit(&dataset)
                .map_err(|e| GenreError::Training(format!("label {}: {}", label, e)))?;
            trees.push(tree);
        }

        debug!("[FOREST] Estimator fitted ({} out-of-bag rows)", oob_rows.len());
        Ok((TreeBag { features, trees }, oob_rows))
    }
}

impl MultiLabelModel for RandomForest {
    fn predict(&self, x: &Array2<f64>) -> Result<Array2<u8>> {
        if x.ncols() != self.n_features {
            return Err(GenreError::ShapeMismatch {
                expected: self.n_features,
                actual: x.ncols(),
            });
        }

        let votes = self
            .estimators
            .par_iter()
            .map(|bag| bag.votes(x))
            .reduce(|| Array2::zeros((x.nrows(), self.n_labels)), |a, b| a + b);

        Ok(majority(&votes, |_| self.estimators.len() as u32))
    }
}

/// 1 where more than half of `total(row)` voters said 1.
fn majority(votes: &Array2<u32>, total: impl Fn(usize) -> u32) -> Array2<u8> {
    let mut out = Array2::<u8>::zeros(votes.dim());
    for ((row, label), &v) in votes.indexed_iter() {
        out[[row, label]] = u8::from(2 * v > total(row));
    }
    out
}

fn oob_accuracy(fitted: &[(TreeBag, Vec<usize>)], x: &Array2<f64>, y: &Array2<u8>) -> Option<f64> {
    let (n, n_labels) = y.dim();
    if n_labels == 0 {
        return None;
    }

    let mut votes = Array2::<u32>::zeros((n, n_labels));
    let mut counts = vec![0u32; n];
    for (bag, oob_rows) in fitted {
        if oob_rows.is_empty() {
            continue;
        }
        let held_out = x.select(Axis(0), oob_rows);
        let bag_votes = bag.votes(&held_out);
        for (i, &row) in oob_rows.iter().enumerate() {
            counts[row] += 1;
            for label in 0..n_labels {
                votes[[row, label]] += bag_votes[[i, label]];
            }
        }
    }

    let scored: Vec<usize> = (0..n).filter(|&r| counts[r] > 0).collect();
    if scored.is_empty() {
        warn!("[FOREST] No sample was ever out of bag; OOB score unavailable");
        return None;
    }
    if scored.len() < n {
        warn!(
            "[FOREST] Only {} of {} samples were out of bag; OOB score may be unreliable",
            scored.len(),
            n
        );
    }

    let predicted = majority(&votes, |row| counts[row]);
    let accuracy_sum: f64 = (0..n_labels)
        .map(|label| {
            let correct = scored
                .iter()
                .filter(|&&r| predicted[[r, label]] == y[[r, label]])
                .count();
            correct as f64 / scored.len() as f64
        })
        .sum();

    Some(accuracy_sum / n_labels as f64)
}

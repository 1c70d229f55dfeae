// SYNOID Genre Evaluation
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// K-fold cross-validation scored with the Hamming loss. Folds are contiguous
// and unshuffled; the first `n % k` folds take one extra sample.

use crate::error::{GenreError, Result};
use crate::training::estimator::{check_shapes, MultiLabelEstimator, MultiLabelModel};
use ndarray::{Array2, Axis};
use tracing::{debug, info};

/// Fraction of (sample, label) cells where prediction and truth differ.
pub fn hamming_loss(y_true: &Array2<u8>, y_pred: &Array2<u8>) -> Result<f64> {
    if y_true.dim() != y_pred.dim() {
        return Err(GenreError::ShapeMismatch {
            expected: y_true.len(),
            actual: y_pred.len(),
        });
    }
    if y_true.is_empty() {
        return Ok(0.0);
    }
    let wrong = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t != p)
        .count();
    Ok(wrong as f64 / y_true.len() as f64)
}

/// (train, test) row indices for each fold.
pub fn kfold_indices(n_samples: usize, folds: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
    if folds < 2 || folds > n_samples {
        return Err(GenreError::InvalidFolds {
            folds,
            samples: n_samples,
        });
    }

    let base = n_samples / folds;
    let extra = n_samples % folds;
    let mut splits = Vec::with_capacity(folds);
    let mut start = 0;
    for fold in 0..folds {
        let len = base + usize::from(fold < extra);
        let end = start + len;
        let test: Vec<usize> = (start..end).collect();
        let train: Vec<usize> = (0..start).chain(end..n_samples).collect();
        splits.push((train, test));
        start = end;
    }
    Ok(splits)
}

/// Negated Hamming loss per fold, each fold scored by a fresh fit.
pub fn cross_val_scores<E: MultiLabelEstimator>(
    x: &Array2<f64>,
    y: &Array2<u8>,
    estimator: &E,
    folds: usize,
) -> Result<Vec<f64>> {
    check_shapes(x, y)?;
    let splits = kfold_indices(x.nrows(), folds)?;

    let mut scores = Vec::with_capacity(splits.len());
    for (fold, (train, test)) in splits.iter().enumerate() {
        let model = estimator.fit(&x.select(Axis(0), train), &y.select(Axis(0), train))?;
        let predicted = model.predict(&x.select(Axis(0), test))?;
        let loss = hamming_loss(&y.select(Axis(0), test), &predicted)?;
        debug!("[EVAL] Fold {}/{}: hamming loss {:.4}", fold + 1, folds, loss);
        scores.push(-loss);
    }
    Ok(scores)
}

/// `1 + mean(-hamming_loss)` over `folds` folds. 1.0 is perfect.
pub fn evaluate<E: MultiLabelEstimator>(
    x: &Array2<f64>,
    y: &Array2<u8>,
    estimator: &E,
    folds: usize,
) -> Result<f64> {
    info!("[EVAL] 📊 {}-fold cross-validation on {} samples", folds, x.nrows());
    let scores = cross_val_scores(x, y, estimator, folds)?;
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    let score = 1.0 + mean;
    info!("[EVAL] Cross-validated score: {:.4}", score);
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    /// Always predicts one fixed row.
    struct Constant(Array1<u8>);

    impl MultiLabelEstimator for Constant {
        type Model = Constant;
        fn fit(&self, _x: &Array2<f64>, _y: &Array2<u8>) -> Result<Constant> {
            Ok(Constant(self.0.clone()))
        }
    }

    impl MultiLabelModel for Constant {
        fn predict(&self, x: &Array2<f64>) -> Result<Array2<u8>> {
            let mut out = Array2::zeros((x.nrows(), self.0.len()));
            for mut row in out.rows_mut() {
                row.assign(&self.0);
            }
            Ok(out)
        }
    }

    /// Memorizes training rows by their first feature.
    struct Lookup;
    struct LookupModel(Vec<(f64, Vec<u8>)>, usize);

    impl MultiLabelEstimator for Lookup {
        type Model = LookupModel;
        fn fit(&self, x: &Array2<f64>, y: &Array2<u8>) -> Result<LookupModel> {
            let table = x
                .rows()
                .into_iter()
                .zip(y.rows())
                .map(|(xr, yr)| (xr[0], yr.to_vec()))
                .collect();
            Ok(LookupModel(table, y.ncols()))
        }
    }

    impl MultiLabelModel for LookupModel {
        fn predict(&self, x: &Array2<f64>) -> Result<Array2<u8>> {
            let mut out = Array2::zeros((x.nrows(), self.1));
            for (i, xr) in x.rows().into_iter().enumerate() {
                if let Some((_, labels)) = self.0.iter().find(|(k, _)| *k == xr[0]) {
                    for (j, v) in labels.iter().enumerate() {
                        out[[i, j]] = *v;
                    }
                }
            }
            Ok(out)
        }
    }

    #[test]
    fn test_hamming_loss() {
        let t = array![[1u8, 0, 1], [0, 0, 1]];
        let p = array![[1u8, 1, 1], [0, 0, 0]];
        assert!((hamming_loss(&t, &p).unwrap() - 2.0 / 6.0).abs() < 1e-12);
        assert_eq!(hamming_loss(&t, &t).unwrap(), 0.0);
        assert!(hamming_loss(&t, &array![[1u8, 0]]).is_err());
    }

    #[test]
    fn test_kfold_is_contiguous_with_leading_remainder() {
        let splits = kfold_indices(7, 3).unwrap();
        let tests: Vec<Vec<usize>> = splits.iter().map(|(_, t)| t.clone()).collect();
        assert_eq!(tests, vec![vec![0, 1, 2], vec![3, 4], vec![5, 6]]);
        assert_eq!(splits[1].0, vec![0, 1, 2, 5, 6]);
    }

    #[test]
    fn test_invalid_folds() {
        assert!(matches!(
            kfold_indices(4, 1),
            Err(GenreError::InvalidFolds { folds: 1, samples: 4 })
        ));
        assert!(matches!(
            kfold_indices(4, 5),
            Err(GenreError::InvalidFolds { folds: 5, samples: 4 })
        ));
    }

    #[test]
    fn test_constant_predictor_score() {
        // 4 samples, 2 labels; truth label0 = 1 everywhere, label1 = 0 everywhere
        let x = array![[0.0], [1.0], [2.0], [3.0]];
        let y = array![[1u8, 0], [1, 0], [1, 0], [1, 0]];

        let perfect = evaluate(&x, &y, &Constant(array![1, 0]), 2).unwrap();
        assert!((perfect - 1.0).abs() < 1e-12);

        let half = evaluate(&x, &y, &Constant(array![1, 1]), 4).unwrap();
        assert!((half - 0.5).abs() < 1e-12);

        let worst = evaluate(&x, &y, &Constant(array![0, 1]), 2).unwrap();
        assert!(worst.abs() < 1e-12);
    }

    #[test]
    fn test_each_fold_refits_without_its_test_rows() {
        // a memorizer never sees its test rows, so it predicts all zeros
        let x = array![[0.0], [1.0], [2.0], [3.0]];
        let y = array![[1u8], [1], [0], [0]];
        let scores = cross_val_scores(&x, &y, &Lookup, 2).unwrap();
        assert_eq!(scores, vec![-1.0, 0.0]);
        let score = evaluate(&x, &y, &Lookup, 2).unwrap();
        assert!((score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_mismatched_rows_rejected() {
        let x = array![[0.0], [1.0], [2.0]];
        let y = array![[1u8], [0]];
        assert!(matches!(
            evaluate(&x, &y, &Lookup, 2),
            Err(GenreError::ShapeMismatch { .. })
        ));
    }
}

// SYNOID Genre Label Codec
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Multi-label binarizer: genre sets <-> fixed-width 0/1 rows. Column order
// is the sorted vocabulary seen at fit time and never changes afterwards.

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCodec {
    classes: Vec<String>,
}

impl LabelCodec {
    /// Build the vocabulary from every genre in `genre_sets`.
    pub fn fit<S: AsRef<str>>(genre_sets: &[Vec<S>]) -> Self {
        let vocabulary: BTreeSet<&str> = genre_sets
            .iter()
            .flat_map(|set| set.iter().map(AsRef::as_ref))
            .collect();
        Self::from_classes(vocabulary.into_iter().map(str::to_string).collect())
    }

    /// Rebuild a codec from a stored class list.
    pub fn from_classes(mut classes: Vec<String>) -> Self {
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// One row per set. Genres outside the vocabulary are ignored.
    pub fn encode<S: AsRef<str>>(&self, genre_sets: &[Vec<S>]) -> Array2<u8> {
        let mut y = Array2::zeros((genre_sets.len(), self.classes.len()));
        for (row, set) in genre_sets.iter().enumerate() {
            for genre in set {
                match self.column_of(genre.as_ref()) {
                    Some(col) => y[[row, col]] = 1,
                    None => warn!("[CODEC] Ignoring unknown genre '{}'", genre.as_ref()),
                }
            }
        }
        y
    }

    pub fn decode_row(&self, row: ArrayView1<u8>) -> BTreeSet<String> {
        row.iter()
            .zip(&self.classes)
            .filter(|(bit, _)| **bit != 0)
            .map(|(_, class)| class.clone())
            .collect()
    }

    pub fn decode(&self, y: &Array2<u8>) -> Vec<BTreeSet<String>> {
        y.rows().into_iter().map(|row| self.decode_row(row)).collect()
    }

    fn column_of(&self, genre: &str) -> Option<usize> {
        self.classes.binary_search_by(|c| c.as_str().cmp(genre)).ok()
    }
}

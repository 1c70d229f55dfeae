// SYNOID Genre Records
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// A movie moves through three stages: loaded from the dataset, given a
// poster, then normalized. Each stage is its own type so a record can only
// carry image fields once the stage that produces them has run.

use image::{DynamicImage, Rgb32FImage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const GENRE_SEPARATOR: char = '|';

/// One dataset row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub genres: Vec<String>,
    pub movie_title: String,
    /// External identifier and image cache key.
    pub imdb_title: String,
    /// Every other column of the row, untouched.
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl MovieRecord {
    pub fn new(genres: &str, movie_title: &str, imdb_title: &str) -> Self {
        Self {
            genres: split_genres(genres),
            movie_title: movie_title.to_string(),
            imdb_title: imdb_title.to_string(),
            extra: BTreeMap::new(),
        }
    }

    /// Genres joined back into their source cell form.
    pub fn genres_cell(&self) -> String {
        self.genres.join(&GENRE_SEPARATOR.to_string())
    }
}

/// Split a `Action|Adventure|Sci-Fi` cell. An empty cell gives one empty
/// entry, so joining always reconstructs the input.
pub fn split_genres(cell: &str) -> Vec<String> {
    cell.split(GENRE_SEPARATOR).map(str::to_string).collect()
}

/// A movie with its raw decoded poster.
#[derive(Debug, Clone)]
pub struct PosterRecord {
    pub movie: MovieRecord,
    pub poster: DynamicImage,
}

/// A movie whose poster has been resized and flattened for training.
#[derive(Debug, Clone)]
pub struct NormalizedRecord {
    pub movie: MovieRecord,
    pub poster: DynamicImage,
    pub normalized_poster: Rgb32FImage,
    pub flattened_poster: Vec<f64>,
}

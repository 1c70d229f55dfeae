// SYNOID Genre Dataset Loader
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Reads the movie metadata CSV. Required columns: genres, movie_title,
// imdb_title. Anything else is carried through as a string field.

use crate::dataset::record::{split_genres, MovieRecord};
use crate::error::{GenreError, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

pub const REQUIRED_COLUMNS: [&str; 3] = ["genres", "movie_title", "imdb_title"];

/// Load every row of the CSV at `path`, in file order.
pub fn load_dataset(path: &Path) -> Result<Vec<MovieRecord>> {
    info!("[DATASET] Loading movie dataset: {:?}", path);
    // open failures are I/O errors, not format errors
    let file = File::open(path)?;
    let reader = csv::Reader::from_reader(file);
    let movies = read_records(reader)?;
    info!("[DATASET] Loaded {} movies", movies.len());
    Ok(movies)
}

/// Same as [`load_dataset`] but from any reader (files, buffers, stdin).
pub fn load_from_reader<R: Read>(source: R) -> Result<Vec<MovieRecord>> {
    read_records(csv::Reader::from_reader(source))
}

fn read_records<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<MovieRecord>> {
    let headers = reader.headers()?.clone();

    let mut positions = [0usize; 3];
    for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| GenreError::MissingColumn(column.to_string()))?;
    }
    let [genres_at, title_at, imdb_at] = positions;

    let mut movies = Vec::new();
    for row in reader.records() {
        let row = row?;
        let field = |i: usize| row.get(i).unwrap_or_default().to_string();

        let mut extra = BTreeMap::new();
        for (i, name) in headers.iter().enumerate() {
            if i != genres_at && i != title_at && i != imdb_at {
                extra.insert(name.to_string(), field(i));
            }
        }

        movies.push(MovieRecord {
            genres: split_genres(&field(genres_at)),
            movie_title: field(title_at),
            imdb_title: field(imdb_at),
            extra,
        });
    }

    debug!("[DATASET] Parsed {} rows with {} columns", movies.len(), headers.len());
    Ok(movies)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
movie_title,genres,imdb_title,year
Avatar,Action|Adventure|Fantasy|Sci-Fi,tt0499549,2009
Spectre,Action|Adventure|Thriller,tt2379713,2015
Amour,Drama,tt1602620,2012
";

    #[test]
    fn test_loads_rows_in_order() {
        let movies = load_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(movies.len(), 3);
        assert_eq!(movies[0].movie_title, "Avatar");
        assert_eq!(movies[0].imdb_title, "tt0499549");
        assert_eq!(movies[0].genres, vec!["Action", "Adventure", "Fantasy", "Sci-Fi"]);
        assert_eq!(movies[2].genres, vec!["Drama"]);
    }

    #[test]
    fn test_genre_cells_reconstruct() {
        let movies = load_from_reader(SAMPLE.as_bytes()).unwrap();
        let cells: Vec<String> = movies.iter().map(|m| m.genres_cell()).collect();
        assert_eq!(
            cells,
            vec!["Action|Adventure|Fantasy|Sci-Fi", "Action|Adventure|Thriller", "Drama"]
        );
    }

    #[test]
    fn test_extra_columns_pass_through() {
        let movies = load_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(movies[1].extra.get("year").map(String::as_str), Some("2015"));
        assert_eq!(movies[1].extra.len(), 1);
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let csv = "movie_title,genres\nAvatar,Action\n";
        match load_from_reader(csv.as_bytes()) {
            Err(GenreError::MissingColumn(col)) => assert_eq!(col, "imdb_title"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_load_dataset_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.csv");
        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(load_dataset(&path).unwrap().len(), 3);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        match load_dataset(Path::new("__no_such_dataset.csv")) {
            Err(GenreError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected an I/O error, got {:?}", other),
        }
    }
}

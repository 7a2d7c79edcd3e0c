//! Movie catalog loaded from the `movies.csv` / `links.csv` artifacts.
//!
//! The catalog owns the identifier codec: dense indices are assigned in
//! row order of the movie table, which is the same order the similarity
//! matrix was built in.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::codec::IdCodec;
use reelrec_core::error::{Error, Result};
use reelrec_core::types::{MovieId, MovieRecord};

#[derive(Debug, Deserialize)]
struct MovieRow {
    #[serde(rename = "movieId")]
    movie_id: MovieId,
    title: String,
    #[serde(default)]
    genres: String,
}

#[derive(Debug, Deserialize)]
struct LinkRow {
    #[serde(rename = "movieId")]
    movie_id: MovieId,
    #[serde(rename = "tmdbId")]
    tmdb_id: Option<u32>,
}

pub struct Catalog {
    movies: Vec<MovieRecord>,
    codec: IdCodec,
    tmdb_links: HashMap<MovieId, u32>,
}

impl Catalog {
    /// Parse both tables and build the codec. Columns beyond the ones
    /// named in the headers are ignored; a movie without a tmdb link is
    /// fine (it just cannot be enriched).
    pub fn load(movies_csv: &Path, links_csv: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(movies_csv)
            .map_err(|e| Error::Load(format!("open {}: {e}", movies_csv.display())))?;
        let mut movies = Vec::new();
        for row in reader.deserialize() {
            let row: MovieRow =
                row.map_err(|e| Error::Load(format!("parse {}: {e}", movies_csv.display())))?;
            movies.push(MovieRecord {
                movie_id: row.movie_id,
                title: row.title,
                genres: row.genres,
            });
        }
        let codec = IdCodec::from_ids(movies.iter().map(|m| m.movie_id))?;

        let mut reader = csv::Reader::from_path(links_csv)
            .map_err(|e| Error::Load(format!("open {}: {e}", links_csv.display())))?;
        let mut tmdb_links = HashMap::new();
        for row in reader.deserialize() {
            let row: LinkRow =
                row.map_err(|e| Error::Load(format!("parse {}: {e}", links_csv.display())))?;
            if let Some(tmdb_id) = row.tmdb_id {
                tmdb_links.insert(row.movie_id, tmdb_id);
            }
        }

        tracing::info!(
            movies = movies.len(),
            tmdb_links = tmdb_links.len(),
            "catalog loaded"
        );
        Ok(Self { movies, codec, tmdb_links })
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn codec(&self) -> &IdCodec {
        &self.codec
    }

    /// Exact title match; the first row in table order wins when titles
    /// repeat.
    pub fn find_by_title(&self, title: &str) -> Option<MovieId> {
        self.movies.iter().find(|m| m.title == title).map(|m| m.movie_id)
    }

    pub fn title_of(&self, movie_id: MovieId) -> Option<&str> {
        let index = self.codec.encode(movie_id).ok()?;
        self.movies.get(index).map(|m| m.title.as_str())
    }

    pub fn tmdb_id(&self, movie_id: MovieId) -> Option<u32> {
        self.tmdb_links.get(&movie_id).copied()
    }

    pub fn tmdb_links(&self) -> &HashMap<MovieId, u32> {
        &self.tmdb_links
    }
}

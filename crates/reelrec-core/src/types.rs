//! Domain types shared by the store, engine and enrichment crates.

use serde::{Deserialize, Serialize};

/// External movie identifier, as found in the `movieId` column of the
/// catalog artifacts. Opaque to the engine beyond equality.
pub type MovieId = u32;

/// One row of the movie table.
///
/// - `movie_id`: stable external identity
/// - `title`: display title, used for interactive lookup only
/// - `genres`: pipe-separated genre tags, carried verbatim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRecord {
    pub movie_id: MovieId,
    pub title: String,
    pub genres: String,
}

/// A ranked similarity hit in dense-index space.
///
/// `score` is the pairwise similarity; higher is always better. Absent
/// matrix entries surface with a score of zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub score: f32,
}

/// Descriptive metadata for one movie as fetched from the metadata source.
///
/// Every field is independently best-effort: `None` means the source did
/// not have the field, not that the fetch failed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
}

/// A recommended movie together with whatever metadata could be fetched
/// for it. `details: None` means the whole fetch failed for this item;
/// the item itself keeps its rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedMovie {
    pub movie_id: MovieId,
    pub details: Option<MovieDetails>,
}

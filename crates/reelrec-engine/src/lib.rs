//! reelrec-engine
//!
//! The recommender: resolves an external movie id through the catalog's
//! codec, queries a similarity source for the best counterparts and decodes
//! the hits back to movie ids. Holds no mutable state; both collaborators
//! are immutable after load, so one instance serves any number of threads.

use reelrec_core::error::{Error, Result};
use reelrec_core::traits::SimilaritySource;
use reelrec_core::types::MovieId;
use reelrec_store::Catalog;

/// How many recommendations callers get when they do not ask for a count.
pub const DEFAULT_TOP_N: usize = 5;

pub struct Recommender<S: SimilaritySource> {
    catalog: Catalog,
    source: S,
}

impl<S: SimilaritySource> Recommender<S> {
    /// Pair a catalog with a similarity source. The two artifacts must
    /// have been built together; a dimension mismatch means they were
    /// not, and nothing is published.
    pub fn new(catalog: Catalog, source: S) -> Result<Self> {
        if source.dim() != catalog.len() {
            return Err(Error::Load(format!(
                "similarity matrix dimension {} does not match catalog size {}",
                source.dim(),
                catalog.len()
            )));
        }
        Ok(Self { catalog, source })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The up-to-`n` movies most similar to `movie_id`, best first.
    ///
    /// An id absent from the catalog is a normal negative outcome
    /// (`ItemNotFound`); any codec/store disagreement after a successful
    /// encode is an `Integrity` fault and is never papered over.
    pub fn recommend(&self, movie_id: MovieId, n: usize) -> Result<Vec<MovieId>> {
        Ok(self
            .recommend_scored(movie_id, n)?
            .into_iter()
            .map(|(id, _)| id)
            .collect())
    }

    /// Same contract as [`recommend`](Self::recommend), keeping each
    /// hit's similarity score.
    pub fn recommend_scored(&self, movie_id: MovieId, n: usize) -> Result<Vec<(MovieId, f32)>> {
        if n == 0 || self.catalog.len() <= 1 {
            return Ok(Vec::new());
        }

        let query = match self.catalog.codec().encode(movie_id) {
            Ok(index) => index,
            Err(Error::UnknownItem(id)) => return Err(Error::ItemNotFound(id)),
            Err(other) => return Err(other),
        };

        let neighbors = self.source.top_n(query, n).map_err(|e| {
            Error::Integrity(format!("similarity query failed for encoded index {query}: {e}"))
        })?;

        let mut ranked = Vec::with_capacity(neighbors.len());
        for neighbor in neighbors {
            let id = self.catalog.codec().decode(neighbor.index).map_err(|e| {
                Error::Integrity(format!(
                    "similarity matrix produced an index unknown to the catalog: {e}"
                ))
            })?;
            ranked.push((id, neighbor.score));
        }
        tracing::debug!(movie_id, n, returned = ranked.len(), "recommendation served");
        Ok(ranked)
    }
}

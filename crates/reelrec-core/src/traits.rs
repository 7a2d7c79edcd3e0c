use crate::error::Result;
use crate::types::{MovieDetails, MovieId, Neighbor};
use async_trait::async_trait;

/// Read-only source of pairwise similarity in dense-index space.
///
/// Implementations are immutable after construction, so `&self` queries
/// are safe from any number of threads.
pub trait SimilaritySource: Send + Sync {
    /// Number of items the source covers; valid indices are `0..dim()`.
    fn dim(&self) -> usize;

    /// The `n` best-scoring counterparts of `query`, excluding `query`
    /// itself, strictly descending by score with ascending-index
    /// tie-break.
    fn top_n(&self, query: usize, n: usize) -> Result<Vec<Neighbor>>;
}

/// Fetches descriptive metadata for a single movie. Failures are
/// per-item; callers must not let one item's failure affect the rest.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn fetch_metadata(&self, movie_id: MovieId) -> anyhow::Result<MovieDetails>;
}

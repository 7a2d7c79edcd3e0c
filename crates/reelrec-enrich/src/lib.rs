//! reelrec-enrich
//!
//! Best-effort metadata enrichment for recommended movies. Each item is
//! fetched independently; a failure marks that one item unavailable and
//! never drops or reorders the rest.

pub mod tmdb;

pub use tmdb::TmdbProvider;

use reelrec_core::traits::MetadataProvider;
use reelrec_core::types::{EnrichedMovie, MovieId};

/// Fetch metadata for every id, concurrently, preserving rank order.
/// Output length always equals input length.
pub async fn enrich_all<P>(provider: &P, ids: &[MovieId]) -> Vec<EnrichedMovie>
where
    P: MetadataProvider + ?Sized,
{
    let fetches = ids.iter().map(|&movie_id| async move {
        match provider.fetch_metadata(movie_id).await {
            Ok(details) => EnrichedMovie { movie_id, details: Some(details) },
            Err(err) => {
                tracing::warn!(movie_id, error = %err, "metadata fetch failed");
                EnrichedMovie { movie_id, details: None }
            }
        }
    });
    futures::future::join_all(fetches).await
}

use std::collections::HashMap;

use async_trait::async_trait;

use reelrec_core::traits::MetadataProvider;
use reelrec_core::types::{MovieDetails, MovieId};
use reelrec_enrich::{enrich_all, TmdbProvider};

/// Succeeds for every id except the one it is told to fail on.
struct StubProvider {
    fail_for: MovieId,
}

#[async_trait]
impl MetadataProvider for StubProvider {
    async fn fetch_metadata(&self, movie_id: MovieId) -> anyhow::Result<MovieDetails> {
        if movie_id == self.fail_for {
            anyhow::bail!("simulated fetch failure for {movie_id}");
        }
        Ok(MovieDetails {
            title: Some(format!("Movie {movie_id}")),
            release_date: Some("1999-01-01".to_string()),
            overview: None,
            poster_url: None,
        })
    }
}

#[tokio::test]
async fn one_failing_item_does_not_drop_or_reorder_the_rest() {
    let provider = StubProvider { fail_for: 30 };
    let ids = [10, 20, 30, 40, 50];
    let enriched = enrich_all(&provider, &ids).await;

    assert_eq!(enriched.len(), 5, "every recommended item keeps its slot");
    let order: Vec<MovieId> = enriched.iter().map(|e| e.movie_id).collect();
    assert_eq!(order, ids, "rank order is untouched by enrichment");

    assert!(enriched[2].details.is_none(), "failed item marked unavailable");
    for (i, entry) in enriched.iter().enumerate() {
        if i != 2 {
            let details = entry.details.as_ref().expect("successful fetch");
            assert_eq!(details.title.as_deref(), Some(format!("Movie {}", entry.movie_id).as_str()));
        }
    }
}

#[tokio::test]
async fn enrich_all_on_empty_input_is_empty() {
    let provider = StubProvider { fail_for: 0 };
    assert!(enrich_all(&provider, &[]).await.is_empty());
}

#[tokio::test]
async fn missing_tmdb_link_is_a_per_item_failure() {
    // A provider with no links at all can still be asked; each item just
    // comes back unavailable instead of erroring the batch.
    let provider = TmdbProvider::new(
        "https://api.themoviedb.org/3",
        "https://image.tmdb.org/t/p/w500",
        "unused",
        HashMap::new(),
    );
    let enriched = enrich_all(&provider, &[10, 20]).await;
    assert_eq!(enriched.len(), 2);
    assert!(enriched.iter().all(|e| e.details.is_none()));
}

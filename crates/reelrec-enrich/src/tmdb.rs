//! TMDB-backed metadata provider.
//!
//! Movie ids resolve to TMDB ids through the link map loaded with the
//! catalog; a movie without a link simply cannot be enriched. No retries:
//! one GET per item, best-effort.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use reelrec_core::traits::MetadataProvider;
use reelrec_core::types::{MovieDetails, MovieId};

#[derive(Debug, Deserialize)]
struct TmdbMovie {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
}

pub struct TmdbProvider {
    base_url: String,
    image_base_url: String,
    api_key: String,
    links: HashMap<MovieId, u32>,
    http: reqwest::Client,
}

impl TmdbProvider {
    pub fn new(
        base_url: impl Into<String>,
        image_base_url: impl Into<String>,
        api_key: impl Into<String>,
        links: HashMap<MovieId, u32>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            image_base_url: image_base_url.into(),
            api_key: api_key.into(),
            links,
            http: reqwest::Client::new(),
        }
    }

    fn details_from_response(&self, body: TmdbMovie) -> MovieDetails {
        // TMDB serves empty strings for unreleased/undocumented movies;
        // normalize those to the unavailable marker.
        MovieDetails {
            title: body.title.filter(|s| !s.is_empty()),
            release_date: body.release_date.filter(|s| !s.is_empty()),
            overview: body.overview.filter(|s| !s.is_empty()),
            poster_url: body
                .poster_path
                .filter(|s| !s.is_empty())
                .map(|p| format!("{}{p}", self.image_base_url.trim_end_matches('/'))),
        }
    }
}

#[async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch_metadata(&self, movie_id: MovieId) -> anyhow::Result<MovieDetails> {
        let tmdb_id = self
            .links
            .get(&movie_id)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("no tmdb link for movie {movie_id}"))?;

        let url = format!("{}/movie/{tmdb_id}", self.base_url.trim_end_matches('/'));
        let resp = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;
        if !resp.status().is_success() {
            anyhow::bail!("tmdb returned {} for movie {tmdb_id}", resp.status());
        }
        let body: TmdbMovie = resp.json().await?;
        Ok(self.details_from_response(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> TmdbProvider {
        TmdbProvider::new(
            "https://api.themoviedb.org/3",
            "https://image.tmdb.org/t/p/w500/",
            "test-key",
            HashMap::new(),
        )
    }

    #[test]
    fn response_fields_map_to_details() {
        let body: TmdbMovie = serde_json::from_str(
            r#"{"title": "Heat", "release_date": "1995-12-15",
                "overview": "A heist goes wrong.", "poster_path": "/heat.jpg"}"#,
        )
        .expect("parse");
        let details = provider().details_from_response(body);
        assert_eq!(details.title.as_deref(), Some("Heat"));
        assert_eq!(
            details.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/heat.jpg")
        );
    }

    #[test]
    fn empty_and_missing_fields_become_unavailable() {
        let body: TmdbMovie =
            serde_json::from_str(r#"{"title": "Heat", "release_date": ""}"#).expect("parse");
        let details = provider().details_from_response(body);
        assert_eq!(details.title.as_deref(), Some("Heat"));
        assert!(details.release_date.is_none(), "empty string is unavailable");
        assert!(details.overview.is_none());
        assert!(details.poster_url.is_none());
    }
}

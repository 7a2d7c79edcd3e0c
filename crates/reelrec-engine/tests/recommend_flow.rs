use std::fs;

use tempfile::TempDir;

use reelrec_core::error::{Error, Result};
use reelrec_core::traits::SimilaritySource;
use reelrec_core::types::Neighbor;
use reelrec_engine::{Recommender, DEFAULT_TOP_N};
use reelrec_store::{Catalog, SimilarityMatrix};

fn load_catalog(dir: &std::path::Path) -> Catalog {
    let movies = dir.join("movies.csv");
    let links = dir.join("links.csv");
    fs::write(
        &movies,
        "movieId,title,genres\n\
         10,Toy Story (1995),Animation\n\
         20,Heat (1995),Action\n\
         30,Casino (1995),Crime\n\
         40,Se7en (1995),Thriller\n",
    )
    .expect("write movies.csv");
    fs::write(
        &links,
        "movieId,imdbId,tmdbId\n10,0114709,862\n20,0113277,949\n30,0112641,524\n40,0114369,807\n",
    )
    .expect("write links.csv");
    Catalog::load(&movies, &links).expect("load catalog")
}

fn recommender(tmp: &TempDir) -> Recommender<SimilarityMatrix> {
    let catalog = load_catalog(tmp.path());
    // Row for index 0 (movie 10): [_, 5, 5, 3] reading across indices.
    let matrix = SimilarityMatrix::from_entries(
        4,
        vec![(0, 1, 5.0), (0, 2, 5.0), (0, 3, 3.0), (1, 2, 4.0)],
    )
    .expect("build matrix");
    Recommender::new(catalog, matrix).expect("aligned artifacts")
}

#[test]
fn recommend_returns_ranked_ids_with_tie_break() {
    let tmp = TempDir::new().expect("tempdir");
    let rec = recommender(&tmp);
    // Movies 20 and 30 tie on score; 20 has the smaller dense index.
    assert_eq!(rec.recommend(10, 2).expect("recommend"), vec![20, 30]);
}

#[test]
fn recommend_unknown_movie_is_item_not_found() {
    let tmp = TempDir::new().expect("tempdir");
    let rec = recommender(&tmp);
    assert!(matches!(rec.recommend(99, DEFAULT_TOP_N), Err(Error::ItemNotFound(99))));
}

#[test]
fn recommend_length_is_capped_by_catalog_size() {
    let tmp = TempDir::new().expect("tempdir");
    let rec = recommender(&tmp);
    let hits = rec.recommend(10, 10).expect("recommend");
    assert_eq!(hits.len(), 3, "min(n, K - 1) results");
    assert!(!hits.contains(&10), "query item never recommended to itself");
}

#[test]
fn recommend_zero_n_is_an_empty_ok_result() {
    let tmp = TempDir::new().expect("tempdir");
    let rec = recommender(&tmp);
    assert!(rec.recommend(10, 0).expect("recommend").is_empty());
}

#[test]
fn recommend_is_idempotent() {
    let tmp = TempDir::new().expect("tempdir");
    let rec = recommender(&tmp);
    let first = rec.recommend_scored(10, 3).expect("recommend");
    let second = rec.recommend_scored(10, 3).expect("recommend");
    assert_eq!(first, second, "queries must not mutate the store");
}

#[test]
fn misaligned_artifacts_never_publish() {
    let tmp = TempDir::new().expect("tempdir");
    let catalog = load_catalog(tmp.path());
    let matrix = SimilarityMatrix::from_entries(3, vec![(0, 1, 1.0)]).expect("build matrix");
    assert!(matches!(Recommender::new(catalog, matrix), Err(Error::Load(_))));
}

/// A similarity source that reports the right dimension but yields an
/// index the codec has never seen.
struct RogueSource;

impl SimilaritySource for RogueSource {
    fn dim(&self) -> usize {
        4
    }

    fn top_n(&self, _query: usize, _n: usize) -> Result<Vec<Neighbor>> {
        Ok(vec![Neighbor { index: 17, score: 1.0 }])
    }
}

#[test]
fn codec_store_disagreement_surfaces_as_integrity_fault() {
    let tmp = TempDir::new().expect("tempdir");
    let catalog = load_catalog(tmp.path());
    let rec = Recommender::new(catalog, RogueSource).expect("dims agree");
    assert!(matches!(rec.recommend(10, 2), Err(Error::Integrity(_))));
}

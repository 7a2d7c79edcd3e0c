use std::env;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use indicatif::ProgressBar;
use tracing_subscriber::EnvFilter;

use reelrec_core::config::{expand_path, Config};
use reelrec_core::error::Error;
use reelrec_core::types::{EnrichedMovie, MovieId};
use reelrec_engine::{Recommender, DEFAULT_TOP_N};
use reelrec_enrich::{enrich_all, TmdbProvider};
use reelrec_store::{Catalog, SimilarityMatrix};

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <recommend|info> [args...]", prog);
        process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn load_artifacts(config: &Config) -> anyhow::Result<(Catalog, SimilarityMatrix)> {
    let movies_csv: PathBuf =
        expand_path(config.get_or("data.movies_csv", "data/movies.csv".to_string()));
    let links_csv: PathBuf =
        expand_path(config.get_or("data.links_csv", "data/links.csv".to_string()));
    let matrix_path: PathBuf =
        expand_path(config.get_or("data.similarity_matrix", "data/similarity.json".to_string()));

    let catalog = Catalog::load(&movies_csv, &links_csv)?;
    let matrix = SimilarityMatrix::load(&matrix_path, catalog.len())?;
    Ok((catalog, matrix))
}

fn resolve_query(catalog: &Catalog, query: &str) -> MovieId {
    if let Ok(id) = query.parse::<MovieId>() {
        return id;
    }
    catalog.find_by_title(query).unwrap_or_else(|| {
        eprintln!("No movie titled {query:?} in the catalog.");
        process::exit(1)
    })
}

fn print_entry(rank: usize, entry: &EnrichedMovie, catalog: &Catalog) {
    let fallback_title = catalog.title_of(entry.movie_id).unwrap_or("<untitled>");
    match &entry.details {
        Some(d) => {
            println!("{:>2}. {}", rank, d.title.as_deref().unwrap_or(fallback_title));
            println!("    Release date: {}", d.release_date.as_deref().unwrap_or("N/A"));
            println!("    Overview: {}", d.overview.as_deref().unwrap_or("N/A"));
            println!("    Poster: {}", d.poster_url.as_deref().unwrap_or("N/A"));
        }
        None => println!("{rank:>2}. {fallback_title} (details unavailable)"),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "recommend" => {
            let query = args.first().cloned().unwrap_or_else(|| {
                eprintln!("Usage: reelrec recommend \"<title or movieId>\" [n]");
                process::exit(1)
            });
            let n = args
                .get(1)
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(DEFAULT_TOP_N);

            let (catalog, matrix) = load_artifacts(&config)?;
            let recommender = Recommender::new(catalog, matrix)?;
            let movie_id = resolve_query(recommender.catalog(), &query);

            let ranked = match recommender.recommend_scored(movie_id, n) {
                Ok(ranked) => ranked,
                Err(Error::ItemNotFound(id)) => {
                    eprintln!("Movie {id} is not in the catalog.");
                    process::exit(1)
                }
                Err(e) => return Err(e.into()),
            };
            if ranked.is_empty() {
                println!("No recommendations available.");
                return Ok(());
            }

            let watched = recommender.catalog().title_of(movie_id).unwrap_or("<untitled>");
            println!("Because you watched {watched}:");

            let api_key: String = config.get_or("tmdb.api_key", String::new());
            if api_key.is_empty() {
                for (rank, (id, score)) in ranked.iter().enumerate() {
                    let title = recommender.catalog().title_of(*id).unwrap_or("<untitled>");
                    println!("{:>2}. {title} (movieId {id}, similarity {score:.3})", rank + 1);
                }
                println!("(set tmdb.api_key in config.toml to fetch full details)");
                return Ok(());
            }

            let provider = TmdbProvider::new(
                config.get_or("tmdb.base_url", "https://api.themoviedb.org/3".to_string()),
                config.get_or("tmdb.image_base_url", "https://image.tmdb.org/t/p/w500".to_string()),
                api_key,
                recommender.catalog().tmdb_links().clone(),
            );
            let ids: Vec<MovieId> = ranked.iter().map(|&(id, _)| id).collect();

            let pb = ProgressBar::new_spinner();
            pb.set_message(format!("Fetching metadata for {} movies", ids.len()));
            pb.enable_steady_tick(Duration::from_millis(120));
            let enriched =
                tokio::runtime::Runtime::new()?.block_on(enrich_all(&provider, &ids));
            pb.finish_and_clear();

            for (rank, entry) in enriched.iter().enumerate() {
                print_entry(rank + 1, entry, recommender.catalog());
            }
        }
        "info" => {
            let (catalog, matrix) = load_artifacts(&config)?;
            println!("Movies: {}", catalog.len());
            println!(
                "Similarity matrix: {0} x {0} ({1} stored entries)",
                matrix.dim(),
                matrix.nnz()
            );
            println!("TMDB links: {}", catalog.tmdb_links().len());
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            process::exit(1);
        }
    }
    Ok(())
}

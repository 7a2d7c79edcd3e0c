//! Immutable sparse similarity matrix with top-N queries.
//!
//! The persisted artifact is a JSON document `{ "dim": K, "entries":
//! [[i, j, score], ...] }` holding the sparse entries as undirected
//! triplets; the loader mirrors each entry across the diagonal. Absent
//! pairs are implicit zeros and stay eligible for ranking.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sprs::{CsMat, TriMat};

use reelrec_core::error::{Error, Result};
use reelrec_core::traits::SimilaritySource;
use reelrec_core::types::Neighbor;

#[derive(Debug, Serialize, Deserialize)]
struct MatrixArtifact {
    dim: usize,
    entries: Vec<(usize, usize, f32)>,
}

pub struct SimilarityMatrix {
    rows: CsMat<f32>,
    dim: usize,
}

impl SimilarityMatrix {
    /// Deserialize the persisted artifact. `expected_dim` is the codec's
    /// item count; a mismatch means the two artifacts were not built
    /// together and nothing is published.
    pub fn load(path: &Path, expected_dim: usize) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| Error::Load(format!("open {}: {e}", path.display())))?;
        let artifact: MatrixArtifact = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| Error::Load(format!("parse {}: {e}", path.display())))?;
        if artifact.dim != expected_dim {
            return Err(Error::Load(format!(
                "similarity matrix dimension {} does not match item table size {expected_dim}",
                artifact.dim
            )));
        }
        let matrix = Self::from_entries(artifact.dim, artifact.entries)?;
        tracing::info!(dim = matrix.dim, nnz = matrix.nnz(), "similarity matrix loaded");
        Ok(matrix)
    }

    /// Build the matrix from validated triplets. Entries are undirected;
    /// the same unordered pair may repeat only with an identical score.
    pub fn from_entries<I>(dim: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, f32)>,
    {
        let mut pairs: HashMap<(usize, usize), f32> = HashMap::new();
        for (i, j, score) in entries {
            if i >= dim || j >= dim {
                return Err(Error::Load(format!(
                    "entry ({i}, {j}) outside {dim}x{dim} matrix"
                )));
            }
            if !score.is_finite() {
                return Err(Error::Load(format!("non-finite score at ({i}, {j})")));
            }
            let key = if i <= j { (i, j) } else { (j, i) };
            if let Some(existing) = pairs.insert(key, score) {
                if existing.to_bits() != score.to_bits() {
                    return Err(Error::Load(format!(
                        "conflicting scores {existing} and {score} for pair ({i}, {j})"
                    )));
                }
            }
        }

        let mut triplets = TriMat::new((dim, dim));
        for (&(i, j), &score) in &pairs {
            triplets.add_triplet(i, j, score);
            if i != j {
                triplets.add_triplet(j, i, score);
            }
        }
        let rows: CsMat<f32> = triplets.to_csr();
        Ok(Self { rows, dim })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Count of stored (non-implicit) entries, mirrored pairs included.
    pub fn nnz(&self) -> usize {
        self.rows.nnz()
    }

    /// The `n` highest-scoring counterparts of `query` among all other
    /// indices, strictly descending by score, ties broken by ascending
    /// index. Absent entries rank as zero, so the result always has
    /// exactly `min(n, dim - 1)` entries.
    pub fn top_n(&self, query: usize, n: usize) -> Result<Vec<Neighbor>> {
        if query >= self.dim {
            return Err(Error::IndexOutOfRange { index: query, dim: self.dim });
        }
        if n == 0 {
            return Err(Error::InvalidArgument("top_n requires n > 0".to_string()));
        }

        let row = self
            .rows
            .outer_view(query)
            .ok_or(Error::IndexOutOfRange { index: query, dim: self.dim })?;
        let mut stored = row.iter().peekable();

        // Min-heap of the n best seen so far; the root is the current
        // worst and is evicted first.
        let mut heap: BinaryHeap<Reverse<Candidate>> =
            BinaryHeap::with_capacity(n.min(self.dim).saturating_add(1));
        for index in 0..self.dim {
            let score = match stored.peek() {
                Some(&(col, &value)) if col == index => {
                    stored.next();
                    value
                }
                _ => 0.0,
            };
            if index == query {
                continue;
            }
            heap.push(Reverse(Candidate { score, index }));
            if heap.len() > n {
                heap.pop();
            }
        }

        let mut best: Vec<Candidate> = heap.into_iter().map(|r| r.0).collect();
        best.sort_by(|a, b| b.cmp(a));
        Ok(best
            .into_iter()
            .map(|c| Neighbor { index: c.index, score: c.score })
            .collect())
    }
}

impl SimilaritySource for SimilarityMatrix {
    fn dim(&self) -> usize {
        self.dim()
    }

    fn top_n(&self, query: usize, n: usize) -> Result<Vec<Neighbor>> {
        self.top_n(query, n)
    }
}

/// Ranking key: greater means better. Scores are known finite after
/// load-time validation, so `total_cmp` is a plain total order here.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    score: f32,
    index: usize,
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

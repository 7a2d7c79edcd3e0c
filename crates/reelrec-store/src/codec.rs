//! Bidirectional mapping between external movie ids and dense matrix
//! indices.
//!
//! Indices are assigned in order of first appearance in the item table, so
//! a codec rebuilt from the same table always matches the matrix that was
//! produced alongside it.

use std::collections::HashMap;

use reelrec_core::error::{Error, Result};
use reelrec_core::types::MovieId;

pub struct IdCodec {
    forward: HashMap<MovieId, usize>,
    reverse: Vec<MovieId>,
}

impl IdCodec {
    /// Build the codec from the full known item set. The item table must
    /// not contain the same id twice.
    pub fn from_ids<I>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = MovieId>,
    {
        let mut forward = HashMap::new();
        let mut reverse = Vec::new();
        for id in ids {
            if forward.insert(id, reverse.len()).is_some() {
                return Err(Error::Load(format!("duplicate movie id {id} in item table")));
            }
            reverse.push(id);
        }
        Ok(Self { forward, reverse })
    }

    /// Number of known items; dense indices range over `0..len()`.
    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }

    pub fn encode(&self, id: MovieId) -> Result<usize> {
        self.forward.get(&id).copied().ok_or(Error::UnknownItem(id))
    }

    pub fn decode(&self, index: usize) -> Result<MovieId> {
        self.reverse.get(index).copied().ok_or(Error::InvalidIndex(index))
    }

    /// Order-preserving batch decode; fails on the first invalid index.
    pub fn decode_many(&self, indices: &[usize]) -> Result<Vec<MovieId>> {
        indices.iter().map(|&ix| self.decode(ix)).collect()
    }
}

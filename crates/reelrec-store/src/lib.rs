//! reelrec-store
//!
//! The persisted-artifact layer: movie catalog (CSV), identifier codec and
//! the sparse similarity matrix. Everything here is loaded once at startup,
//! validated, and immutable afterwards.

pub mod catalog;
pub mod codec;
pub mod matrix;

pub use catalog::Catalog;
pub use codec::IdCodec;
pub use matrix::SimilarityMatrix;

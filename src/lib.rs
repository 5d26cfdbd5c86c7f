//! Levenshtein alignment of a hypothesis against a reference token sequence,
//! with correct/substitution/deletion/insertion counts for WER and CER, and a
//! column layout of the two sequences for visual diffing.

pub mod alignment;
pub mod error;
pub mod render;
pub mod tokenizer;
pub mod types;

pub use alignment::{compute_distance, Distance, MatchPath};
pub use render::{render, AlignedDisplay, Cell, Column};
pub use types::{EditCounts, EditOp, MatchPair, Token};

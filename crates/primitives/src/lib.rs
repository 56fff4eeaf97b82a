//! Core types for text validation: ranges, change sets, mappings and documents.

/// Block-structured document snapshots.
pub mod document;
/// Text range types and range mapping.
pub mod range;
/// Change sets and position mapping.
pub mod transaction;

pub use document::{BLOCK_BOUNDARY, Document};
pub use range::{CharIdx, CharLen, Range, RangeBias, coalesce};
pub use ropey::{Rope, RopeSlice};
pub use transaction::{Bias, Change, ChangeSet, Mapping};

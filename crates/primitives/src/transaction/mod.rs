//! Change sets and position mapping.
//!
//! A [`ChangeSet`] describes one edit in retain/delete/insert form. A
//! [`Mapping`] chains several of them so positions recorded before a run of
//! edits can be carried forward to the latest document.

mod changeset;
mod types;

pub use changeset::ChangeSet;
use smallvec::SmallVec;
pub use types::{Bias, Change, Insertion, Operation, Tendril};

use crate::range::{CharIdx, Range, RangeBias};

/// An ordered chain of borrowed change sets, oldest first.
///
/// Each change set stays owned by whoever recorded it; the mapping only
/// folds through them left to right when asked to move a position.
#[derive(Debug, Clone, Default)]
pub struct Mapping<'a> {
	steps: SmallVec<[&'a ChangeSet; 4]>,
}

impl<'a> Mapping<'a> {
	/// Creates an empty mapping (maps every position to itself).
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a change set to the end of the chain.
	pub fn push(&mut self, changes: &'a ChangeSet) {
		self.steps.push(changes);
	}

	/// Number of change sets in the chain.
	pub fn len(&self) -> usize {
		self.steps.len()
	}

	/// Returns true if the chain holds no change sets.
	pub fn is_empty(&self) -> bool {
		self.steps.is_empty()
	}

	/// Maps a position through every step in order.
	pub fn map_pos(&self, pos: CharIdx, bias: Bias) -> CharIdx {
		self.steps.iter().fold(pos, |pos, changes| changes.map_pos(pos, bias))
	}

	/// Maps a range through every step in order.
	///
	/// A range invalidated by any step stays invalidated, even if a later
	/// insertion lands where it used to be.
	pub fn map_range(&self, range: Range, bias: RangeBias) -> Option<Range> {
		self.steps
			.iter()
			.try_fold(range, |range, changes| range.map(changes, bias))
	}
}

impl<'a> FromIterator<&'a ChangeSet> for Mapping<'a> {
	fn from_iter<I: IntoIterator<Item = &'a ChangeSet>>(iter: I) -> Self {
		Self {
			steps: iter.into_iter().collect(),
		}
	}
}

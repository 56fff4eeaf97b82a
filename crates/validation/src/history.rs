use redline_primitives::Mapping;

use crate::edit::Edit;

/// Edits recorded since the last validation request started.
///
/// Owns every edit (and with it each edit's change set). Positions captured
/// when a batch started are carried forward by [`EditHistory::mapping`].
///
/// Invariant: never empty; the first entry is the edit the current window
/// started at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditHistory {
	edits: Vec<Edit>,
}

impl EditHistory {
	pub fn new(edit: Edit) -> Self {
		Self { edits: vec![edit] }
	}

	/// Records an edit at the end of the window.
	pub fn push(&mut self, edit: Edit) {
		debug_assert!(
			self.latest().time <= edit.time,
			"edits must arrive in logical-time order"
		);
		self.edits.push(edit);
	}

	/// Starts a new window at `edit`, discarding the previous chain.
	pub fn reset(&mut self, edit: Edit) {
		self.edits.clear();
		self.edits.push(edit);
	}

	/// The edit the current window started at.
	pub fn first(&self) -> &Edit {
		&self.edits[0]
	}

	pub fn latest(&self) -> &Edit {
		// Non-empty by construction.
		&self.edits[self.edits.len() - 1]
	}

	/// Mapping through every edit recorded after the window start, oldest first.
	///
	/// Edits are selected by position, not time: an edit sharing the start's
	/// logical time is still mapped through.
	pub fn mapping(&self) -> Mapping<'_> {
		self.edits.iter().skip(1).map(|edit| &edit.changes).collect()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Edit> {
		self.edits.iter()
	}

	pub fn len(&self) -> usize {
		self.edits.len()
	}

	/// Returns true if no edits are recorded.
	pub fn is_empty(&self) -> bool {
		self.edits.is_empty()
	}
}

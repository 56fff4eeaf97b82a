use super::types::{Bias, Change, Insertion, Operation, Tendril};
use crate::range::{CharIdx, CharLen, Range};
use crate::{Rope, RopeSlice};

/// A sequence of operations representing a set of changes to a document.
///
/// ChangeSet uses Operational Transformation (OT) principles to represent document
/// changes as a sequence of retain, delete, and insert operations. This representation
/// enables efficient inversion and position mapping.
///
/// Insertions always precede the deletion they share a position with, so a
/// replacement reads as `Insert, Delete`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeSet {
	/// Sequence of retain/delete/insert operations.
	pub(super) changes: Vec<Operation>,
	/// Length of the source document before changes.
	pub(super) len: usize,
	/// Length of the document after applying changes.
	pub(super) len_after: usize,
}

impl ChangeSet {
	/// Creates a change set that leaves `doc` untouched.
	pub fn identity(doc: RopeSlice) -> Self {
		let mut cs = Self::default();
		cs.retain(doc.len_chars());
		cs
	}

	/// Builds a change set from sorted, non-overlapping changes against `doc`.
	///
	/// Out-of-order or out-of-bounds changes are clamped into place rather than
	/// rejected; debug builds assert on them.
	pub fn from_changes(doc: RopeSlice, changes: impl IntoIterator<Item = Change>) -> Self {
		let len = doc.len_chars();
		let mut cs = Self::default();
		let mut last = 0;

		for Change {
			start,
			end,
			replacement,
		} in changes
		{
			debug_assert!(last <= start && start <= end && end <= len, "unsorted or out-of-bounds change");
			let start = start.clamp(last, len);
			let end = end.clamp(start, len);

			cs.retain(start - last);
			if let Some(text) = replacement {
				cs.insert(text);
			}
			cs.delete(end - start);
			last = end;
		}

		cs.retain(len - last);
		cs
	}

	/// Returns the length of the source document (before changes).
	pub fn len(&self) -> usize {
		self.len
	}

	/// Returns the length of the document after applying changes.
	pub fn len_after(&self) -> usize {
		self.len_after
	}

	/// Returns true if this changeset contains no operations.
	pub fn is_empty(&self) -> bool {
		self.changes.is_empty()
	}

	/// Returns true if applying this changeset leaves the document unchanged.
	pub fn is_identity(&self) -> bool {
		self.changes.iter().all(|op| matches!(op, Operation::Retain(_)))
	}

	/// Returns a slice of all operations in this changeset.
	pub fn changes(&self) -> &[Operation] {
		&self.changes
	}

	/// Adds a retain operation, preserving N characters from the source.
	///
	/// Consecutive retain operations are automatically merged for efficiency.
	pub(crate) fn retain(&mut self, n: CharLen) {
		if n == 0 {
			return;
		}

		self.len += n;
		self.len_after += n;

		if let Some(Operation::Retain(count)) = self.changes.last_mut() {
			*count += n;
		} else {
			self.changes.push(Operation::Retain(n));
		}
	}

	/// Adds a delete operation, removing N characters from the source.
	///
	/// Consecutive delete operations are automatically merged for efficiency.
	pub(crate) fn delete(&mut self, n: CharLen) {
		if n == 0 {
			return;
		}

		self.len += n;

		if let Some(Operation::Delete(count)) = self.changes.last_mut() {
			*count += n;
		} else {
			self.changes.push(Operation::Delete(n));
		}
	}

	/// Adds an insert operation, inserting text at the current position.
	///
	/// Insert operations are merged with adjacent inserts when possible. An
	/// insert following a delete is moved in front of it.
	pub(crate) fn insert(&mut self, text: Tendril) {
		let ins = Insertion::new(text);
		if ins.is_empty() {
			return;
		}

		self.len_after += ins.char_len();

		match self.changes.as_mut_slice() {
			[.., Operation::Insert(prev)] | [.., Operation::Insert(prev), Operation::Delete(_)] => {
				prev.push(ins);
			}
			[.., last @ Operation::Delete(_)] => {
				let del = std::mem::replace(last, Operation::Insert(ins));
				self.changes.push(del);
			}
			_ => {
				self.changes.push(Operation::Insert(ins));
			}
		}
	}

	/// Applies this changeset to a document, modifying it in place.
	pub fn apply(&self, doc: &mut Rope) {
		if self.changes.is_empty() {
			return;
		}

		let mut pos = 0;
		for op in &self.changes {
			match op {
				Operation::Retain(n) => {
					pos += n;
				}
				Operation::Delete(n) => {
					doc.remove(pos..pos + n);
				}
				Operation::Insert(ins) => {
					doc.insert(pos, ins.text());
					pos += ins.char_len();
				}
			}
		}
	}

	/// Inverts this changeset to create one that undoes its effects.
	///
	/// `doc` is the original document (before changes were applied).
	pub fn invert(&self, doc: &Rope) -> ChangeSet {
		let mut result = ChangeSet::default();

		let mut pos = 0;
		for op in &self.changes {
			match op {
				Operation::Retain(n) => {
					result.retain(*n);
					pos += n;
				}
				Operation::Delete(n) => {
					let deleted_text: String = doc.slice(pos..pos + n).chars().collect();
					result.insert(deleted_text);
					pos += n;
				}
				Operation::Insert(ins) => {
					result.delete(ins.char_len());
				}
			}
		}

		result
	}

	/// Maps a position through this changeset using the specified bias.
	///
	/// Positions inside a deleted span collapse to the point where the span
	/// was, after any text inserted in its place.
	pub fn map_pos(&self, pos: CharIdx, bias: Bias) -> CharIdx {
		let mut old_pos = 0;
		let mut new_pos = 0;

		for op in &self.changes {
			if old_pos > pos {
				break;
			}

			match op {
				Operation::Retain(n) => {
					if old_pos + n > pos {
						return new_pos + (pos - old_pos);
					}
					old_pos += n;
					new_pos += n;
				}
				Operation::Delete(n) => {
					if old_pos + n > pos {
						return new_pos;
					}
					old_pos += n;
				}
				Operation::Insert(ins) => {
					if old_pos == pos && bias == Bias::Left {
						// Position is exactly at insert point, stay before
					} else {
						new_pos += ins.char_len();
					}
				}
			}
		}

		new_pos + pos.saturating_sub(old_pos)
	}

	/// Returns the post-edit ranges this changeset touched.
	///
	/// Insertions report the inserted span; pure deletions report an empty
	/// range at the deletion point. Touching ranges are merged.
	pub fn changed_ranges(&self) -> Vec<Range> {
		let mut ranges: Vec<Range> = Vec::new();
		let mut new_pos = 0;

		for op in &self.changes {
			let touched = match op {
				Operation::Retain(n) => {
					new_pos += n;
					continue;
				}
				Operation::Delete(_) => Range::point(new_pos),
				Operation::Insert(ins) => {
					let range = Range::new(new_pos, new_pos + ins.char_len());
					new_pos += ins.char_len();
					range
				}
			};

			match ranges.last_mut() {
				Some(last) if last.to >= touched.from => last.to = last.to.max(touched.to),
				_ => ranges.push(touched),
			}
		}

		ranges
	}
}

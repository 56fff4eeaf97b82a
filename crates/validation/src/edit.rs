use redline_primitives::{ChangeSet, Document, Range};

/// Logical timestamp assigned by the host to every edit.
pub type LogicalTime = u64;

/// One editor transaction as seen by the validation core.
///
/// Carries the change set mapping pre-edit positions to post-edit ones, the
/// document it produced and the logical time it happened at. Named events are
/// dispatched alongside an edit too; those usually carry no changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
	pub changes: ChangeSet,
	pub doc: Document,
	pub time: LogicalTime,
}

impl Edit {
	/// An edit that leaves `doc` untouched.
	pub fn meta(doc: Document, time: LogicalTime) -> Self {
		Self {
			changes: ChangeSet::identity(doc.slice()),
			doc,
			time,
		}
	}

	/// An edit applying `changes` to `before`.
	pub fn new(before: &Document, changes: ChangeSet, time: LogicalTime) -> Self {
		let doc = before.apply(&changes);
		Self { changes, doc, time }
	}

	/// Returns true if the edit changed the document.
	pub fn doc_changed(&self) -> bool {
		!self.changes.is_identity()
	}

	/// Post-edit ranges that need validating because of this edit.
	///
	/// Pure deletions touch no text of their own; they are widened to the
	/// character next to the deletion point so the surrounding block is
	/// revalidated.
	pub fn dirtied_ranges(&self) -> Vec<Range> {
		let len = self.doc.len_chars();
		self.changes
			.changed_ranges()
			.into_iter()
			.filter_map(|range| {
				if !range.is_empty() {
					return Some(range);
				}
				if range.from < len {
					Some(Range::new(range.from, range.from + 1))
				} else if len > 0 {
					Some(Range::new(len - 1, len))
				} else {
					None
				}
			})
			.collect()
	}
}

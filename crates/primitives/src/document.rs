//! Block-structured document snapshots.

use crate::range::{CharIdx, Range};
use crate::transaction::{Change, ChangeSet};
use crate::{Rope, RopeSlice};

/// Token that opens every block.
pub const BLOCK_BOUNDARY: char = '\n';

/// An immutable snapshot of a document made of text blocks (paragraphs).
///
/// Each block is introduced by a [`BLOCK_BOUNDARY`] token occupying one
/// position, so the first block's text starts at position 1:
///
/// ```
/// # use redline_primitives::{Document, Range};
/// let doc = Document::from_blocks(["Example text to validate"]);
/// assert_eq!(doc.block_range_at(5), Range::new(1, 25));
/// assert_eq!(doc.text(Range::new(1, 25)), "Example text to validate");
/// ```
///
/// Cloning is cheap: the underlying [`Rope`] shares its nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
	text: Rope,
}

impl Document {
	/// Builds a document from the text of each block.
	pub fn from_blocks<I, S>(blocks: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut text = String::new();
		for block in blocks {
			text.push(BLOCK_BOUNDARY);
			text.push_str(block.as_ref());
		}
		Self {
			text: Rope::from(text.as_str()),
		}
	}

	/// Returns the underlying rope.
	pub fn rope(&self) -> &Rope {
		&self.text
	}

	/// Returns a slice over the whole document.
	pub fn slice(&self) -> RopeSlice<'_> {
		self.text.slice(..)
	}

	/// Length of the position space.
	pub fn len_chars(&self) -> usize {
		self.text.len_chars()
	}

	/// Returns true if the document holds no positions at all.
	pub fn is_empty(&self) -> bool {
		self.text.len_chars() == 0
	}

	/// Returns the text covered by `range`, clamped to the document.
	pub fn text(&self, range: Range) -> String {
		let range = range.clamp_to_len(self.len_chars());
		self.text.slice(range.from..range.to).to_string()
	}

	/// Returns the text range of the block containing `pos`.
	///
	/// A position on a boundary token belongs to the block that token closes.
	/// The range excludes the boundary tokens themselves and may be empty.
	pub fn block_range_at(&self, pos: CharIdx) -> Range {
		let pos = pos.min(self.len_chars());
		self.line_text_range(self.text.char_to_line(pos))
	}

	/// Returns the text ranges of every block `range` touches, in order.
	pub fn block_ranges(&self, range: Range) -> Vec<Range> {
		let range = range.clamp_to_len(self.len_chars());
		let first = self.text.char_to_line(range.from);
		let last = self.text.char_to_line(range.to);
		(first..=last).map(|line| self.line_text_range(line)).collect()
	}

	/// Range spanning the text of every block.
	pub fn full_range(&self) -> Range {
		let start = usize::from(self.text.chars().next() == Some(BLOCK_BOUNDARY));
		Range::new(start.min(self.len_chars()), self.len_chars())
	}

	/// Returns a new snapshot with `changes` applied.
	pub fn apply(&self, changes: &ChangeSet) -> Self {
		let mut text = self.text.clone();
		changes.apply(&mut text);
		Self { text }
	}

	/// Builds the change set for `changes` and the document it produces.
	pub fn edit(&self, changes: impl IntoIterator<Item = Change>) -> (ChangeSet, Self) {
		let changes = ChangeSet::from_changes(self.slice(), changes);
		let next = self.apply(&changes);
		(changes, next)
	}

	fn line_text_range(&self, line: usize) -> Range {
		let start = self.text.line_to_char(line);
		let slice = self.text.line(line);
		let end = start + slice.len_chars() - line_break_len(slice);
		Range::new(start, end)
	}
}

impl From<Rope> for Document {
	fn from(text: Rope) -> Self {
		Self { text }
	}
}

impl From<&str> for Document {
	fn from(text: &str) -> Self {
		Self {
			text: Rope::from(text),
		}
	}
}

/// Length in chars of the line break ending `line`, if any.
fn line_break_len(line: RopeSlice) -> usize {
	let len = line.len_chars();
	if len == 0 {
		return 0;
	}
	match line.char(len - 1) {
		'\n' if len >= 2 && line.char(len - 2) == '\r' => 2,
		'\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}' => 1,
		_ => 0,
	}
}

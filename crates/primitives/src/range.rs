use crate::transaction::{Bias, ChangeSet};

/// A position in the text, measured in characters (not bytes).
///
/// This is the canonical coordinate space for redline. Block boundary tokens
/// occupy one position each, see [`crate::document::Document`].
pub type CharIdx = usize;

/// A length or count in the text, measured in characters (not bytes).
///
/// This is distinct from CharIdx to avoid accidentally passing an index
/// where a length is expected or vice versa.
pub type CharLen = usize;

/// How the edges of a [`Range`] react to insertions exactly at them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBias {
	/// Insertions at either edge land inside the range (`from` maps left, `to` maps right).
	///
	/// Used for spans that should grow as the user types next to them.
	Inclusive,
	/// Insertions at either edge land outside the range (`from` maps right, `to` maps left).
	///
	/// Used for anchored markers that must not swallow neighbouring text.
	Exclusive,
}

impl RangeBias {
	/// Biases applied to `(from, to)`.
	#[inline]
	pub fn edges(self) -> (Bias, Bias) {
		match self {
			Self::Inclusive => (Bias::Left, Bias::Right),
			Self::Exclusive => (Bias::Right, Bias::Left),
		}
	}
}

/// A half-open text range `[from, to)`.
///
/// Unlike a selection, a range carries no direction: `from <= to` always holds
/// for ranges built through [`Range::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Range {
	/// Start of the range (inclusive).
	pub from: CharIdx,
	/// End of the range (exclusive).
	pub to: CharIdx,
}

impl Range {
	/// Creates a range, ordering the endpoints if needed.
	pub fn new(from: CharIdx, to: CharIdx) -> Self {
		Self {
			from: from.min(to),
			to: from.max(to),
		}
	}

	/// Creates a zero-width range at the given position.
	pub fn point(pos: CharIdx) -> Self {
		Self { from: pos, to: pos }
	}

	/// Returns the length of the range in characters.
	#[inline]
	pub fn len(&self) -> CharLen {
		self.to - self.from
	}

	/// Returns true if the range covers no characters.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.from >= self.to
	}

	/// Returns true if the position is within the range (exclusive of `to`).
	pub fn contains(&self, pos: CharIdx) -> bool {
		pos >= self.from && pos < self.to
	}

	/// Returns true if `other` lies entirely inside this range.
	pub fn covers(&self, other: &Range) -> bool {
		self.from <= other.from && other.to <= self.to
	}

	/// Returns true if this range overlaps with another.
	///
	/// Two empty ranges at the same position overlap, matching how an empty
	/// range sitting inside a non-empty one does.
	pub fn overlaps(&self, other: &Range) -> bool {
		if self.from < other.to && other.from < self.to {
			return true;
		}

		(self.is_empty() && other.is_empty() && self.from == other.from)
			|| (self.is_empty() && other.contains(self.from))
			|| (other.is_empty() && self.contains(other.from))
	}

	/// Returns true if the ranges overlap or share an endpoint.
	pub fn touches(&self, other: &Range) -> bool {
		self.from <= other.to && other.from <= self.to
	}

	/// Returns the smallest range covering both.
	pub fn union(&self, other: &Range) -> Self {
		Self {
			from: self.from.min(other.from),
			to: self.to.max(other.to),
		}
	}

	/// Clamps both endpoints to `[0, len]`.
	pub fn clamp_to_len(&self, len: CharIdx) -> Self {
		Self {
			from: self.from.min(len),
			to: self.to.min(len),
		}
	}

	/// Maps the range through an edit.
	///
	/// Returns [`None`] when the edit leaves nothing of the range, i.e. every
	/// character it covered was deleted.
	pub fn map(&self, changes: &ChangeSet, bias: RangeBias) -> Option<Self> {
		let (from_bias, to_bias) = bias.edges();
		let from = changes.map_pos(self.from, from_bias);
		let to = changes.map_pos(self.to, to_bias);
		(from < to).then_some(Self { from, to })
	}
}

impl From<std::ops::Range<CharIdx>> for Range {
	fn from(range: std::ops::Range<CharIdx>) -> Self {
		Self::new(range.start, range.end)
	}
}

impl From<Range> for std::ops::Range<CharIdx> {
	fn from(range: Range) -> Self {
		range.from..range.to
	}
}

/// Sorts ranges and merges every overlapping or touching pair into its union.
///
/// Empty ranges are discarded.
pub fn coalesce(mut ranges: Vec<Range>) -> Vec<Range> {
	ranges.retain(|range| !range.is_empty());
	ranges.sort_unstable();
	let mut out: Vec<Range> = Vec::with_capacity(ranges.len());

	for range in ranges {
		if let Some(last) = out.last_mut()
			&& range.from <= last.to
		{
			last.to = last.to.max(range.to);
			continue;
		}
		out.push(range);
	}

	out
}

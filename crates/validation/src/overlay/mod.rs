//! Position-anchored markers drawn over the document.
//!
//! [`Overlays`] is a value type: every operation returns a new store and
//! leaves the receiver untouched, so a state transition can build its overlay
//! set from the previous one without sharing mutable data.


use redline_primitives::{ChangeSet, Range, RangeBias};

use crate::request::{BatchId, ValidationOutput};

/// What a marker represents, keyed by the renderer for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
	/// A finding reported by the validation service.
	Annotation,
	/// Text currently out for validation.
	InFlight,
	/// The full extent of the last validation batch.
	Debug,
}

/// Data attached to an annotation marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
	/// Stable identifier, referenced by hover events.
	pub id: String,
	pub annotation: String,
	pub category: String,
	/// Text the finding was reported against.
	pub text: String,
	pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerPayload {
	Annotation(Annotation),
	InFlight {
		batch: BatchId,
	},
	/// `visible` is a presentation flag; hidden debug markers are still tracked.
	Debug {
		visible: bool,
	},
}

/// A single overlay marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
	pub range: Range,
	pub payload: MarkerPayload,
}

impl Marker {
	/// Builds an annotation marker for a service finding.
	pub fn annotation(range: Range, id: String, output: &ValidationOutput) -> Self {
		Self {
			range,
			payload: MarkerPayload::Annotation(Annotation {
				id,
				annotation: output.annotation.clone(),
				category: output.category.clone(),
				text: output.text.clone(),
				suggestion: output.suggestion.clone(),
			}),
		}
	}

	pub fn in_flight(range: Range, batch: BatchId) -> Self {
		Self {
			range,
			payload: MarkerPayload::InFlight { batch },
		}
	}

	pub fn debug(range: Range, visible: bool) -> Self {
		Self {
			range,
			payload: MarkerPayload::Debug { visible },
		}
	}

	pub fn kind(&self) -> MarkerKind {
		match self.payload {
			MarkerPayload::Annotation(_) => MarkerKind::Annotation,
			MarkerPayload::InFlight { .. } => MarkerKind::InFlight,
			MarkerPayload::Debug { .. } => MarkerKind::Debug,
		}
	}

	/// Identifier of an annotation marker.
	pub fn id(&self) -> Option<&str> {
		match &self.payload {
			MarkerPayload::Annotation(annotation) => Some(&annotation.id),
			_ => None,
		}
	}

	/// Returns true for in-flight markers belonging to `batch`.
	pub fn is_in_flight_for(&self, batch: BatchId) -> bool {
		matches!(self.payload, MarkerPayload::InFlight { batch: b } if b == batch)
	}
}

/// Immutable arena of markers kept sorted by range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlays {
	markers: Vec<Marker>,
}

impl Overlays {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a store holding the current markers plus `markers`.
	pub fn add(&self, markers: impl IntoIterator<Item = Marker>) -> Self {
		let mut next = self.markers.clone();
		next.extend(markers);
		Self::sorted(next)
	}

	/// Returns a store without the markers matching `predicate`.
	pub fn remove(&self, mut predicate: impl FnMut(&Marker) -> bool) -> Self {
		Self {
			markers: self.markers.iter().filter(|m| !predicate(m)).cloned().collect(),
		}
	}

	/// Returns a store with every marker mapped through `changes`.
	///
	/// Markers whose text was deleted are dropped.
	pub fn remap(&self, changes: &ChangeSet) -> Self {
		let markers = self
			.markers
			.iter()
			.filter_map(|marker| {
				let range = marker.range.map(changes, RangeBias::Exclusive)?;
				Some(Marker {
					range,
					payload: marker.payload.clone(),
				})
			})
			.collect();
		Self::sorted(markers)
	}

	/// Markers overlapping `range`, in range order.
	pub fn find(&self, range: Range) -> impl Iterator<Item = &Marker> {
		let end = self.markers.partition_point(|m| m.range.from <= range.to);
		self.markers[..end]
			.iter()
			.filter(move |m| m.range.overlaps(&range))
	}

	/// Looks up an annotation marker by identifier.
	pub fn find_by_id(&self, id: &str) -> Option<&Marker> {
		self.markers.iter().find(|m| m.id() == Some(id))
	}

	pub fn of_kind(&self, kind: MarkerKind) -> impl Iterator<Item = &Marker> {
		self.markers.iter().filter(move |m| m.kind() == kind)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Marker> {
		self.markers.iter()
	}

	pub fn len(&self) -> usize {
		self.markers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.markers.is_empty()
	}

	fn sorted(mut markers: Vec<Marker>) -> Self {
		markers.sort_by_key(|m| m.range);
		Self { markers }
	}
}

impl FromIterator<Marker> for Overlays {
	fn from_iter<I: IntoIterator<Item = Marker>>(iter: I) -> Self {
		Self::sorted(iter.into_iter().collect())
	}
}

//! The validation state machine.
//!
//! [`ValidationState`] is the single source of truth for the validation
//! feature. It is never mutated in place by callers: every edit and every
//! [`ValidationEvent`] goes through [`apply`] (or its halves [`apply_edit`]
//! and [`reduce`]) and yields a complete replacement value.
//!
//! Lifecycle of one cycle:
//!
//! ```text
//! edit ──► dirtied_ranges ──► RequestPending ──► RequestStart ──► in_flight
//!                                                                  │
//!               overlays ◄── annotation markers ◄── RequestSuccess ┤
//!               error    ◄──────────────────────── RequestError ───┘
//! ```

mod event;
#[cfg(test)]
pub(crate) mod invariants;
mod reducer;

pub use event::ValidationEvent;
use redline_primitives::Range;
pub use reducer::{apply, apply_edit, reduce};

use crate::config::ValidationConfig;
use crate::edit::{Edit, LogicalTime};
use crate::history::EditHistory;
use crate::overlay::{Marker, Overlays};
use crate::request::InFlightBatch;
use crate::throttle::Throttle;

/// Presentation flags fixed at initialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
	/// Render the debug marker spanning each batch.
	pub debug: bool,
	/// Add an in-flight marker over every input of a started batch.
	pub mark_in_flight: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationState {
	pub throttle: Throttle,
	/// Markers for the renderer. Every range lies within the current document.
	pub overlays: Overlays,
	/// Sorted, coalesced, non-empty ranges changed since the last request started.
	pub dirtied_ranges: Vec<Range>,
	/// Logical time of the last completed cycle.
	pub last_validation_time: LogicalTime,
	/// Annotation under the pointer. Only hover events touch this.
	pub hover_id: Option<String>,
	/// Edits since the last request started.
	pub history: EditHistory,
	/// The outstanding batch, if any. At most one exists at a time.
	pub in_flight: Option<InFlightBatch>,
	/// Dirtied ranges are waiting for the throttle to elapse.
	pub pending: bool,
	/// Message of the last failed request, cleared by the next success.
	pub error: Option<String>,
	pub options: ValidationOptions,
}

impl ValidationState {
	/// Creates the state for a freshly opened document.
	pub fn new(throttle: Throttle, options: ValidationOptions, initial: Edit) -> Self {
		Self {
			throttle,
			overlays: Overlays::new(),
			dirtied_ranges: Vec::new(),
			last_validation_time: 0,
			hover_id: None,
			history: EditHistory::new(initial),
			in_flight: None,
			pending: false,
			error: None,
			options,
		}
	}

	pub fn from_config(config: &ValidationConfig, initial: Edit) -> Self {
		Self::new(config.throttle(), config.options(), initial)
	}

	/// Returns true if a request may start now: something is dirty and
	/// nothing is in flight.
	pub fn can_start_request(&self) -> bool {
		!self.dirtied_ranges.is_empty() && self.in_flight.is_none()
	}

	/// The annotation marker under the pointer, if it still exists.
	pub fn hovered(&self) -> Option<&Marker> {
		self.hover_id
			.as_deref()
			.and_then(|id| self.overlays.find_by_id(id))
	}
}

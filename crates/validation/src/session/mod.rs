//! Single-document driver around the validation state machine.
//!
//! The session owns what the reducer deliberately does not: the current
//! document, the logical clock and wall-clock timing of edits. Hosts feed it
//! edits and service outcomes and poll it for requests once the throttle has
//! elapsed.


use std::time::Instant;

use redline_primitives::{Change, ChangeSet, Document};
use tracing::trace;

use crate::config::ValidationConfig;
use crate::edit::{Edit, LogicalTime};
use crate::request::{ValidationFailure, ValidationRequest, ValidationResponse};
use crate::state::{self, ValidationEvent, ValidationState};

#[derive(Debug, Clone)]
pub struct ValidationSession {
	state: ValidationState,
	document: Document,
	clock: LogicalTime,
	last_edit_at: Option<Instant>,
}

impl ValidationSession {
	pub fn new(config: &ValidationConfig, document: Document) -> Self {
		let state = ValidationState::from_config(config, Edit::meta(document.clone(), 0));
		Self {
			state,
			document,
			clock: 0,
			last_edit_at: None,
		}
	}

	pub fn state(&self) -> &ValidationState {
		&self.state
	}

	pub fn document(&self) -> &Document {
		&self.document
	}

	/// Logical time of the latest edit or request start.
	pub fn now_time(&self) -> LogicalTime {
		self.clock
	}

	/// Applies `changes` to the document at `now`.
	///
	/// Returns the change set that was applied. Changes that leave the
	/// document untouched do not advance the clock.
	pub fn apply_changes(&mut self, changes: impl IntoIterator<Item = Change>, now: Instant) -> ChangeSet {
		let (changes, document) = self.document.edit(changes);
		if changes.is_identity() {
			return changes;
		}

		self.clock += 1;
		let edit = Edit {
			changes: changes.clone(),
			doc: document.clone(),
			time: self.clock,
		};
		self.document = document;
		self.last_edit_at = Some(now);

		self.step(|state| {
			let state = state::apply_edit(&edit, state);
			if state.dirtied_ranges.is_empty() {
				return state;
			}
			state::reduce(&edit, state, ValidationEvent::RequestPending)
		});
		changes
	}

	/// Queues the whole document for validation, throttled from `now`.
	pub fn validate_document(&mut self, now: Instant) {
		self.last_edit_at = Some(now);
		self.dispatch(ValidationEvent::RequestForDocument);
	}

	/// Applies a named event at the current logical time.
	pub fn dispatch(&mut self, event: ValidationEvent) {
		let edit = Edit::meta(self.document.clone(), self.clock);
		self.step(|state| state::reduce(&edit, state, event));
	}

	/// Instant at which the pending request becomes due, if one is waiting.
	pub fn deadline(&self) -> Option<Instant> {
		if !self.state.pending || self.state.in_flight.is_some() {
			return None;
		}
		self.last_edit_at.map(|at| self.state.throttle.deadline(at))
	}

	/// Starts a request if one is pending and the throttle has elapsed.
	pub fn poll(&mut self, now: Instant) -> Option<ValidationRequest> {
		if !self.state.pending || self.state.in_flight.is_some() {
			return None;
		}
		if let Some(at) = self.last_edit_at
			&& !self.state.throttle.is_due(at, now)
		{
			let remaining = self.state.throttle.deadline(at).saturating_duration_since(now);
			trace!(?remaining, "validation throttled");
			return None;
		}

		self.clock += 1;
		self.dispatch(ValidationEvent::RequestStart);
		self.state.in_flight.clone()
	}

	/// Feeds a service outcome back into the state.
	pub fn complete(&mut self, outcome: Result<ValidationResponse, ValidationFailure>) {
		let event = match outcome {
			Ok(response) => ValidationEvent::RequestSuccess(response),
			Err(failure) => ValidationEvent::RequestError(failure),
		};
		self.dispatch(event);
	}

	pub fn hover(&mut self, id: Option<String>) {
		self.dispatch(ValidationEvent::NewHoverId(id));
	}

	fn step(&mut self, transition: impl FnOnce(ValidationState) -> ValidationState) {
		let placeholder = ValidationState::new(
			self.state.throttle,
			self.state.options,
			Edit::meta(Document::default(), 0),
		);
		let current = std::mem::replace(&mut self.state, placeholder);
		self.state = transition(current);
	}
}

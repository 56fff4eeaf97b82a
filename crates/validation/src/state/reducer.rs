use redline_primitives::{Range, RangeBias, coalesce};
use tracing::{debug, trace, warn};

use super::{ValidationEvent, ValidationState};
use crate::edit::Edit;
use crate::overlay::{Marker, MarkerKind, Overlays};
use crate::request::{
	BatchId, InFlightBatch, ValidationFailure, ValidationInput, ValidationResponse,
};

/// Applies `edit` and then `event`, in the order the host observed them.
pub fn apply(
	edit: &Edit,
	state: ValidationState,
	event: Option<ValidationEvent>,
) -> ValidationState {
	let state = apply_edit(edit, state);
	match event {
		Some(event) => reduce(edit, state, event),
		None => state,
	}
}

/// Carries `state` across a document edit.
///
/// Dirtied ranges and overlays are remapped into the post-edit document, the
/// edit's own changes become dirty, and the throttle grows if the edit landed
/// while a request was pending or in flight. Edits that leave the document
/// untouched return `state` as is.
pub fn apply_edit(edit: &Edit, state: ValidationState) -> ValidationState {
	if !edit.doc_changed() {
		return state;
	}

	let mut dirtied: Vec<Range> = state
		.dirtied_ranges
		.iter()
		.filter_map(|range| range.map(&edit.changes, RangeBias::Inclusive))
		.collect();
	dirtied.extend(edit.dirtied_ranges());

	let busy = state.pending || state.in_flight.is_some();
	let overlays = state.overlays.remap(&edit.changes);
	let mut history = state.history;
	history.push(edit.clone());

	ValidationState {
		throttle: state.throttle.next(busy),
		overlays,
		dirtied_ranges: coalesce(dirtied),
		history,
		..state
	}
}

/// Handles one named event. `edit` is the transaction the event was
/// dispatched with; its document and time are current.
pub fn reduce(edit: &Edit, state: ValidationState, event: ValidationEvent) -> ValidationState {
	trace!(event = event.name(), time = edit.time, "validation event");
	match event {
		ValidationEvent::RequestPending => ValidationState {
			pending: true,
			..state
		},
		ValidationEvent::RequestForDocument => request_for_document(edit, state),
		ValidationEvent::RequestStart => start_request(edit, state),
		ValidationEvent::RequestSuccess(response) => complete_request(edit, state, response),
		ValidationEvent::RequestError(failure) => fail_request(state, failure),
		ValidationEvent::NewHoverId(hover_id) => ValidationState { hover_id, ..state },
	}
}

fn request_for_document(edit: &Edit, state: ValidationState) -> ValidationState {
	let mut dirtied = state.dirtied_ranges;
	dirtied.push(edit.doc.full_range());
	ValidationState {
		dirtied_ranges: coalesce(dirtied),
		pending: true,
		..state
	}
}

fn start_request(edit: &Edit, state: ValidationState) -> ValidationState {
	if let Some(batch) = &state.in_flight {
		trace!(id = %batch.id, "validation request already in flight");
		return state;
	}

	let doc = &edit.doc;
	let blocks = coalesce(
		state
			.dirtied_ranges
			.iter()
			.flat_map(|range| doc.block_ranges(*range))
			.collect(),
	);
	if blocks.is_empty() {
		trace!("no text to validate");
		return ValidationState {
			dirtied_ranges: Vec::new(),
			pending: false,
			..state
		};
	}

	let id = BatchId(edit.time);
	let batch = InFlightBatch {
		inputs: blocks
			.into_iter()
			.map(|range| ValidationInput {
				text: doc.text(range),
				from: range.from,
				to: range.to,
			})
			.collect(),
		id,
	};

	let mut overlays = state
		.overlays
		.remove(|marker| marker.kind() == MarkerKind::Debug);
	if let Some(extent) = batch.extent() {
		overlays = overlays.add([Marker::debug(extent, state.options.debug)]);
	}
	if state.options.mark_in_flight {
		overlays = overlays.add(
			batch
				.inputs
				.iter()
				.map(|input| Marker::in_flight(input.range(), id)),
		);
	}

	debug!(%id, inputs = batch.inputs.len(), "validation request started");

	let mut history = state.history;
	history.reset(edit.clone());

	ValidationState {
		overlays,
		dirtied_ranges: Vec::new(),
		history,
		in_flight: Some(batch),
		pending: false,
		..state
	}
}

fn complete_request(
	edit: &Edit,
	state: ValidationState,
	response: ValidationResponse,
) -> ValidationState {
	let Some(batch) = state.in_flight.as_ref().filter(|b| b.id == response.id) else {
		trace!(id = %response.id, "discarding stale validation response");
		return state;
	};

	let overlays = settle_outputs(&state, batch, &response);
	debug!(
		id = %response.id,
		outputs = response.outputs.len(),
		"validation request completed"
	);

	ValidationState {
		throttle: state.throttle.reset(),
		overlays,
		last_validation_time: state.last_validation_time.max(edit.time),
		in_flight: None,
		error: None,
		..state
	}
}

/// Overlays after `response` lands: the batch's in-flight markers and the
/// annotations over re-validated text are replaced by the new findings.
fn settle_outputs(
	state: &ValidationState,
	batch: &InFlightBatch,
	response: &ValidationResponse,
) -> Overlays {
	let id = batch.id;
	let mapping = state.history.mapping();
	let origin_len = state.history.first().doc.len_chars();

	let validated: Vec<Range> = batch
		.inputs
		.iter()
		.filter_map(|input| mapping.map_range(input.range(), RangeBias::Inclusive))
		.collect();

	let findings: Vec<Marker> = response
		.outputs
		.iter()
		.enumerate()
		.filter_map(|(n, output)| {
			let range = output.range();
			if range.is_empty() || range.to > origin_len {
				warn!(%id, from = range.from, to = range.to, len = origin_len, "discarding malformed validation output");
				return None;
			}
			let Some(mapped) = mapping.map_range(range, RangeBias::Exclusive) else {
				trace!(%id, ?range, "validation output invalidated by later edits");
				return None;
			};
			Some(Marker::annotation(mapped, format!("{id}-{n}"), output))
		})
		.collect();

	state
		.overlays
		.remove(|marker| {
			marker.is_in_flight_for(id)
				|| (marker.kind() == MarkerKind::Annotation
					&& validated.iter().any(|range| marker.range.overlaps(range)))
		})
		.add(findings)
}

fn fail_request(state: ValidationState, failure: ValidationFailure) -> ValidationState {
	let Some(id) = state
		.in_flight
		.as_ref()
		.map(|batch| batch.id)
		.filter(|id| *id == failure.id)
	else {
		trace!(id = %failure.id, "discarding stale validation failure");
		return state;
	};

	debug!(%id, message = %failure.message, "validation request failed");
	let overlays = state
		.overlays
		.remove(|marker| marker.is_in_flight_for(id) || marker.kind() == MarkerKind::Debug);

	ValidationState {
		overlays,
		in_flight: None,
		error: Some(failure.message),
		..state
	}
}

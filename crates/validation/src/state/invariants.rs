pub(crate) mod catalog;

use std::time::Duration;

use proptest::prelude::*;
use redline_primitives::{Change, Document, Range};

use super::*;
use crate::request::{BatchId, ValidationFailure, ValidationOutput, ValidationResponse};

fn fresh(doc: &Document) -> ValidationState {
	ValidationState::new(
		Throttle::new(Duration::from_millis(100), Duration::from_millis(1000)),
		ValidationOptions {
			debug: false,
			mark_in_flight: true,
		},
		Edit::meta(doc.clone(), 0),
	)
}

fn finding(from: usize, to: usize) -> ValidationOutput {
	ValidationOutput {
		text: String::new(),
		from,
		to,
		annotation: "finding".into(),
		category: "legal".into(),
		suggestion: None,
	}
}

#[derive(Debug, Clone)]
enum Step {
	Edit { at: usize, delete: usize, insert: String },
	Pending,
	Start,
	Succeed(Vec<(usize, usize)>),
	Fail,
	Hover,
}

fn arb_step() -> impl Strategy<Value = Step> {
	prop_oneof![
		4 => (any::<usize>(), 0..6usize, "[a-z \n]{0,5}")
			.prop_map(|(at, delete, insert)| Step::Edit { at, delete, insert }),
		1 => Just(Step::Pending),
		2 => Just(Step::Start),
		2 => prop::collection::vec((0..60usize, 1..8usize), 0..4).prop_map(Step::Succeed),
		1 => Just(Step::Fail),
		1 => Just(Step::Hover),
	]
}

/// Runs one step against `state`, returning the edit it was applied with.
fn run_step(state: ValidationState, step: &Step, time: u64) -> (Edit, ValidationState) {
	let doc = state.history.latest().doc.clone();
	let in_flight = state.in_flight.as_ref().map_or(BatchId(0), |b| b.id);
	match step {
		Step::Edit { at, delete, insert } => {
			let len = doc.len_chars();
			let start = at % (len + 1);
			let end = (start + delete).min(len);
			let (changes, _) = doc.edit([Change {
				start,
				end,
				replacement: (!insert.is_empty()).then(|| insert.clone()),
			}]);
			let edit = Edit::new(&doc, changes, time);
			let next = apply(&edit, state, Some(ValidationEvent::RequestPending));
			(edit, next)
		}
		step => {
			let edit = Edit::meta(doc, time);
			let event = match step {
				Step::Pending => ValidationEvent::RequestPending,
				Step::Start => ValidationEvent::RequestStart,
				Step::Succeed(outputs) => ValidationEvent::RequestSuccess(ValidationResponse {
					outputs: outputs
						.iter()
						.map(|&(from, len)| finding(from, from + len))
						.collect(),
					id: in_flight,
				}),
				Step::Fail => ValidationEvent::RequestError(ValidationFailure {
					message: "failed".into(),
					id: in_flight,
				}),
				_ => ValidationEvent::NewHoverId(Some(format!("{in_flight}-0"))),
			};
			let next = reduce(&edit, state, event);
			(edit, next)
		}
	}
}

fn assert_within(range: Range, len: usize) {
	assert!(!range.is_empty(), "empty range {range:?}");
	assert!(range.to <= len, "range {range:?} past document end {len}");
}

#[cfg_attr(test, test)]
pub(crate) fn test_random_sessions_keep_ranges_in_bounds() {
	proptest!(|(text in "[a-z \n]{0,40}", steps in prop::collection::vec(arb_step(), 1..40))| {
		let doc = Document::from(text.as_str());
		let mut state = fresh(&doc);

		for (n, step) in steps.iter().enumerate() {
			let (edit, next) = run_step(state, step, n as u64 + 1);
			state = next;
			let len = edit.doc.len_chars();
			prop_assert_eq!(state.history.latest().doc.len_chars(), len);

			for pair in state.dirtied_ranges.windows(2) {
				prop_assert!(pair[0].to < pair[1].from, "dirtied ranges not coalesced: {:?}", pair);
			}
			for range in &state.dirtied_ranges {
				assert_within(*range, len);
			}
			for marker in state.overlays.iter() {
				assert_within(marker.range, len);
			}
			if let Some(batch) = &state.in_flight {
				prop_assert!(state.history.first().time == batch.id.0);
			}
			prop_assert!(state.throttle.current() >= state.throttle.initial());
			prop_assert!(state.throttle.current() <= state.throttle.max());
		}
	});
}

#[cfg_attr(test, test)]
pub(crate) fn test_start_refused_while_in_flight() {
	proptest!(|(first in "[a-z]{1,10}", second in "[a-z]{1,10}")| {
		let doc = Document::from_blocks([first.as_str(), second.as_str()]);
		let edit = Edit::meta(doc.clone(), 1);
		let state = reduce(&edit, fresh(&doc), ValidationEvent::RequestForDocument);
		let state = reduce(&edit, state, ValidationEvent::RequestStart);
		prop_assert!(state.in_flight.is_some());

		let (changes, _) = doc.edit([Change::insert(1, "x")]);
		let typed = Edit::new(&doc, changes, 2);
		let state = apply_edit(&typed, state);
		let again = reduce(&Edit::meta(typed.doc.clone(), 3), state.clone(), ValidationEvent::RequestStart);
		prop_assert_eq!(again, state);
	});
}

#[cfg_attr(test, test)]
pub(crate) fn test_stale_outcomes_leave_state_unchanged() {
	proptest!(|(started_at in 1..100u64, stale in 0..200u64)| {
		prop_assume!(stale != started_at);
		let doc = Document::from_blocks(["some text"]);
		let edit = Edit::meta(doc.clone(), started_at);
		let state = reduce(&edit, fresh(&doc), ValidationEvent::RequestForDocument);
		let state = reduce(&edit, state, ValidationEvent::RequestStart);

		let success = ValidationEvent::RequestSuccess(ValidationResponse {
			outputs: vec![finding(1, 5)],
			id: BatchId(stale),
		});
		let failure = ValidationEvent::RequestError(ValidationFailure {
			message: "late".into(),
			id: BatchId(stale),
		});
		prop_assert_eq!(reduce(&edit, state.clone(), success), state.clone());
		prop_assert_eq!(reduce(&edit, state.clone(), failure), state);
	});
}

#[cfg_attr(test, test)]
pub(crate) fn test_outputs_track_text_across_edits() {
	proptest!(|(edits in prop::collection::vec((any::<usize>(), 0..4usize, "[a-z ]{0,4}"), 0..12))| {
		let doc = Document::from_blocks(["alpha beta gamma"]);
		// "gamma" starts at 12 in "\nalpha beta gamma".
		let edit = Edit::meta(doc.clone(), 1);
		let state = reduce(&edit, fresh(&doc), ValidationEvent::RequestForDocument);
		let mut state = reduce(&edit, state, ValidationEvent::RequestStart);

		let mut gamma = 12;
		let mut current = doc;
		for (n, (at, delete, insert)) in edits.iter().enumerate() {
			let start = 1 + at % gamma;
			let end = (start + delete).min(gamma);
			let (changes, next) = current.edit([Change {
				start,
				end,
				replacement: (!insert.is_empty()).then(|| insert.clone()),
			}]);
			gamma = gamma - (end - start) + insert.chars().count();
			let edit = Edit::new(&current, changes, n as u64 + 2);
			state = apply_edit(&edit, state);
			current = next;
		}

		let done = Edit::meta(current.clone(), 100);
		let state = reduce(&done, state, ValidationEvent::RequestSuccess(ValidationResponse {
			outputs: vec![finding(12, 17)],
			id: BatchId(1),
		}));
		let marker = state.overlays.find_by_id("1-0");
		prop_assert!(marker.is_some());
		if let Some(marker) = marker {
			prop_assert_eq!(current.text(marker.range), "gamma");
			prop_assert_eq!(marker.range, Range::new(gamma, gamma + 5));
		}
	});
}

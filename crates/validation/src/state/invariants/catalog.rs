//! Invariant catalog for [`crate::state::ValidationState`].
#![allow(dead_code)]

/// Must keep at most one batch in flight.
///
/// - Enforced in: `start_request` in [`crate::state::reduce`]
/// - Tested by: [`crate::state::invariants::test_start_refused_while_in_flight`]
/// - Failure symptom: Responses for an older batch overwrite findings of a newer one.
pub(crate) const SINGLE_BATCH_IN_FLIGHT: () = ();

/// Must discard responses and failures whose id does not match the in-flight batch.
///
/// - Enforced in: `complete_request` and `fail_request` in [`crate::state::reduce`]
/// - Tested by: [`crate::state::invariants::test_stale_outcomes_leave_state_unchanged`]
/// - Failure symptom: Annotations land on text that changed after the response was computed.
pub(crate) const STALE_OUTCOMES_DISCARDED: () = ();

/// Must keep dirtied ranges sorted, non-empty, coalesced and inside the current document.
///
/// - Enforced in: [`crate::state::apply_edit`] and `request_for_document` via [`redline_primitives::coalesce`]
/// - Tested by: [`crate::state::invariants::test_random_sessions_keep_ranges_in_bounds`]
/// - Failure symptom: Requests slice text past the document end or send the same block twice.
pub(crate) const DIRTIED_RANGES_NORMALIZED: () = ();

/// Must remap every overlay through each edit and drop markers whose text was deleted.
///
/// - Enforced in: [`crate::overlay::Overlays::remap`] via [`crate::state::apply_edit`]
/// - Tested by: [`crate::state::invariants::test_random_sessions_keep_ranges_in_bounds`]
/// - Failure symptom: Underlines drift off the words they describe, or point past the document end.
pub(crate) const OVERLAYS_FOLLOW_EDITS: () = ();

/// Must map outputs through every edit recorded after their batch started, and no others.
///
/// - Enforced in: [`crate::history::EditHistory::mapping`] via `settle_outputs`
/// - Tested by: [`crate::state::invariants::test_outputs_track_text_across_edits`]
/// - Failure symptom: Annotations are shifted by edits that happened before the request.
pub(crate) const OUTPUTS_MAPPED_SINCE_BATCH_START: () = ();

/// Must keep the throttle within `[initial, max]`, growing only for edits while busy.
///
/// - Enforced in: [`crate::throttle::Throttle::next`] and [`crate::throttle::Throttle::reset`]
/// - Tested by: [`crate::state::invariants::test_random_sessions_keep_ranges_in_bounds`]
/// - Failure symptom: Requests fire while the user is still typing, or never fire at all.
pub(crate) const THROTTLE_BOUNDED: () = ();

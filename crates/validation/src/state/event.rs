use crate::request::{ValidationFailure, ValidationResponse};

/// Named events fed into [`super::reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationEvent {
	/// Dirtied ranges are waiting for the throttle to elapse.
	RequestPending,
	/// Marks the whole document dirty and pending.
	RequestForDocument,
	/// Captures the dirtied ranges into a new in-flight batch.
	RequestStart,
	/// The service answered a batch.
	RequestSuccess(ValidationResponse),
	/// The service failed to answer a batch.
	RequestError(ValidationFailure),
	/// The pointer moved onto an annotation (or off every annotation).
	NewHoverId(Option<String>),
}

impl ValidationEvent {
	/// Short name for logging.
	pub fn name(&self) -> &'static str {
		match self {
			Self::RequestPending => "request_pending",
			Self::RequestForDocument => "request_for_document",
			Self::RequestStart => "request_start",
			Self::RequestSuccess(_) => "request_success",
			Self::RequestError(_) => "request_error",
			Self::NewHoverId(_) => "new_hover_id",
		}
	}
}

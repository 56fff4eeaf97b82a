//! Request lifecycle types shared with the validation service.
//!
//! Field names on the wire follow the service payloads (`str`, `type`,
//! `validationInputs`, `validationOutputs`).

use std::fmt;

use redline_primitives::{CharIdx, Range};
use serde::{Deserialize, Serialize};

use crate::edit::LogicalTime;

/// Identifies one validation batch.
///
/// Assigned from the logical time of the edit the batch started at, and echoed
/// back by the service on success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(pub LogicalTime);

impl fmt::Display for BatchId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// A span of text sent for validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationInput {
	#[serde(rename = "str")]
	pub text: String,
	pub from: CharIdx,
	pub to: CharIdx,
}

impl ValidationInput {
	pub fn range(&self) -> Range {
		Range::new(self.from, self.to)
	}
}

/// A finding reported by the validation service.
///
/// Positions refer to the document as it was when the batch started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutput {
	/// Text the finding was reported against.
	#[serde(rename = "str")]
	pub text: String,
	pub from: CharIdx,
	pub to: CharIdx,
	/// Human-readable message.
	pub annotation: String,
	/// Category, used by the renderer for styling.
	#[serde(rename = "type")]
	pub category: String,
	/// Replacement text, for rules that propose one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub suggestion: Option<String>,
}

impl ValidationOutput {
	pub fn range(&self) -> Range {
		Range::new(self.from, self.to)
	}
}

/// The batch currently submitted to the validation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InFlightBatch {
	#[serde(rename = "validationInputs")]
	pub inputs: Vec<ValidationInput>,
	pub id: BatchId,
}

impl InFlightBatch {
	/// Smallest range covering every input.
	pub fn extent(&self) -> Option<Range> {
		self.inputs
			.iter()
			.map(ValidationInput::range)
			.reduce(|acc, range| acc.union(&range))
	}
}

/// What the host hands to the validation service: the batch itself.
pub type ValidationRequest = InFlightBatch;

/// Successful service response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResponse {
	#[serde(rename = "validationOutputs")]
	pub outputs: Vec<ValidationOutput>,
	pub id: BatchId,
}

/// Failed service call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
	pub message: String,
	pub id: BatchId,
}

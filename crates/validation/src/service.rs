//! Seam between the state machine and whatever produces findings.
//!
//! The reducer never awaits: the host submits a [`ValidationRequest`] to a
//! [`ValidationService`], and [`run_request`] turns the outcome back into the
//! event the reducer expects.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::ServiceError;
use crate::library::ValidationLibrary;
use crate::request::{ValidationFailure, ValidationOutput, ValidationRequest, ValidationResponse};
use crate::state::ValidationEvent;

/// Produces findings for a batch of inputs.
#[async_trait]
pub trait ValidationService: Send + Sync {
	async fn validate(&self, request: &ValidationRequest) -> Result<Vec<ValidationOutput>, ServiceError>;
}

/// Runs `request` against `service` and wraps the outcome for the reducer.
pub async fn run_request<S>(service: &S, request: &ValidationRequest) -> ValidationEvent
where
	S: ValidationService + ?Sized,
{
	match service.validate(request).await {
		Ok(outputs) => {
			debug!(id = %request.id, count = outputs.len(), "validation service answered");
			ValidationEvent::RequestSuccess(ValidationResponse {
				outputs,
				id: request.id,
			})
		}
		Err(e) => {
			warn!(id = %request.id, error = %e, "validation service failed");
			ValidationEvent::RequestError(ValidationFailure {
				message: e.to_string(),
				id: request.id,
			})
		}
	}
}

/// Parses a JSON success payload (`{"validationOutputs": [...], "id": ...}`).
pub fn decode_response(body: &str) -> Result<ValidationResponse, ServiceError> {
	Ok(serde_json::from_str(body)?)
}

/// Validates against a local rule library.
#[derive(Debug, Clone, Default)]
pub struct LibraryService {
	library: Arc<ValidationLibrary>,
}

impl LibraryService {
	pub fn new(library: ValidationLibrary) -> Self {
		Self {
			library: Arc::new(library),
		}
	}

	pub fn library(&self) -> &ValidationLibrary {
		&self.library
	}
}

#[async_trait]
impl ValidationService for LibraryService {
	async fn validate(&self, request: &ValidationRequest) -> Result<Vec<ValidationOutput>, ServiceError> {
		Ok(request
			.inputs
			.iter()
			.flat_map(|input| self.library.check(input))
			.collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::ValidationConfig;
	use crate::request::{BatchId, InFlightBatch, ValidationInput};

	const LIBRARY: &str = r#"
		[[rule_sets]]
		rules = [{ pattern = "first match", annotation = "Found 'first match'" }]

		[[rule_sets]]
		rules = [
			{ pattern = "second match", annotation = "Found 'second match'" },
			{ pattern = "match", annotation = "Found 'match'" },
		]
	"#;

	struct Unreachable;

	#[async_trait]
	impl ValidationService for Unreachable {
		async fn validate(&self, _request: &ValidationRequest) -> Result<Vec<ValidationOutput>, ServiceError> {
			Err(ServiceError::Unavailable("connection refused".into()))
		}
	}

	fn request(texts: &[(&str, usize)]) -> ValidationRequest {
		InFlightBatch {
			inputs: texts
				.iter()
				.map(|&(text, from)| ValidationInput {
					text: text.into(),
					from,
					to: from + text.chars().count(),
				})
				.collect(),
			id: BatchId(42),
		}
	}

	#[tokio::test]
	async fn library_service_reports_matches_per_input() {
		let library = ValidationConfig::from_toml(LIBRARY).unwrap().library().unwrap();
		let service = LibraryService::new(library);

		let event = run_request(&service, &request(&[("a first match", 1), ("no match here", 15)])).await;
		let ValidationEvent::RequestSuccess(response) = event else {
			panic!("expected success, got {event:?}");
		};
		assert_eq!(response.id, BatchId(42));
		let found: Vec<_> = response
			.outputs
			.iter()
			.map(|o| (o.annotation.as_str(), o.from, o.to))
			.collect();
		assert_eq!(
			found,
			vec![("Found 'first match'", 3, 14), ("Found 'match'", 18, 23)]
		);
	}

	#[tokio::test]
	async fn failures_become_request_errors() {
		let service: Arc<dyn ValidationService> = Arc::new(Unreachable);
		let event = run_request(service.as_ref(), &request(&[("text", 1)])).await;
		assert_eq!(
			event,
			ValidationEvent::RequestError(ValidationFailure {
				message: "validation service unavailable: connection refused".into(),
				id: BatchId(42),
			})
		);
	}

	#[test]
	fn decodes_service_payloads() {
		let response = decode_response(r#"{"validationOutputs": [], "id": 3}"#).unwrap();
		assert_eq!(response.id, BatchId(3));
		assert!(matches!(
			decode_response("{\"id\": \"nope\"}"),
			Err(ServiceError::Malformed(_))
		));
	}
}

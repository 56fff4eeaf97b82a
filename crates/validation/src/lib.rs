#![cfg_attr(test, allow(unused_crate_dependencies))]
//! In-editor text validation.
//!
//! Text the user edits is collected into dirtied ranges, sent in batches to a
//! validation service once typing pauses, and the findings come back as
//! overlay markers anchored to the text they describe. Everything between
//! those points is a pure state machine in [`state`]; [`session`] drives it
//! for a single document.
//!
//! # Main Types
//!
//! - [`ValidationState`] - The complete validation state of one document
//! - [`ValidationEvent`] - Named events consumed by [`state::reduce`]
//! - [`ValidationSession`] - Clock, throttle timing and document ownership
//! - [`ValidationService`] - Async seam producing findings for a batch

pub mod config;
pub mod edit;
pub mod error;
pub mod history;
pub mod library;
pub mod overlay;
pub mod request;
pub mod service;
pub mod session;
pub mod state;
pub mod throttle;

pub use config::ValidationConfig;
pub use edit::{Edit, LogicalTime};
pub use error::{ConfigError, ServiceError};
pub use overlay::{Marker, MarkerKind, Overlays};
pub use request::{BatchId, InFlightBatch, ValidationRequest};
pub use service::{LibraryService, ValidationService, run_request};
pub use session::ValidationSession;
pub use state::{ValidationEvent, ValidationOptions, ValidationState};
pub use throttle::Throttle;

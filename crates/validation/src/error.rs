//! Error types for configuration loading and validation services.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading validation configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The initial throttle exceeds the maximum.
	#[error("invalid throttle: initial {initial_ms}ms exceeds max {max_ms}ms")]
	InvalidThrottle {
		initial_ms: u64,
		max_ms: u64,
	},

	/// A rule pattern is not a valid regular expression.
	#[error("invalid pattern {pattern:?}: {error}")]
	InvalidPattern {
		pattern: String,
		error: regex::Error,
	},

	/// A `replace` rule has no replacement text.
	#[error("rule {pattern:?} uses operation 'replace' without a replacement")]
	MissingReplacement {
		pattern: String,
	},
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors reported by a validation service.
#[derive(Debug, Error)]
pub enum ServiceError {
	/// The service could not be reached or refused the request.
	#[error("validation service unavailable: {0}")]
	Unavailable(String),

	/// The service answered with a payload that does not parse.
	#[error("malformed validation response: {0}")]
	Malformed(#[from] serde_json::Error),
}

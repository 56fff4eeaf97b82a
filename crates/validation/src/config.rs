//! Validation configuration.
//!
//! Read from TOML; every field is optional:
//!
//! ```toml
//! initial_throttle_ms = 100
//! max_throttle_ms = 1000
//! debug = false
//! mark_in_flight = false
//!
//! [[rule_sets]]
//! rules = [
//!   { pattern = "first match", annotation = "Found 'first match'", type = "legal" },
//! ]
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::library::{Rule, RuleSet, ValidationLibrary};
use crate::state::ValidationOptions;
use crate::throttle::Throttle;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
	/// Quiet period after the last edit before a request starts.
	#[serde(default = "default_initial_throttle_ms")]
	pub initial_throttle_ms: u64,
	/// Upper bound for the quiet period when edits keep arriving.
	#[serde(default = "default_max_throttle_ms")]
	pub max_throttle_ms: u64,
	/// Render the debug marker over each batch.
	#[serde(default)]
	pub debug: bool,
	/// Mark text that is out for validation.
	#[serde(default)]
	pub mark_in_flight: bool,
	/// Rule sets for the built-in library service, in priority order.
	#[serde(default)]
	pub rule_sets: Vec<RuleSetConfig>,
}

fn default_initial_throttle_ms() -> u64 {
	100
}

fn default_max_throttle_ms() -> u64 {
	1000
}

impl Default for ValidationConfig {
	fn default() -> Self {
		Self {
			initial_throttle_ms: default_initial_throttle_ms(),
			max_throttle_ms: default_max_throttle_ms(),
			debug: false,
			mark_in_flight: false,
			rule_sets: Vec::new(),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSetConfig {
	#[serde(default)]
	pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
	/// Regular expression matched against each input.
	pub pattern: String,
	/// Message attached to every match.
	pub annotation: String,
	#[serde(default)]
	pub operation: Operation,
	/// Category reported with each match.
	#[serde(rename = "type", default = "default_category")]
	pub category: String,
	/// Suggested text, required by `replace` rules.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub replacement: Option<String>,
}

fn default_category() -> String {
	"legal".to_string()
}

/// What a rule does with its matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
	#[default]
	Annotate,
	/// Annotate and suggest the rule's replacement text.
	Replace,
}

impl ValidationConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml(source: &str) -> Result<Self> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads and parses the configuration file at `path`.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml(&source)
	}

	/// Checks the throttle bounds and that every rule compiles.
	pub fn validate(&self) -> Result<()> {
		if self.initial_throttle_ms > self.max_throttle_ms {
			return Err(ConfigError::InvalidThrottle {
				initial_ms: self.initial_throttle_ms,
				max_ms: self.max_throttle_ms,
			});
		}
		self.library().map(|_| ())
	}

	pub fn throttle(&self) -> Throttle {
		Throttle::new(
			Duration::from_millis(self.initial_throttle_ms),
			Duration::from_millis(self.max_throttle_ms),
		)
	}

	pub fn options(&self) -> ValidationOptions {
		ValidationOptions {
			debug: self.debug,
			mark_in_flight: self.mark_in_flight,
		}
	}

	/// Compiles the configured rule sets.
	pub fn library(&self) -> Result<ValidationLibrary> {
		self.rule_sets
			.iter()
			.map(|set| {
				set.rules
					.iter()
					.map(RuleConfig::compile)
					.collect::<Result<Vec<_>>>()
					.map(RuleSet::new)
			})
			.collect::<Result<Vec<_>>>()
			.map(ValidationLibrary::new)
	}
}

impl RuleConfig {
	fn compile(&self) -> Result<Rule> {
		let regex = regex::Regex::new(&self.pattern).map_err(|error| ConfigError::InvalidPattern {
			pattern: self.pattern.clone(),
			error,
		})?;
		let suggestion = match self.operation {
			Operation::Annotate => None,
			Operation::Replace => Some(self.replacement.clone().ok_or_else(|| {
				ConfigError::MissingReplacement {
					pattern: self.pattern.clone(),
				}
			})?),
		};
		Ok(Rule {
			regex,
			annotation: self.annotation.clone(),
			category: self.category.clone(),
			suggestion,
		})
	}
}

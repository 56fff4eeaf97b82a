//! Rule-based validation library.
//!
//! A library is an ordered list of rule sets. Earlier rule sets take
//! priority: a match overlapping one already reported by an earlier set is
//! suppressed, while rules within the same set may overlap freely.

use redline_primitives::{CharIdx, Range};
use regex::Regex;

use crate::request::{ValidationInput, ValidationOutput};

/// A compiled rule.
#[derive(Debug, Clone)]
pub struct Rule {
	pub regex: Regex,
	pub annotation: String,
	pub category: String,
	/// Replacement offered for every match, for `replace` rules.
	pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RuleSet {
	rules: Vec<Rule>,
}

impl RuleSet {
	pub fn new(rules: Vec<Rule>) -> Self {
		Self { rules }
	}

	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}
}

#[derive(Debug, Clone, Default)]
pub struct ValidationLibrary {
	rule_sets: Vec<RuleSet>,
}

impl ValidationLibrary {
	pub fn new(rule_sets: Vec<RuleSet>) -> Self {
		Self { rule_sets }
	}

	pub fn rule_sets(&self) -> &[RuleSet] {
		&self.rule_sets
	}

	pub fn is_empty(&self) -> bool {
		self.rule_sets.iter().all(|set| set.rules.is_empty())
	}

	/// Matches `input` against every rule, reporting document positions.
	pub fn check(&self, input: &ValidationInput) -> Vec<ValidationOutput> {
		let mut outputs: Vec<ValidationOutput> = Vec::new();

		for set in &self.rule_sets {
			let claimed = outputs.len();
			for rule in &set.rules {
				for found in rule.regex.find_iter(&input.text) {
					if found.is_empty() {
						continue;
					}
					let from = input.from + char_offset(&input.text, found.start());
					let to = from + found.as_str().chars().count();
					let range = Range::new(from, to);
					if outputs[..claimed].iter().any(|o| o.range().overlaps(&range)) {
						continue;
					}
					outputs.push(ValidationOutput {
						text: found.as_str().to_string(),
						from,
						to,
						annotation: rule.annotation.clone(),
						category: rule.category.clone(),
						suggestion: rule.suggestion.clone(),
					});
				}
			}
		}

		outputs.sort_by_key(ValidationOutput::range);
		outputs
	}
}

/// Char offset of byte index `byte` in `text`.
fn char_offset(text: &str, byte: usize) -> CharIdx {
	text[..byte].chars().count()
}

//! Quiet-period scheduling between edits and validation requests.

use std::time::{Duration, Instant};

/// Delay enforced between the last edit and the start of a request.
///
/// Invariant: `initial <= current <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
	current: Duration,
	initial: Duration,
	max: Duration,
}

impl Throttle {
	/// Creates a throttle starting at `initial`. `max` is raised to `initial`
	/// if it is smaller.
	pub fn new(initial: Duration, max: Duration) -> Self {
		Self {
			current: initial,
			initial,
			max: max.max(initial),
		}
	}

	pub fn current(&self) -> Duration {
		self.current
	}

	pub fn initial(&self) -> Duration {
		self.initial
	}

	pub fn max(&self) -> Duration {
		self.max
	}

	/// Delay to use after an edit.
	///
	/// Doubles (up to `max`) when the edit landed while a request was pending
	/// or in flight; otherwise unchanged.
	#[must_use]
	pub fn next(self, edit_during_pending: bool) -> Self {
		if !edit_during_pending {
			return self;
		}
		let grown = if self.current.is_zero() {
			Duration::from_millis(1)
		} else {
			self.current.saturating_mul(2)
		};
		Self {
			current: grown.min(self.max),
			..self
		}
	}

	/// Back to the initial delay, after a successful cycle.
	#[must_use]
	pub fn reset(self) -> Self {
		Self {
			current: self.initial,
			..self
		}
	}

	/// Instant at which a request may start, given the last edit.
	pub fn deadline(&self, last_edit_at: Instant) -> Instant {
		last_edit_at + self.current
	}

	/// Returns true once the quiet period after `last_edit_at` has elapsed.
	pub fn is_due(&self, last_edit_at: Instant, now: Instant) -> bool {
		now >= self.deadline(last_edit_at)
	}
}

//! The `-1` sentinel check.

use serde::Serialize;

use crate::value::ObservedValue;

/// Textual form of the sentinel.
pub const SENTINEL_TEXT: &str = "-1";

/// Numeric form of the sentinel.
pub const SENTINEL_NUMBER: f64 = -1.0;

/// Returns `true` iff `value` is the string `"-1"` or the number `-1`.
///
/// Only an exact match counts: `"-1.0"`, `" -1"`, `"-10"` and `-10` are not
/// sentinels, nor are null and undefined.
pub fn is_sentinel(value: &ObservedValue) -> bool {
	match value {
		ObservedValue::String(s) => s == SENTINEL_TEXT,
		ObservedValue::Number(n) => *n == SENTINEL_NUMBER,
		_ => false,
	}
}

/// Whether the overlay and diagnostics are active for the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SentinelState {
	/// The value is fine.
	#[default]
	Inactive,
	/// The value is the sentinel.
	Active,
}

impl SentinelState {
	/// Evaluates the state for `value`. There is no memory of earlier values.
	pub fn evaluate(value: &ObservedValue) -> Self {
		if is_sentinel(value) {
			SentinelState::Active
		} else {
			SentinelState::Inactive
		}
	}

	/// Returns `true` for [`SentinelState::Active`].
	pub fn is_active(self) -> bool {
		self == SentinelState::Active
	}
}

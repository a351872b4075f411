//! Debugger configuration.
//!
//! Every field has a default, so an empty JSON object is a valid document:
//!
//! ```ignore
//! use reinhardt_value_debugger::{DebuggerConfig, OverlayCorner};
//!
//! let config = DebuggerConfig::from_json(r#"{ "corner": "bottom_left", "auto_correct": false }"#)?;
//! assert_eq!(config.corner, OverlayCorner::BottomLeft);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;
use crate::mode::BuildMode;
use crate::value::ObservedValue;

/// Default overlay heading.
pub const DEFAULT_LABEL: &str = "⚠️ -1 VALUE DETECTED";

/// Viewport corner the overlay is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayCorner {
	/// Top left corner.
	TopLeft,
	/// Top right corner.
	#[default]
	TopRight,
	/// Bottom left corner.
	BottomLeft,
	/// Bottom right corner.
	BottomRight,
}

impl OverlayCorner {
	/// CSS offsets placing the panel in this corner.
	pub fn css(self) -> &'static str {
		match self {
			OverlayCorner::TopLeft => "top: 10px; left: 10px;",
			OverlayCorner::TopRight => "top: 10px; right: 10px;",
			OverlayCorner::BottomLeft => "bottom: 10px; left: 10px;",
			OverlayCorner::BottomRight => "bottom: 10px; right: 10px;",
		}
	}
}

/// Settings for a [`ValueDebugger`](crate::ValueDebugger).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebuggerConfig {
	/// Build mode gating the overlay. Defaults to [`BuildMode::current`].
	pub mode: BuildMode,
	/// Corner the overlay is pinned to.
	pub corner: OverlayCorner,
	/// Whether to ask the owner to replace a sentinel through its notifier.
	pub auto_correct: bool,
	/// Value passed to the notifier when correcting.
	#[serde(deserialize_with = "deserialize_replacement")]
	pub replacement: ObservedValue,
	/// Whether to capture a stack trace for each detection.
	pub capture_backtrace: bool,
	/// Heading shown at the top of the overlay.
	pub label: String,
}

fn deserialize_replacement<'de, D>(deserializer: D) -> Result<ObservedValue, D::Error>
where
	D: serde::Deserializer<'de>,
{
	serde_json::Value::deserialize(deserializer).map(ObservedValue::from)
}

impl Default for DebuggerConfig {
	fn default() -> Self {
		Self {
			mode: BuildMode::current(),
			corner: OverlayCorner::default(),
			auto_correct: true,
			replacement: ObservedValue::empty_string(),
			capture_backtrace: true,
			label: DEFAULT_LABEL.to_string(),
		}
	}
}

impl DebuggerConfig {
	/// Defaults with an explicit build mode.
	pub fn for_mode(mode: BuildMode) -> Self {
		Self {
			mode,
			..Self::default()
		}
	}

	/// Parses a JSON document; missing fields take their defaults.
	pub fn from_json(json: &str) -> ConfigResult<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Sets the build mode.
	pub fn with_mode(mut self, mode: BuildMode) -> Self {
		self.mode = mode;
		self
	}

	/// Sets the overlay corner.
	pub fn with_corner(mut self, corner: OverlayCorner) -> Self {
		self.corner = corner;
		self
	}

	/// Enables or disables auto-correction.
	pub fn with_auto_correct(mut self, enabled: bool) -> Self {
		self.auto_correct = enabled;
		self
	}

	/// Sets the replacement value sent to the notifier.
	pub fn with_replacement(mut self, replacement: impl Into<ObservedValue>) -> Self {
		self.replacement = replacement.into();
		self
	}

	/// Enables or disables stack trace capture.
	pub fn with_capture_backtrace(mut self, enabled: bool) -> Self {
		self.capture_backtrace = enabled;
		self
	}

	/// Sets the overlay heading.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = label.into();
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ConfigError;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let config = DebuggerConfig::for_mode(BuildMode::Development);

		assert_eq!(config.corner, OverlayCorner::TopRight);
		assert!(config.auto_correct);
		assert!(config.capture_backtrace);
		assert_eq!(config.replacement, ObservedValue::empty_string());
		assert_eq!(config.label, DEFAULT_LABEL);
	}

	#[rstest]
	fn test_from_json_fills_missing_fields() {
		let config = DebuggerConfig::from_json(
			r#"{ "mode": "production", "corner": "bottom_left", "replacement": 0 }"#,
		)
		.unwrap();

		assert_eq!(config.mode, BuildMode::Production);
		assert_eq!(config.corner, OverlayCorner::BottomLeft);
		assert_eq!(config.replacement, ObservedValue::Number(0.0));
		assert!(config.auto_correct);
	}

	#[rstest]
	#[case(r#"{ "mode": "qa" }"#)]
	#[case(r#"{ "auto_correct": "yes" }"#)]
	#[case("not json")]
	fn test_from_json_rejects_bad_documents(#[case] json: &str) {
		assert!(matches!(
			DebuggerConfig::from_json(json),
			Err(ConfigError::Parse(_))
		));
	}

	#[rstest]
	fn test_builder_chain() {
		let config = DebuggerConfig::for_mode(BuildMode::Production)
			.with_mode(BuildMode::Development)
			.with_corner(OverlayCorner::BottomRight)
			.with_auto_correct(false)
			.with_replacement(ObservedValue::Null)
			.with_capture_backtrace(false)
			.with_label("bad value");

		assert_eq!(config.mode, BuildMode::Development);
		assert_eq!(config.corner.css(), "bottom: 10px; right: 10px;");
		assert!(!config.auto_correct);
		assert_eq!(config.replacement, ObservedValue::Null);
		assert!(!config.capture_backtrace);
		assert_eq!(config.label, "bad value");
	}
}
